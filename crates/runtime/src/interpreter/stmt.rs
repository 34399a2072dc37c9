use std::io::Write;

use super::{Interpreter, InterpreterError};
use crate::environment::Env;
use crate::frontend::ast::StatementKind;
use crate::values::RuntimeVal;

impl<W: Write> Interpreter<W> {
    pub(super) fn resolve(&mut self, stmt: &StatementKind, env: &mut Env) -> Result<(), InterpreterError> {
        match stmt {
            StatementKind::Expression { expression } => {
                self.evaluate(expression, env)?;
            }
            StatementKind::Print { keyword, expression } => {
                let value = self.evaluate(expression, env)?;

                writeln!(self.out, "{}", value).map_err(|e| InterpreterError::Output {
                    keyword: keyword.clone(),
                    reason: e.to_string(),
                })?;
            }
            StatementKind::VarDeclaration { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr, env)?,
                    None => RuntimeVal::Nil,
                };

                env.declare_var(name.lexeme.clone(), value);
            }
            // The scope is released even if a statement fails
            StatementKind::Block { statements } => {
                env.with_scope(|env| self.execute_block(statements, env))?;
            }
        }

        Ok(())
    }

    fn execute_block(&mut self, statements: &[StatementKind], env: &mut Env) -> Result<(), InterpreterError> {
        for stmt in statements {
            self.resolve(stmt, env)?;
        }

        Ok(())
    }
}
