use std::io::Write;

use super::{Interpreter, InterpreterError};
use crate::environment::Env;
use crate::frontend::ast::ExpressionKind;
use crate::values::RuntimeVal;

impl<W: Write> Interpreter<W> {
    pub(super) fn evaluate(&mut self, expr: &ExpressionKind, env: &mut Env) -> Result<RuntimeVal, InterpreterError> {
        match expr {
            ExpressionKind::Literal { value } => Ok(value.into()),
            ExpressionKind::Grouping { expression } => self.evaluate(expression, env),
            ExpressionKind::Variable { name } => Ok(env
                .lookup_var(&name.lexeme)
                .map_err(|e| InterpreterError::from_env(name, e))?
                .clone()),
            // Assignment evaluates to the assigned value
            ExpressionKind::Assign { name, value } => {
                let assign_value = self.evaluate(value, env)?;

                env.assign_var(&name.lexeme, assign_value.clone())
                    .map_err(|e| InterpreterError::from_env(name, e))?;

                Ok(assign_value)
            }
            ExpressionKind::Unary { op, operator, right } => {
                let value = self.evaluate(right, env)?;

                value.apply_unary(*op).map_err(|reason| InterpreterError::TypeMismatch {
                    operator: operator.clone(),
                    reason,
                })
            }
            // Left operand first, then right one
            ExpressionKind::Binary { left, op, operator, right } => {
                let lhs = self.evaluate(left, env)?;
                let rhs = self.evaluate(right, env)?;

                lhs.calculate(rhs, *op)
                    .map_err(|reason| InterpreterError::TypeMismatch {
                        operator: operator.clone(),
                        reason,
                    })
            }
        }
    }
}
