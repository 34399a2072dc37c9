mod expr;
mod interp_errors;
mod stmt;

use std::io::Write;

use log::debug;

pub use interp_errors::InterpreterError;

use super::environment::Env;
use crate::frontend::ast::StatementKind;


// The output is where 'print' writes: stdout for the host, a buffer in tests
pub struct Interpreter<W: Write> {
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    // Stops at the first runtime error. Effects of the statements
    // executed before it are kept
    pub fn execute_program(
        &mut self,
        nodes: &[StatementKind],
        env: &mut Env,
    ) -> Result<(), InterpreterError> {
        debug!("Executing {} statements", nodes.len());

        for stmt in nodes {
            self.resolve(stmt, env)?;
        }

        Ok(())
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
