use thiserror::Error;

use crate::environment::EnvError;
use crate::frontend::lexer::Token;
use crate::values::ValueError;
use tools::errors::{CodeErr, ReportCodeErr};

// Each variant keeps the token it was raised at, for the line
#[derive(Error, Debug, PartialEq)]
pub enum InterpreterError {
    #[error("{reason}")]
    TypeMismatch { operator: Token, reason: ValueError },

    #[error("Undefined variable '{}'.", .name.lexeme)]
    UndefinedVariable { name: Token },

    #[error("Error while writing output: {reason}")]
    Output { keyword: Token, reason: String },
}

impl InterpreterError {
    pub fn line(&self) -> u64 {
        match self {
            InterpreterError::TypeMismatch { operator, .. } => operator.line,
            InterpreterError::UndefinedVariable { name } => name.line,
            InterpreterError::Output { keyword, .. } => keyword.line,
        }
    }

    pub fn to_code_err(&self) -> CodeErr {
        self.to_runtime_err(self.line())
    }

    // Environment errors only know the name, we add the token back
    pub(super) fn from_env(name: &Token, err: EnvError) -> Self {
        match err {
            EnvError::UndeclaredVar(_) => InterpreterError::UndefinedVariable { name: name.clone() },
        }
    }
}

// Implement global trait for final error
impl ReportCodeErr for InterpreterError {}
