use thiserror::*;

use super::{Token, TokenKind};
use tools::errors::{CodeErr, ReportCodeErr};

#[derive(Error, Debug, PartialEq, Clone)]
pub enum ParserError {
    // Expressions
    #[error("Expect expression.")]
    ExpectExpression,

    #[error("Expect ')' after expression.")]
    UnclosedGrouping,

    #[error("Invalid assignment target.")]
    InvalidAssignTarget,

    #[error("Expression nesting too deep.")]
    TooDeep,

    // Statements
    #[error("Expect ';' after value.")]
    MissingSemicolonAfterValue,

    #[error("Expect ';' after expression.")]
    MissingSemicolonAfterExpr,

    #[error("Expect '}}' after block.")]
    UnclosedBlock,

    // Variables declarations
    #[error("Expect variable name.")]
    ExpectedVarName,

    #[error("Expect ';' after variable declaration.")]
    MissingSemicolonAfterVarDecl,
}

// Implement global trait for final error
impl ReportCodeErr for ParserError {}

// A parser error with the token it was raised at
#[derive(Debug, PartialEq)]
pub struct SyntaxError {
    pub token: Token,
    pub error: ParserError,
}

pub type ParseResult<T> = Result<T, SyntaxError>;

impl SyntaxError {
    pub fn new(token: Token, error: ParserError) -> Self {
        Self { token, error }
    }

    pub fn location(&self) -> String {
        match self.token.kind {
            TokenKind::EOF => " at end".to_string(),
            _ => format!(" at '{}'", self.token.lexeme),
        }
    }

    pub fn to_glob_err(&self) -> CodeErr {
        self.error.to_glob_err(self.token.line, &self.location())
    }
}
