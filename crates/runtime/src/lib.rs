pub mod environment;
pub mod interpreter;
pub mod values;

extern crate frontend;
extern crate tools;

pub use frontend::ast::{ExpressionKind, StatementKind};
pub use interpreter::{Interpreter, InterpreterError};
