use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ValueError {
    // Operations
    #[error("Operand must be a number.")]
    NumberOperand,

    #[error("Operands must be numbers.")]
    NumberOperands,

    #[error("Operands must be two numbers or two strings.")]
    AddOperands,
}
