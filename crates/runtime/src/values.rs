use std::fmt::Display;

mod value_errors;

pub use value_errors::ValueError;
use frontend::ast::{format_number, BinaryOp, LiteralValue, UnaryOp};


#[derive(Debug, Clone)]
pub enum RuntimeVal {
    Nil,
    Number(f64),
    Str(String),
    Bool(bool),
}

// Numbers are equal when their bits are: NaN equals NaN but 0 and -0
// differ. Every NaN counts as the same one
impl PartialEq for RuntimeVal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeVal::Nil, RuntimeVal::Nil) => true,
            (RuntimeVal::Number(lhs), RuntimeVal::Number(rhs)) => {
                (lhs.is_nan() && rhs.is_nan()) || lhs.to_bits() == rhs.to_bits()
            }
            (RuntimeVal::Str(lhs), RuntimeVal::Str(rhs)) => lhs == rhs,
            (RuntimeVal::Bool(lhs), RuntimeVal::Bool(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl Display for RuntimeVal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeVal::Nil => write!(f, "nil"),
            RuntimeVal::Number(nb) => write!(f, "{}", format_number(*nb)),
            RuntimeVal::Str(s) => write!(f, "{}", s),
            RuntimeVal::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&LiteralValue> for RuntimeVal {
    fn from(value: &LiteralValue) -> Self {
        match value {
            LiteralValue::Number(nb) => RuntimeVal::Number(*nb),
            LiteralValue::Str(s) => RuntimeVal::Str(s.clone()),
            LiteralValue::Bool(b) => RuntimeVal::Bool(*b),
            LiteralValue::Nil => RuntimeVal::Nil,
        }
    }
}

impl RuntimeVal {
    // Only nil and false are falsy, 0 and "" are truthy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, RuntimeVal::Nil | RuntimeVal::Bool(false))
    }

    pub fn apply_unary(self, op: UnaryOp) -> Result<RuntimeVal, ValueError> {
        match op {
            UnaryOp::Not => Ok(RuntimeVal::Bool(!self.is_truthy())),
            UnaryOp::Negate => match self {
                RuntimeVal::Number(nb) => Ok(RuntimeVal::Number(-nb)),
                _ => Err(ValueError::NumberOperand),
            },
        }
    }

    // Equality never fails, values of different types are just not equal.
    // Division by zero follows IEEE 754: inf or NaN
    pub fn calculate(self, rhs: RuntimeVal, op: BinaryOp) -> Result<RuntimeVal, ValueError> {
        match op {
            BinaryOp::Equal => Ok(RuntimeVal::Bool(self == rhs)),
            BinaryOp::NotEqual => Ok(RuntimeVal::Bool(self != rhs)),
            BinaryOp::Add => match (self, rhs) {
                (RuntimeVal::Number(lhs), RuntimeVal::Number(rhs)) => Ok(RuntimeVal::Number(lhs + rhs)),
                (RuntimeVal::Str(lhs), RuntimeVal::Str(rhs)) => Ok(RuntimeVal::Str(lhs + &rhs)),
                _ => Err(ValueError::AddOperands),
            },
            BinaryOp::Sub => numbers(self, rhs).map(|(lhs, rhs)| RuntimeVal::Number(lhs - rhs)),
            BinaryOp::Mul => numbers(self, rhs).map(|(lhs, rhs)| RuntimeVal::Number(lhs * rhs)),
            BinaryOp::Div => numbers(self, rhs).map(|(lhs, rhs)| RuntimeVal::Number(lhs / rhs)),
            BinaryOp::Greater => numbers(self, rhs).map(|(lhs, rhs)| RuntimeVal::Bool(lhs > rhs)),
            BinaryOp::GreaterEqual => numbers(self, rhs).map(|(lhs, rhs)| RuntimeVal::Bool(lhs >= rhs)),
            BinaryOp::Less => numbers(self, rhs).map(|(lhs, rhs)| RuntimeVal::Bool(lhs < rhs)),
            BinaryOp::LessEqual => numbers(self, rhs).map(|(lhs, rhs)| RuntimeVal::Bool(lhs <= rhs)),
        }
    }
}

fn numbers(lhs: RuntimeVal, rhs: RuntimeVal) -> Result<(f64, f64), ValueError> {
    match (lhs, rhs) {
        (RuntimeVal::Number(lhs), RuntimeVal::Number(rhs)) => Ok((lhs, rhs)),
        _ => Err(ValueError::NumberOperands),
    }
}
