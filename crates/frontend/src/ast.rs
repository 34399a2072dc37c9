use std::fmt::Display;

use crate::lexer::Token;

// Shortest decimal form, '3' and not '3.0'
pub fn format_number(value: f64) -> String {
    if value.is_infinite() {
        if value > 0. { "Infinity".into() } else { "-Infinity".into() }
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum LiteralValue {
    Number(f64),
    Str(String),
    Bool(bool),
    Nil,
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiteralValue::Number(nb) => write!(f, "{}", format_number(*nb)),
            LiteralValue::Str(s) => write!(f, "\"{}\"", s),
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Nil => write!(f, "nil"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum StatementKind {
    Block {
        statements: Vec<StatementKind>,
    },
    Expression {
        expression: ExpressionKind,
    },
    // The keyword is kept for the line of output errors
    Print {
        keyword: Token,
        expression: ExpressionKind,
    },
    VarDeclaration {
        name: Token,
        // None for declaration without value: var x;
        initializer: Option<ExpressionKind>,
    },
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum UnaryOp {
    Not,
    Negate,
}

// Operators and names are kept as tokens so runtime errors know their line
#[derive(Debug, PartialEq, Clone)]
pub enum ExpressionKind {
    // Assignment is an expression, chaining is allowed: x = y = z = 3
    Assign {
        name: Token,
        value: Box<ExpressionKind>,
    },
    Binary {
        left: Box<ExpressionKind>,
        op: BinaryOp,
        operator: Token,
        right: Box<ExpressionKind>,
    },
    Grouping {
        expression: Box<ExpressionKind>,
    },
    Literal {
        value: LiteralValue,
    },
    Unary {
        op: UnaryOp,
        operator: Token,
        right: Box<ExpressionKind>,
    },
    Variable {
        name: Token,
    },
}

impl ExpressionKind {
    pub fn new_binary(left: ExpressionKind, op: BinaryOp, operator: Token, right: ExpressionKind) -> Self {
        ExpressionKind::Binary {
            left: Box::new(left),
            op,
            operator,
            right: Box::new(right),
        }
    }

    pub fn new_unary(op: UnaryOp, operator: Token, right: ExpressionKind) -> Self {
        ExpressionKind::Unary {
            op,
            operator,
            right: Box::new(right),
        }
    }

    pub fn new_grouping(expression: ExpressionKind) -> Self {
        ExpressionKind::Grouping {
            expression: Box::new(expression),
        }
    }

    pub fn new_number(value: f64) -> Self {
        ExpressionKind::Literal {
            value: LiteralValue::Number(value),
        }
    }
}
