mod errors_parser;
mod var_parser;

use log::{debug, trace};

pub use crate::ast::{BinaryOp, ExpressionKind, LiteralValue, StatementKind, UnaryOp};
pub use crate::lexer::{Literal, Token, TokenKind};
pub use self::errors_parser::{ParseResult, ParserError, SyntaxError};

use tools::errors::CodeErr;

// Keywords at which a new statement begins, used to recover from errors
const STATEMENT_KEYWORDS: [TokenKind; 8] = [
    TokenKind::Class,
    TokenKind::Fun,
    TokenKind::Var,
    TokenKind::For,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Print,
    TokenKind::Return,
];

// Maximum number of nested groupings, unary operators and assignments
// in one expression
const MAX_NESTING: usize = 100;

const EQUALITY_OPS: [(TokenKind, BinaryOp); 2] = [
    (TokenKind::BangEqual, BinaryOp::NotEqual),
    (TokenKind::EqualEqual, BinaryOp::Equal),
];

const COMPARISON_OPS: [(TokenKind, BinaryOp); 4] = [
    (TokenKind::Greater, BinaryOp::Greater),
    (TokenKind::GreaterEqual, BinaryOp::GreaterEqual),
    (TokenKind::Less, BinaryOp::Less),
    (TokenKind::LessEqual, BinaryOp::LessEqual),
];

const ADDITIVE_OPS: [(TokenKind, BinaryOp); 2] = [
    (TokenKind::Minus, BinaryOp::Sub),
    (TokenKind::Plus, BinaryOp::Add),
];

const MULTIPLICATIVE_OPS: [(TokenKind, BinaryOp); 2] = [
    (TokenKind::Slash, BinaryOp::Div),
    (TokenKind::Star, BinaryOp::Mul),
];

const UNARY_OPS: [(TokenKind, UnaryOp); 2] = [
    (TokenKind::Bang, UnaryOp::Not),
    (TokenKind::Minus, UnaryOp::Negate),
];

/// Recursive descent parser, one method per grammar rule.
///
/// A statement that fails to parse is dropped and the error recorded, then
/// the parser skips tokens up to the next statement boundary and goes on.
/// `ast_nodes` keeps every statement that was parsed successfully.
#[derive(Default)]
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    pub ast_nodes: Vec<StatementKind>,
    errors: Vec<CodeErr>,
    nesting: usize,
}

impl Parser {
    pub fn build_ast(&mut self, tokens: Vec<Token>) -> Result<(), Vec<CodeErr>> {
        self.ast_nodes.clear();
        self.errors.clear();
        self.current = 0;
        self.nesting = 0;
        self.tokens = tokens;

        // Tokens may not come from the lexer, we make sure there is an end
        if self.tokens.last().map(|tk| tk.kind) != Some(TokenKind::EOF) {
            let line = self.tokens.last().map_or(1, |tk| tk.line);
            self.tokens.push(Token::new_eof(line));
        }

        while !self.is_eof() {
            if let Some(stmt) = self.parse_declaration() {
                self.ast_nodes.push(stmt);
            }
        }

        trace!(
            "parsed {} statement(s), {} syntax error(s)",
            self.ast_nodes.len(),
            self.errors.len()
        );

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }

    // Statement with error recovery. None if the statement was dropped
    fn parse_declaration(&mut self) -> Option<StatementKind> {
        match self.parse_statement() {
            Ok(stmt) => Some(stmt),
            Err(e) => {
                self.report(e);
                self.synchronize();
                None
            }
        }
    }

    fn parse_statement(&mut self) -> ParseResult<StatementKind> {
        let kind = self.at().kind;

        match kind {
            TokenKind::Var => self.parse_var_declaration(),
            TokenKind::Print => self.parse_print_statement(),
            TokenKind::OpenBrace => self.parse_block(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_print_statement(&mut self) -> ParseResult<StatementKind> {
        let keyword = self.eat();
        let expression = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon, ParserError::MissingSemicolonAfterValue)?;

        Ok(StatementKind::Print { keyword, expression })
    }

    fn parse_block(&mut self) -> ParseResult<StatementKind> {
        // We eat the '{'
        self.eat();

        let mut statements: Vec<StatementKind> = vec![];

        // Errors inside are recovered here, the block keeps its valid statements
        while !self.check(TokenKind::CloseBrace) && !self.is_eof() {
            if let Some(stmt) = self.parse_declaration() {
                statements.push(stmt);
            }
        }

        self.expect_token(TokenKind::CloseBrace, ParserError::UnclosedBlock)?;

        Ok(StatementKind::Block { statements })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<StatementKind> {
        let expression = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon, ParserError::MissingSemicolonAfterExpr)?;

        Ok(StatementKind::Expression { expression })
    }

    pub(crate) fn parse_expression(&mut self) -> ParseResult<ExpressionKind> {
        self.parse_assignment_expr()
    }

    fn parse_assignment_expr(&mut self) -> ParseResult<ExpressionKind> {
        // Target is parsed as any expression then checked
        let left = self.parse_equality_expr()?;

        if let Some(equals) = self.match_kinds(&[TokenKind::Equals]) {
            // Allows syntax like x = y = z
            let value = self.nested(|p| p.parse_assignment_expr())?;

            return match left {
                ExpressionKind::Variable { name } => Ok(ExpressionKind::Assign {
                    name,
                    value: Box::new(value),
                }),
                // No need to synchronize, we know where we are
                _ => {
                    self.report(SyntaxError::new(equals, ParserError::InvalidAssignTarget));
                    Ok(left)
                }
            };
        }

        Ok(left)
    }

    fn parse_equality_expr(&mut self) -> ParseResult<ExpressionKind> {
        let mut left = self.parse_comparison_expr()?;

        while let Some((op, operator)) = self.match_operator(&EQUALITY_OPS) {
            let right = self.parse_comparison_expr()?;
            left = ExpressionKind::new_binary(left, op, operator, right);
        }

        Ok(left)
    }

    fn parse_comparison_expr(&mut self) -> ParseResult<ExpressionKind> {
        let mut left = self.parse_additive_expr()?;

        while let Some((op, operator)) = self.match_operator(&COMPARISON_OPS) {
            let right = self.parse_additive_expr()?;
            left = ExpressionKind::new_binary(left, op, operator, right);
        }

        Ok(left)
    }

    fn parse_additive_expr(&mut self) -> ParseResult<ExpressionKind> {
        let mut left = self.parse_multiplicative_expr()?;

        while let Some((op, operator)) = self.match_operator(&ADDITIVE_OPS) {
            let right = self.parse_multiplicative_expr()?;
            left = ExpressionKind::new_binary(left, op, operator, right);
        }

        Ok(left)
    }

    fn parse_multiplicative_expr(&mut self) -> ParseResult<ExpressionKind> {
        let mut left = self.parse_unary_expr()?;

        while let Some((op, operator)) = self.match_operator(&MULTIPLICATIVE_OPS) {
            let right = self.parse_unary_expr()?;
            left = ExpressionKind::new_binary(left, op, operator, right);
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> ParseResult<ExpressionKind> {
        match self.match_operator(&UNARY_OPS) {
            // Right recursion: '!!true' or '--1'
            Some((op, operator)) => {
                let right = self.nested(|p| p.parse_unary_expr())?;
                Ok(ExpressionKind::new_unary(op, operator, right))
            }
            None => self.parse_primary_expr(),
        }
    }

    fn parse_primary_expr(&mut self) -> ParseResult<ExpressionKind> {
        let kind = self.at().kind;

        let literal = match kind {
            TokenKind::False => LiteralValue::Bool(false),
            TokenKind::True => LiteralValue::Bool(true),
            TokenKind::Nil => LiteralValue::Nil,
            TokenKind::Number | TokenKind::Str => match self.at().literal.clone() {
                Some(Literal::Number(nb)) => LiteralValue::Number(nb),
                Some(Literal::Str(s)) => LiteralValue::Str(s),
                None => return Err(SyntaxError::new(self.at().clone(), ParserError::ExpectExpression)),
            },
            TokenKind::Identifier => return Ok(ExpressionKind::Variable { name: self.eat() }),
            // Manages the beginning of paranthesis var a = 5 + (...
            TokenKind::OpenParen => {
                self.eat();
                let expr = self.nested(|p| {
                    let expr = p.parse_expression()?;
                    p.expect_token(TokenKind::CloseParen, ParserError::UnclosedGrouping)?;
                    Ok(expr)
                })?;

                return Ok(ExpressionKind::new_grouping(expr));
            }
            _ => return Err(SyntaxError::new(self.at().clone(), ParserError::ExpectExpression)),
        };

        // We eat the literal token
        self.eat();

        Ok(ExpressionKind::Literal { value: literal })
    }

    // ---------
    //  Helpers
    // ---------

    // There is always an EOF at the end, current never goes past it
    fn at(&self) -> &Token {
        &self.tokens[self.current]
    }

    // Consume current token and return it. Stays on EOF
    fn eat(&mut self) -> Token {
        let tk = self.at().clone();

        if !self.is_eof() {
            self.current += 1;
        }

        tk
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.at().kind == kind
    }

    // Eat the current token if it's one of the kinds
    fn match_kinds(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.at().kind) {
            Some(self.eat())
        } else {
            None
        }
    }

    // Eat the current token if it's one of the operators of the table
    fn match_operator<Op: Copy>(&mut self, ops: &[(TokenKind, Op)]) -> Option<(Op, Token)> {
        let kind = self.at().kind;
        let op = ops.iter().find(|(k, _)| *k == kind).map(|(_, op)| *op)?;

        Some((op, self.eat()))
    }

    // One more level of recursion. Past the limit we stop with an error
    // instead of exhausting the stack
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.nesting >= MAX_NESTING {
            return Err(SyntaxError::new(self.at().clone(), ParserError::TooDeep));
        }

        self.nesting += 1;
        let res = rule(self);
        self.nesting -= 1;

        res
    }

    fn expect_token(&mut self, kind: TokenKind, error: ParserError) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.eat())
        } else {
            Err(SyntaxError::new(self.at().clone(), error))
        }
    }

    // Is end of file
    fn is_eof(&self) -> bool {
        self.at().kind == TokenKind::EOF
    }

    fn report(&mut self, error: SyntaxError) {
        let err = error.to_glob_err();
        debug!("syntax error on token {}: {}", error.token, err);
        self.errors.push(err);
    }

    // Skip tokens until we are at the beginning of the next statement
    fn synchronize(&mut self) {
        let mut last = self.eat();

        while !self.is_eof() {
            if last.kind == TokenKind::Semicolon || STATEMENT_KEYWORDS.contains(&self.at().kind) {
                return;
            }

            last = self.eat();
        }
    }
}
