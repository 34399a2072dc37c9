use std::collections::HashMap;
use std::fmt::Display;

use log::debug;
use thiserror::Error;
use tools::errors::{CodeErr, ReportCodeErr};

#[derive(Debug, Error, PartialEq)]
pub enum LexerError {
    #[error("Unterminated string.")]
    UnterminatedString,

    #[error("Unexpected character.")]
    UnexpectedCharacter(char),
}

impl ReportCodeErr for LexerError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Grouping
    OpenParen,  // (
    CloseParen, // )
    OpenBrace,  // {
    CloseBrace, // }
    Comma,      // ,
    Dot,        // .
    Semicolon,  // ;

    // Operators
    Minus,
    Plus,
    Slash,
    Star,
    Bang,
    BangEqual,
    Equals,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literal types
    Identifier,
    Str,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    // File
    EOF,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    // Exact slice of the source
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: u64,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.literal {
            Some(lit) => write!(f, "{:?} {} {:?}", self.kind, self.lexeme, lit),
            None => write!(f, "{:?} {}", self.kind, self.lexeme),
        }
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

/// Single pass scanner over the source characters.
///
/// `start` marks the first character of the lexeme being scanned and
/// `current` the next character to consume. Lexical errors don't stop the
/// scan: they are collected and returned once the whole input is consumed,
/// `tokens` being filled in every case and always ending with one `EOF`.
#[derive(Default)]
pub struct Lexer {
    pub tokens: Vec<Token>,
    reserved_keywords: HashMap<&'static str, TokenKind>,
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: u64,
}

impl Lexer {
    // Keywords generation
    fn generate_keywords(&mut self) {
        self.reserved_keywords.insert("and", TokenKind::And);
        self.reserved_keywords.insert("class", TokenKind::Class);
        self.reserved_keywords.insert("else", TokenKind::Else);
        self.reserved_keywords.insert("false", TokenKind::False);
        self.reserved_keywords.insert("for", TokenKind::For);
        self.reserved_keywords.insert("fun", TokenKind::Fun);
        self.reserved_keywords.insert("if", TokenKind::If);
        self.reserved_keywords.insert("nil", TokenKind::Nil);
        self.reserved_keywords.insert("or", TokenKind::Or);
        self.reserved_keywords.insert("print", TokenKind::Print);
        self.reserved_keywords.insert("return", TokenKind::Return);
        self.reserved_keywords.insert("super", TokenKind::Super);
        self.reserved_keywords.insert("this", TokenKind::This);
        self.reserved_keywords.insert("true", TokenKind::True);
        self.reserved_keywords.insert("var", TokenKind::Var);
        self.reserved_keywords.insert("while", TokenKind::While);
    }

    pub fn tokenize(&mut self, source_code: &str) -> Result<(), Vec<CodeErr>> {
        self.generate_keywords();

        self.chars = source_code.chars().collect();
        self.start = 0;
        self.current = 0;
        self.line = 1;
        self.tokens.clear();

        let mut errors: Vec<CodeErr> = vec![];

        while !self.is_at_end() {
            // Beginning of the next lexeme
            self.start = self.current;

            if let Err(e) = self.scan_token() {
                errors.push(e.to_glob_err(self.line, ""));
            }
        }

        // We append manualy end of file
        self.tokens.push(Token::new_eof(self.line));
        debug!(
            "scanned {} tokens over {} lines, {} lexical error(s)",
            self.tokens.len(),
            self.line,
            errors.len()
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn scan_token(&mut self) -> Result<(), LexerError> {
        let c = self.advance();

        match c {
            // Single character tokens
            '(' => self.add_token(TokenKind::OpenParen),
            ')' => self.add_token(TokenKind::CloseParen),
            '{' => self.add_token(TokenKind::OpenBrace),
            '}' => self.add_token(TokenKind::CloseBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            // One or two characters tokens
            '!' => {
                let kind = if self.match_next('=') { TokenKind::BangEqual } else { TokenKind::Bang };
                self.add_token(kind)
            }
            '=' => {
                let kind = if self.match_next('=') { TokenKind::EqualEqual } else { TokenKind::Equals };
                self.add_token(kind)
            }
            '<' => {
                let kind = if self.match_next('=') { TokenKind::LessEqual } else { TokenKind::Less };
                self.add_token(kind)
            }
            '>' => {
                let kind = if self.match_next('=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                self.add_token(kind)
            }
            '/' => {
                // We check if this is comment
                if self.match_next('/') {
                    // The new line is left for the main loop to count it
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash)
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.read_string()?,
            c if c.is_ascii_digit() => self.read_number(),
            c if is_alpha(c) => self.read_identifier(),
            c => return Err(LexerError::UnexpectedCharacter(c)),
        }

        Ok(())
    }

    fn read_string(&mut self) -> Result<(), LexerError> {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            // Strings can span several lines
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexerError::UnterminatedString);
        }

        // The closing "
        self.advance();

        // Without the surrounding quotes
        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        self.add_literal_token(TokenKind::Str, Some(Literal::Str(value)));

        Ok(())
    }

    fn read_number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // A dot is only part of the number if a digit follows it: '12.' is '12' then '.'
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();

            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Only digits with an optional fraction, always a valid f64
        let value = self.current_lexeme().parse::<f64>().unwrap_or_default();
        self.add_literal_token(TokenKind::Number, Some(Literal::Number(value)));
    }

    fn read_identifier(&mut self) {
        while self.peek().is_some_and(is_alphanumeric) {
            self.advance();
        }

        // Check for reserved keywords
        let kind = self
            .reserved_keywords
            .get(self.current_lexeme().as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);

        self.add_token(kind);
    }

    // ---------
    //  Helpers
    // ---------
    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    // Only called when not at end
    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    fn current_lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal_token(kind, None);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let lexeme = self.current_lexeme();
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }
}

// ---------
//  Helpers
// ---------
impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, literal: Option<Literal>, line: u64) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    pub fn new_simple(kind: TokenKind, lexeme: &str, line: u64) -> Token {
        Token::new(kind, lexeme, None, line)
    }

    pub fn new_number(lexeme: &str, value: f64, line: u64) -> Token {
        Token::new(TokenKind::Number, lexeme, Some(Literal::Number(value)), line)
    }

    pub fn new_string(value: &str, line: u64) -> Token {
        Token::new(
            TokenKind::Str,
            format!("\"{}\"", value),
            Some(Literal::Str(value.to_string())),
            line,
        )
    }

    pub fn new_identifier(name: &str, line: u64) -> Token {
        Token::new(TokenKind::Identifier, name, None, line)
    }

    pub fn new_eof(line: u64) -> Token {
        Token::new(TokenKind::EOF, "", None, line)
    }
}
