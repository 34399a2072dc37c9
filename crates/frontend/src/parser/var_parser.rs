use super::errors_parser::{ParseResult, ParserError};
use super::Parser;

use super::StatementKind;
use super::TokenKind;

impl Parser {
    // Variable declaration. Two possibilities:
    //  var x;
    //  var x = 5;
    //
    // Without value, the variable holds nil
    pub(super) fn parse_var_declaration(&mut self) -> ParseResult<StatementKind> {
        // We eat the 'var' keyword
        self.eat();

        let name = self.expect_token(TokenKind::Identifier, ParserError::ExpectedVarName)?;

        let initializer = match self.match_kinds(&[TokenKind::Equals]) {
            Some(_) => Some(self.parse_expression()?),
            None => None,
        };

        self.expect_token(TokenKind::Semicolon, ParserError::MissingSemicolonAfterVarDecl)?;

        Ok(StatementKind::VarDeclaration { name, initializer })
    }
}
