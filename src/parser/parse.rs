//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a Pratt (precedence climbing) parser driven by a [`Registry`]:
//! - This module: Parser struct, helper methods, and coordination
//! - `lookup`: binding powers and the prefix/infix/statement dispatch tables
//! - `expressions`: the Pratt loop and expression handlers
//! - `statements`: statement dispatch, blocks, `return`, comments, includes
//! - `declarations`: declarator prefixes, variable and function declarations
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state. Handlers stored in the
//! registry are free functions taking `&mut Parser`.
//!
//! Every failure is returned as a [`ParseError`] and aborts the whole parse;
//! no partial tree is produced.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, LexerOptions};
use crate::parser::lookup::Registry;
use crate::parser::token::{Token, TokenKind};
use std::sync::LazyLock;
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Parse error at {location}: no prefix handler for {kind} '{text}'")]
    MissingPrefix {
        kind: TokenKind,
        text: String,
        location: SourceLocation,
    },

    #[error("Parse error at {location}: no infix handler for {kind} '{text}'")]
    MissingInfix {
        kind: TokenKind,
        text: String,
        location: SourceLocation,
    },

    #[error("Parse error at {location}: expected {expected} {context}, found {found} '{text}'")]
    Expected {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        context: String,
        location: SourceLocation,
    },

    #[error("Parse error at {location}: invalid {kind} literal '{text}'")]
    InvalidNumber {
        kind: TokenKind,
        text: String,
        location: SourceLocation,
    },

    #[error("Parse error at {location}: nesting exceeds {limit} levels")]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

impl ParseError {
    /// Where the failure happened.
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::MissingPrefix { location, .. }
            | ParseError::MissingInfix { location, .. }
            | ParseError::Expected { location, .. }
            | ParseError::InvalidNumber { location, .. }
            | ParseError::NestingTooDeep { location, .. } => *location,
        }
    }
}

static STANDARD_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::standard);

/// Deepest statement/expression nesting accepted before parsing gives up.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Pratt parser for the C subset
pub struct Parser<'r> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
    registry: &'r Registry,
}

impl Parser<'static> {
    /// Tokenize `source` and build a parser over the standard registry.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::with_options(source, LexerOptions::default())
    }

    pub fn with_options(source: &str, options: LexerOptions) -> Result<Self, ParseError> {
        let tokens = Lexer::with_options(source, options).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Parse an already tokenized stream with the standard registry.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Parser::with_registry(tokens, &STANDARD_REGISTRY)
    }
}

impl<'r> Parser<'r> {
    /// Parse `tokens` with a caller-supplied registry.
    ///
    /// The stream is terminated with an end marker if it does not already
    /// end with one.
    pub fn with_registry(mut tokens: Vec<Token>, registry: &'r Registry) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens.last().map(Token::location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
            registry,
        }
    }

    /// Parse the entire program into a root block.
    pub fn parse_program(&mut self) -> Result<Stmt, ParseError> {
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(self.parse_statement()?);
        }

        Ok(Stmt::Block(body))
    }

    // ===== Helper methods =====

    pub(crate) fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Run `f` one nesting level deeper, failing once the limit is passed.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                location: self.current_location(),
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn peek_kind_ahead(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.position + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    /// Consume the current token. The end marker is never consumed.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let found = self.peek();
            Err(ParseError::Expected {
                expected: kind,
                found: found.kind,
                text: found.text.clone(),
                context: context.to_string(),
                location: found.location(),
            })
        }
    }

    pub(crate) fn expect_semicolon(&mut self, context: &str) -> Result<Token, ParseError> {
        self.expect(TokenKind::Semicolon, context)
    }

    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        self.expect(TokenKind::Identifier, context).map(|t| t.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_function() {
        let source = "int main() { return 0; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        let body = program.as_block().unwrap();
        assert_eq!(body.len(), 1);
        match &body[0] {
            Stmt::FunctionDecl(FunctionDecl {
                name,
                params,
                return_type,
                body,
            }) => {
                assert_eq!(name, "main");
                assert_eq!(params.len(), 0);
                assert_eq!(return_type.var_type, VarType::Int);
                assert_eq!(body, &vec![Stmt::Return(Some(Expr::Integer(0)))]);
            }
            _ => panic!("Expected function declaration"),
        }
    }

    #[test]
    fn test_empty_program() {
        let mut parser = Parser::new("  \n// nothing here\n").unwrap();
        assert_eq!(parser.parse_program().unwrap(), Stmt::Block(vec![]));
    }

    #[test]
    fn test_from_tokens_appends_end_marker() {
        let tokens = vec![Token::new(TokenKind::Identifier, "x", SourceLocation::new(1, 1))];
        let parser = Parser::from_tokens(tokens);
        assert_eq!(parser.tokens.len(), 2);
        assert_eq!(parser.tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_lex_errors_surface_as_parse_errors() {
        let err = Parser::new("int x = $;").err().unwrap();
        assert!(matches!(err, ParseError::Lex(LexError::NoMatch { offset: 8, .. })));
        assert_eq!(err.location(), SourceLocation::new(1, 9));
    }

    #[test]
    fn test_expected_error_message() {
        let mut parser = Parser::new("return 1").unwrap();
        let err = parser.parse_program().unwrap_err();

        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 9: expected SEMICOLON after return value, found EOF ''"
        );
    }

    #[test]
    fn test_nesting_limit_unwinds() {
        let source = format!("x = {}1;", "(".repeat(MAX_NESTING_DEPTH));
        let mut parser = Parser::new(&source).unwrap();

        assert!(matches!(
            parser.parse_statement(),
            Err(ParseError::NestingTooDeep { .. })
        ));
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_custom_registry() {
        // An empty registry knows no statements and no expressions.
        let registry = Registry::new();
        let tokens = Lexer::new("x;").tokenize().unwrap();
        let mut parser = Parser::with_registry(tokens, &registry);

        assert!(matches!(
            parser.parse_program(),
            Err(ParseError::MissingPrefix {
                kind: TokenKind::Identifier,
                ..
            })
        ));
    }
}
