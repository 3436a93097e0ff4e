//! # Introduction
//!
//! cparse turns source text written in a small C subset into a token
//! stream and then into an abstract syntax tree, for later stages such as
//! type checking or code generation to consume.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser (statements → Pratt expressions) → AST
//! ```
//!
//! 1. [`parser::lexer`]: ordered, anchored pattern rules produce
//!    [`parser::token::Token`]s ending in a single end marker.
//! 2. [`parser::lookup`]: the registry mapping each token kind to a binding
//!    power and its prefix, infix or statement handler.
//! 3. [`parser::parse`]: the [`Parser`], which yields a root
//!    [`Stmt::Block`].
//!
//! The first error aborts the whole scan or parse and is returned as a
//! [`ParseError`]; no partial tree is produced.
//!
//! ```
//! use cparse::{parse_source, Stmt};
//!
//! let program = parse_source("int answer = 6 * 7;").unwrap();
//! assert!(matches!(&program.as_block().unwrap()[0], Stmt::VarDecl(_)));
//! ```

pub mod parser;

pub use parser::ast::{Expr, Stmt};
pub use parser::lexer::{LexError, Lexer, LexerOptions};
pub use parser::parse::{ParseError, Parser};
pub use parser::token::{Token, TokenKind};

/// Tokenize `source` with default options.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Tokenize and parse `source` into a root block with the standard grammar.
pub fn parse_source(source: &str) -> Result<Stmt, ParseError> {
    Parser::new(source)?.parse_program()
}
