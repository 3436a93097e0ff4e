//! C source code parser
//!
//! This module transforms C source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token kinds, the token record and the keyword table
//! - [`lexer`]: Tokenization (source text → tokens) with ordered pattern rules
//! - [`lookup`]: Binding powers and the prefix/infix/statement registry
//! - [`parse`]: The [`parse::Parser`] and its error type
//! - [`ast`]: AST node definitions
//!
//! # Supported C Subset
//!
//! - Types: `void`, `char`, `short`, `int`, `long`, `float`, `double` with
//!   `const`, `signed`/`unsigned` and any number of `*`
//! - Statements: variable and function declarations, `return`, blocks,
//!   expression statements, `#include` directives, comments
//! - Expressions: literals, identifiers, parentheses, arithmetic,
//!   relational, logical, assignment and comma operators
//! - Keywords such as `struct`, `if` or `while` are recognised by the lexer
//!   but have no statement form yet
//!
//! # Parser Implementation
//!
//! Hand-written Pratt parser: each token kind carries a binding power and
//! optional prefix, infix and statement handlers in a [`lookup::Registry`].

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod lookup;
pub mod parse;
mod statements;
pub mod token;
