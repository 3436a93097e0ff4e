// AST (Abstract Syntax Tree) definitions for the C parser

use super::token::Token;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Base types, before qualifiers and pointer levels are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarType {
    Void,
    #[default]
    Int,
    Float,
    Double,
    Char,
    Short,
    Long,
}

/// Type representation with const/signed qualifiers and pointer depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Type {
    pub var_type: VarType,
    pub is_const: bool,
    pub is_signed: bool,
    pub pointer_level: usize, // 0 = not pointer, 1 = *, 2 = **, etc.
}

impl Default for Type {
    fn default() -> Self {
        Type::new(VarType::Int)
    }
}

impl Type {
    pub fn new(var_type: VarType) -> Self {
        Type {
            var_type,
            is_const: false,
            is_signed: true,
            pointer_level: 0,
        }
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn with_unsigned(mut self) -> Self {
        self.is_signed = false;
        self
    }

    pub fn with_pointer(mut self) -> Self {
        self.pointer_level += 1;
        self
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(i64),
    UnsignedInteger(u64),
    Floating(f64),
    /// Raw lexeme, quotes included: `'a'`, `'\n'`
    Character(String),
    /// Contents between the quotes, escapes left as written
    String(String),
    Symbol(String),
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

/// Variable declaration: `const unsigned int *p = expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub var_type: Type,
    pub assigned_expr: Option<Expr>, // None for `int x;`
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: Type,
}

/// Function declaration with its body
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    SingleLine,
    MultiLine,
}

/// `#include` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub text: String,   // whole directive as written
    pub target: String, // header name without delimiters
    pub system: bool,   // true for <...>, false for "..."
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(Vec<Stmt>),
    Expression(Expr),
    VarDecl(VarDecl),
    FunctionDecl(FunctionDecl),
    Return(Option<Expr>),
    Comment { text: String, kind: CommentKind },
    Include(Include),
}

impl Stmt {
    /// Statements of a block, or `None` for any other statement
    pub fn as_block(&self) -> Option<&[Stmt]> {
        match self {
            Stmt::Block(body) => Some(body),
            _ => None,
        }
    }
}
