//! Binding powers and the dispatch registry
//!
//! The [`Registry`] maps token kinds to the handlers the Pratt parser calls:
//!
//! - a *prefix* handler when the kind begins an expression,
//! - an *infix* handler when the kind continues an expression,
//! - a *statement* handler when the kind begins a statement,
//!
//! together with the [`BindingPower`] consulted by the expression loop.
//! Registration follows three fixed shapes:
//!
//! | helper     | binding power        | handler   |
//! |------------|----------------------|-----------|
//! | `prefix`   | [`BindingPower::Primary`] | prefix    |
//! | `infix`    | operator's own level | infix     |
//! | `statement`| [`BindingPower::Default`] | statement |
//!
//! A registry is plain data: build it once, then share it by reference with
//! every [`Parser`] that needs it.

use super::ast::{Expr, Stmt};
use super::parse::{ParseError, Parser};
use super::token::TokenKind;
use rustc_hash::FxHashMap;

/// Precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BindingPower {
    #[default]
    Default,
    Comma,
    Assignment,
    Logical,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser<'_>) -> Result<Stmt, ParseError>;
pub type PrefixHandler = fn(&mut Parser<'_>) -> Result<Expr, ParseError>;
pub type InfixHandler = fn(&mut Parser<'_>, Expr, BindingPower) -> Result<Expr, ParseError>;

/// Token kind → binding power and parse handlers.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    binding_powers: FxHashMap<TokenKind, BindingPower>,
    prefix: FxHashMap<TokenKind, PrefixHandler>,
    infix: FxHashMap<TokenKind, InfixHandler>,
    statements: FxHashMap<TokenKind, StmtHandler>,
}

impl Registry {
    /// An empty registry. Every expression fails with a missing-prefix error
    /// and every statement falls through to the expression path.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry for the supported C subset.
    pub fn standard() -> Self {
        use super::declarations::parse_declaration_stmt;
        use super::expressions::{
            parse_assignment_expr, parse_binary_expr, parse_grouping_expr, parse_primary_expr,
        };
        use super::statements::{
            parse_block_stmt, parse_comment_stmt, parse_include_stmt, parse_return_stmt,
        };

        let mut registry = Self::new();

        // Comma & assignment
        registry.infix(TokenKind::Comma, BindingPower::Comma, parse_binary_expr);
        for kind in [
            TokenKind::Assign,
            TokenKind::PlusAssign,
            TokenKind::MinusAssign,
            TokenKind::StarAssign,
            TokenKind::SlashAssign,
            TokenKind::PercentAssign,
        ] {
            registry.infix(kind, BindingPower::Assignment, parse_assignment_expr);
        }

        // Logical
        registry.infix(TokenKind::LogicalAnd, BindingPower::Logical, parse_binary_expr);
        registry.infix(TokenKind::LogicalOr, BindingPower::Logical, parse_binary_expr);

        // Relational
        for kind in [
            TokenKind::Equal,
            TokenKind::NotEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
        ] {
            registry.infix(kind, BindingPower::Relational, parse_binary_expr);
        }

        // Additive & multiplicative
        registry.infix(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
        registry.infix(TokenKind::Minus, BindingPower::Additive, parse_binary_expr);
        registry.infix(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
        registry.infix(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
        registry.infix(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

        // Literals & symbols
        for kind in [
            TokenKind::Integer,
            TokenKind::UnsignedInteger,
            TokenKind::Floating,
            TokenKind::Character,
            TokenKind::String,
            TokenKind::Identifier,
        ] {
            registry.prefix(kind, parse_primary_expr);
        }
        registry.prefix(TokenKind::LParen, parse_grouping_expr);

        // Statements
        registry.statement(TokenKind::LBrace, parse_block_stmt);
        registry.statement(TokenKind::SingleLineComment, parse_comment_stmt);
        registry.statement(TokenKind::MultiLineComment, parse_comment_stmt);
        registry.statement(TokenKind::IncludeDirective, parse_include_stmt);
        registry.statement(TokenKind::Return, parse_return_stmt);
        for kind in [
            TokenKind::Void,
            TokenKind::Char,
            TokenKind::Short,
            TokenKind::Int,
            TokenKind::Long,
            TokenKind::Float,
            TokenKind::Double,
            TokenKind::Signed,
            TokenKind::Unsigned,
            TokenKind::Const,
        ] {
            registry.statement(kind, parse_declaration_stmt);
        }

        registry
    }

    /// Register a kind that begins an expression.
    pub fn prefix(&mut self, kind: TokenKind, handler: PrefixHandler) -> &mut Self {
        self.binding_powers.insert(kind, BindingPower::Primary);
        self.prefix.insert(kind, handler);
        self
    }

    /// Register a kind that continues an expression at `bp`.
    pub fn infix(&mut self, kind: TokenKind, bp: BindingPower, handler: InfixHandler) -> &mut Self {
        self.binding_powers.insert(kind, bp);
        self.infix.insert(kind, handler);
        self
    }

    /// Register a kind that begins a statement.
    pub fn statement(&mut self, kind: TokenKind, handler: StmtHandler) -> &mut Self {
        self.binding_powers.insert(kind, BindingPower::Default);
        self.statements.insert(kind, handler);
        self
    }

    /// Binding power of `kind`; unregistered kinds bind at `Default`.
    pub fn binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_powers.get(&kind).copied().unwrap_or_default()
    }

    pub fn prefix_handler(&self, kind: TokenKind) -> Option<PrefixHandler> {
        self.prefix.get(&kind).copied()
    }

    pub fn infix_handler(&self, kind: TokenKind) -> Option<InfixHandler> {
        self.infix.get(&kind).copied()
    }

    pub fn statement_handler(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.statements.get(&kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_power_order() {
        assert!(BindingPower::Default < BindingPower::Comma);
        assert!(BindingPower::Assignment < BindingPower::Logical);
        assert!(BindingPower::Relational < BindingPower::Additive);
        assert!(BindingPower::Additive < BindingPower::Multiplicative);
        assert!(BindingPower::Member < BindingPower::Primary);
    }

    #[test]
    fn test_standard_registrations() {
        let registry = Registry::standard();

        assert_eq!(registry.binding_power(TokenKind::Plus), BindingPower::Additive);
        assert_eq!(registry.binding_power(TokenKind::Star), BindingPower::Multiplicative);
        assert_eq!(registry.binding_power(TokenKind::Integer), BindingPower::Primary);
        assert_eq!(registry.binding_power(TokenKind::Int), BindingPower::Default);
        assert_eq!(registry.binding_power(TokenKind::Semicolon), BindingPower::Default);

        assert!(registry.prefix_handler(TokenKind::Identifier).is_some());
        assert!(registry.prefix_handler(TokenKind::Plus).is_none());
        assert!(registry.infix_handler(TokenKind::Minus).is_some());
        assert!(registry.statement_handler(TokenKind::Return).is_some());
        assert!(registry.statement_handler(TokenKind::Identifier).is_none());
    }

    #[test]
    fn test_unregistered_kinds_bind_at_default() {
        let registry = Registry::new();
        assert_eq!(registry.binding_power(TokenKind::Plus), BindingPower::Default);
        assert!(registry.statement_handler(TokenKind::Int).is_none());
    }
}
