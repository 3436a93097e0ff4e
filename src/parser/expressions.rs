//! Expression parsing implementation
//!
//! Pratt (precedence climbing) parsing driven by the parser's [`Registry`]:
//! the prefix handler of the current token produces the left operand, then
//! while the next token binds tighter than the caller's floor its infix
//! handler folds it into a larger expression.
//!
//! # Supported Expressions
//!
//! - Literals: integers (decimal, hex), unsigned integers, floats,
//!   characters, strings
//! - Identifiers
//! - Parenthesized expressions
//! - Binary operators: `* / %`, `+ -`, relational and equality, `&& ||`
//! - Assignment `=` and compound assignment (right-associative), comma
//!
//! [`Registry`]: crate::parser::lookup::Registry

use crate::parser::ast::Expr;
use crate::parser::lookup::BindingPower;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::{Token, TokenKind};
use log::trace;

impl Parser<'_> {
    /// Parse an expression whose operators all bind tighter than `min_bp`.
    pub fn parse_expression(&mut self, min_bp: BindingPower) -> Result<Expr, ParseError> {
        self.nested(|p| p.parse_expression_unguarded(min_bp))
    }

    fn parse_expression_unguarded(&mut self, min_bp: BindingPower) -> Result<Expr, ParseError> {
        let kind = self.current_kind();
        let Some(prefix) = self.registry().prefix_handler(kind) else {
            let token = self.peek();
            return Err(ParseError::MissingPrefix {
                kind,
                text: token.text.clone(),
                location: token.location(),
            });
        };

        let mut left = prefix(self)?;

        loop {
            let kind = self.current_kind();
            let bp = self.registry().binding_power(kind);
            if bp <= min_bp {
                break;
            }

            trace!("parse_expression: continuing with {} (bp {:?} > {:?})", kind, bp, min_bp);
            let Some(infix) = self.registry().infix_handler(kind) else {
                let token = self.peek();
                return Err(ParseError::MissingInfix {
                    kind,
                    text: token.text.clone(),
                    location: token.location(),
                });
            };
            left = infix(self, left, min_bp)?;
        }

        Ok(left)
    }
}

/// Literals and identifiers; consumes exactly one token.
pub(crate) fn parse_primary_expr(p: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let token = p.advance();

    match token.kind {
        TokenKind::Integer => parse_integer(&token).map(Expr::Integer),
        TokenKind::UnsignedInteger => parse_unsigned(&token).map(Expr::UnsignedInteger),
        TokenKind::Floating => parse_floating(&token).map(Expr::Floating),
        TokenKind::Character => Ok(Expr::Character(token.text)),
        TokenKind::String => Ok(Expr::String(token.text)),
        TokenKind::Identifier => Ok(Expr::Symbol(token.text)),
        kind => Err(ParseError::MissingPrefix {
            kind,
            location: token.location(),
            text: token.text,
        }),
    }
}

/// `( expr )`; the parentheses leave no node behind.
pub(crate) fn parse_grouping_expr(p: &mut Parser<'_>) -> Result<Expr, ParseError> {
    p.expect(TokenKind::LParen, "to open grouped expression")?;
    let inner = p.parse_expression(BindingPower::Default)?;
    p.expect(TokenKind::RParen, "to close grouped expression")?;
    Ok(inner)
}

/// Left-associative binary operator: the right operand is parsed at the
/// operator's own binding power.
pub(crate) fn parse_binary_expr(
    p: &mut Parser<'_>,
    left: Expr,
    _min_bp: BindingPower,
) -> Result<Expr, ParseError> {
    let operator = p.advance();
    let bp = p.registry().binding_power(operator.kind);
    let right = p.parse_expression(bp)?;

    Ok(Expr::binary(left, operator, right))
}

/// Right-associative assignment: `a = b = c` is `a = (b = c)`.
pub(crate) fn parse_assignment_expr(
    p: &mut Parser<'_>,
    left: Expr,
    _min_bp: BindingPower,
) -> Result<Expr, ParseError> {
    let operator = p.advance();
    let right = p.parse_expression(BindingPower::Comma)?;

    Ok(Expr::binary(left, operator, right))
}

fn invalid_number(token: &Token) -> ParseError {
    ParseError::InvalidNumber {
        kind: token.kind,
        text: token.text.clone(),
        location: token.location(),
    }
}

fn split_radix(digits: &str) -> (&str, u32) {
    match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (digits, 10),
    }
}

fn parse_integer(token: &Token) -> Result<i64, ParseError> {
    let (digits, radix) = split_radix(&token.text);
    i64::from_str_radix(digits, radix).map_err(|_| invalid_number(token))
}

fn parse_unsigned(token: &Token) -> Result<u64, ParseError> {
    let (digits, radix) = split_radix(token.text.trim_end_matches(['u', 'U']));
    u64::from_str_radix(digits, radix).map_err(|_| invalid_number(token))
}

fn parse_floating(token: &Token) -> Result<f64, ParseError> {
    token
        .text
        .trim_end_matches(['f', 'F'])
        .parse::<f64>()
        .map_err(|_| invalid_number(token))
}
