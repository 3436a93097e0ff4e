//! Declaration parsing implementation
//!
//! This module handles variable and function declarations:
//!
//! - Declarator prefixes: qualifiers, base types and `*`, in any order
//! - Variable declarations: `const unsigned int *p = expr;` or `int x;`
//! - Function declarations: `type name(params) { body }`
//!
//! # Grammar
//!
//! ```text
//! declaration ::= declarator ( ";" | "=" expression ";" | function_rest )
//! declarator  ::= ( "const" | "signed" | "unsigned" | base_type | "*" )* identifier
//! function_rest ::= "(" params ")" "{" statement* "}"
//! params      ::= "" | "void" | declarator ( "," declarator )*
//! ```
//!
//! In a declarator prefix the last `signed`/`unsigned` and the last base
//! type win; an absent base type means `int`.

use crate::parser::ast::*;
use crate::parser::lookup::BindingPower;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;
use log::debug;

fn base_type(kind: TokenKind) -> Option<VarType> {
    match kind {
        TokenKind::Void => Some(VarType::Void),
        TokenKind::Int => Some(VarType::Int),
        TokenKind::Float => Some(VarType::Float),
        TokenKind::Double => Some(VarType::Double),
        TokenKind::Char => Some(VarType::Char),
        TokenKind::Short => Some(VarType::Short),
        TokenKind::Long => Some(VarType::Long),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parse a declarator prefix and the declared name.
    pub(crate) fn parse_declarator(&mut self) -> Result<(Type, String), ParseError> {
        let mut ty = Type::default();

        loop {
            match self.current_kind() {
                TokenKind::Const => ty.is_const = true,
                TokenKind::Signed => ty.is_signed = true,
                TokenKind::Unsigned => ty.is_signed = false,
                TokenKind::Star => ty.pointer_level += 1,
                kind => match base_type(kind) {
                    Some(var_type) => ty.var_type = var_type,
                    None => break,
                },
            }
            self.advance();
        }

        let name = self.expect_identifier("in declaration")?;
        Ok((ty, name))
    }

    /// Parse parameter list: (type name, type name, ...)
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        // Special case: (void) means no parameters in C
        if self.check(TokenKind::Void) && self.peek_kind_ahead(1) == TokenKind::RParen {
            self.advance();
            return Ok(params);
        }

        loop {
            let (param_type, name) = self.parse_declarator()?;
            params.push(Param { name, param_type });

            if !self.check(TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(params)
    }

    /// Parse the rest of a function once its return type and name are known.
    fn parse_function_declaration(
        &mut self,
        return_type: Type,
        name: String,
    ) -> Result<FunctionDecl, ParseError> {
        self.expect(TokenKind::LParen, "after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect(TokenKind::RParen, "after parameters")?;

        self.expect(TokenKind::LBrace, "before function body")?;
        let body = self.parse_block_statements()?;
        self.expect(TokenKind::RBrace, "after function body")?;

        Ok(FunctionDecl {
            name,
            params,
            return_type,
            body,
        })
    }
}

/// Statement handler for every kind that can open a declarator prefix.
///
/// After the name, `;` ends a bare declaration, `(` turns the statement into
/// a function declaration, and anything else must be `=` followed by the
/// initializer.
pub(crate) fn parse_declaration_stmt(p: &mut Parser<'_>) -> Result<Stmt, ParseError> {
    let (var_type, name) = p.parse_declarator()?;

    match p.current_kind() {
        TokenKind::Semicolon => {
            p.advance();
            debug!("parse_declaration_stmt: '{}' declared without initializer", name);
            Ok(Stmt::VarDecl(VarDecl {
                name,
                var_type,
                assigned_expr: None,
            }))
        }
        TokenKind::LParen => {
            debug!("parse_declaration_stmt: '{}' is a function", name);
            p.parse_function_declaration(var_type, name)
                .map(Stmt::FunctionDecl)
        }
        _ => {
            p.expect(TokenKind::Assign, "after declared name")?;
            let assigned_expr = p.parse_expression(BindingPower::Assignment)?;
            p.expect_semicolon("after variable declaration")?;

            Ok(Stmt::VarDecl(VarDecl {
                name,
                var_type,
                assigned_expr: Some(assigned_expr),
            }))
        }
    }
}
