//! Statement parsing implementation
//!
//! This module handles statement dispatch and the simple statement forms:
//!
//! - Compound statements: `{ ... }`
//! - Jump statements: `return`
//! - Comments (when the lexer keeps them) and `#include` directives
//! - Expression statements: anything else, terminated by `;`
//!
//! Declarations live in `declarations`.
//!
//! # Grammar
//!
//! ```text
//! statement ::= block | return_stmt | comment | include
//!             | declaration | expr_stmt
//! block     ::= "{" statement* "}"
//! return_stmt ::= "return" expression? ";"
//! expr_stmt ::= expression ";"
//! ```

use crate::parser::ast::*;
use crate::parser::lookup::BindingPower;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;
use log::debug;

impl Parser<'_> {
    /// Parse a statement
    ///
    /// Kinds with a registered statement handler are dispatched to it;
    /// everything else is an expression statement.
    pub fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        self.nested(Self::parse_statement_unguarded)
    }

    fn parse_statement_unguarded(&mut self) -> Result<Stmt, ParseError> {
        let kind = self.current_kind();

        if let Some(handler) = self.registry().statement_handler(kind) {
            debug!("parse_statement: {} at {}", kind, self.current_location());
            return handler(self);
        }

        let expr = self.parse_expression(BindingPower::Default)?;
        self.expect_semicolon("after expression")?;
        Ok(Stmt::Expression(expr))
    }

    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }
}

pub(crate) fn parse_block_stmt(p: &mut Parser<'_>) -> Result<Stmt, ParseError> {
    p.expect(TokenKind::LBrace, "to open block")?;
    let statements = p.parse_block_statements()?;
    p.expect(TokenKind::RBrace, "to close block")?;

    Ok(Stmt::Block(statements))
}

pub(crate) fn parse_return_stmt(p: &mut Parser<'_>) -> Result<Stmt, ParseError> {
    p.expect(TokenKind::Return, "to begin return statement")?;

    let expr = if p.check(TokenKind::Semicolon) {
        None
    } else {
        Some(p.parse_expression(BindingPower::Default)?)
    };
    p.expect_semicolon("after return value")?;

    Ok(Stmt::Return(expr))
}

pub(crate) fn parse_comment_stmt(p: &mut Parser<'_>) -> Result<Stmt, ParseError> {
    let token = p.advance();
    let kind = if token.kind == TokenKind::MultiLineComment {
        CommentKind::MultiLine
    } else {
        CommentKind::SingleLine
    };

    Ok(Stmt::Comment {
        text: token.text,
        kind,
    })
}

pub(crate) fn parse_include_stmt(p: &mut Parser<'_>) -> Result<Stmt, ParseError> {
    let token = p.expect(TokenKind::IncludeDirective, "to begin include")?;

    // "#include <stdio.h>" / "#include \"local.h\""
    let header = token.text.trim_start_matches("#include").trim();
    let system = header.starts_with('<');
    let target = header
        .get(1..header.len().saturating_sub(1))
        .unwrap_or_default()
        .to_string();

    Ok(Stmt::Include(Include {
        text: token.text,
        target,
        system,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::LexerOptions;

    fn statements(source: &str) -> Vec<Stmt> {
        let mut parser = Parser::new(source).unwrap();
        match parser.parse_program().unwrap() {
            Stmt::Block(body) => body,
            other => panic!("Expected root block, got {:?}", other),
        }
    }

    #[test]
    fn test_expression_statement() {
        let body = statements("x = 1;");
        assert_eq!(body.len(), 1);
        assert!(matches!(&body[0], Stmt::Expression(Expr::Binary { .. })));
    }

    #[test]
    fn test_nested_blocks() {
        let body = statements("{ a; { b; } }");
        assert_eq!(
            body,
            vec![Stmt::Block(vec![
                Stmt::Expression(Expr::Symbol("a".to_string())),
                Stmt::Block(vec![Stmt::Expression(Expr::Symbol("b".to_string()))]),
            ])]
        );
    }

    #[test]
    fn test_return_forms() {
        let body = statements("return x; return;");
        assert_eq!(body[0], Stmt::Return(Some(Expr::Symbol("x".to_string()))));
        assert_eq!(body[1], Stmt::Return(None));
    }

    #[test]
    fn test_include_statements() {
        let body = statements("#include <stdio.h>\n#include \"util.h\"\n");
        assert_eq!(
            body[0],
            Stmt::Include(Include {
                text: "#include <stdio.h>".to_string(),
                target: "stdio.h".to_string(),
                system: true,
            })
        );
        match &body[1] {
            Stmt::Include(include) => {
                assert_eq!(include.target, "util.h");
                assert!(!include.system);
            }
            other => panic!("Expected include, got {:?}", other),
        }
    }

    #[test]
    fn test_comment_statements() {
        let options = LexerOptions { keep_comments: true };
        let mut parser = Parser::with_options("// hello\n/* a\nb */\nx;", options).unwrap();
        let program = parser.parse_program().unwrap();
        let body = program.as_block().unwrap();

        assert_eq!(
            body[0],
            Stmt::Comment {
                text: "// hello".to_string(),
                kind: CommentKind::SingleLine,
            }
        );
        assert_eq!(
            body[1],
            Stmt::Comment {
                text: "/* a\nb */".to_string(),
                kind: CommentKind::MultiLine,
            }
        );
        assert_eq!(body.len(), 3);
    }

    #[test]
    fn test_missing_semicolon() {
        let mut parser = Parser::new("x = 1 y = 2;").unwrap();
        let err = parser.parse_program().unwrap_err();
        // `y` binds at Primary, so the expression loop reports it first.
        assert!(matches!(err, ParseError::MissingInfix { .. }));

        let mut parser = Parser::new("x = 1").unwrap();
        assert!(matches!(
            parser.parse_program(),
            Err(ParseError::Expected {
                expected: TokenKind::Semicolon,
                found: TokenKind::Eof,
                ..
            })
        ));
    }

    #[test]
    fn test_unclosed_block() {
        let mut parser = Parser::new("{ x;").unwrap();
        assert!(matches!(
            parser.parse_program(),
            Err(ParseError::Expected {
                expected: TokenKind::RBrace,
                found: TokenKind::Eof,
                ..
            })
        ));
    }

    #[test]
    fn test_stray_closing_brace() {
        let mut parser = Parser::new("x; }").unwrap();
        assert!(matches!(
            parser.parse_program(),
            Err(ParseError::MissingPrefix {
                kind: TokenKind::RBrace,
                ..
            })
        ));
    }
}
