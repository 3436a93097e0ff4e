//! Lexer (tokenizer) for C source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//!
//! The lexer is driven by an ordered table of anchored regular expressions.
//! At each cursor position the rules are tried in registration order and the
//! first one matching *at the cursor* wins; its action emits zero or one token
//! and the cursor advances past exactly the matched text. Rule order encodes
//! priority:
//!
//! 1. whitespace and both comment forms (skipped unless
//!    [`LexerOptions::keep_comments`] is set)
//! 2. literals: floating, unsigned integer, integer, string, character,
//!    `#include` directive
//! 3. identifiers and keywords
//! 4. punctuation, then operators longest-first so that `<<=` is never
//!    split into `<<` `=` or `<` `<=`
//!
//! A position where no rule matches is a fatal [`LexError`]; there is no
//! recovery.

use super::ast::SourceLocation;
use super::token::{keyword, Token, TokenKind};
use log::trace;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// How much of the unconsumed input a `NoMatch` message shows.
const SNIPPET_CHARS: usize = 24;

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// `remainder` is everything from the failing offset to the end of the
    /// input; the message shows only the start of its first line.
    #[error(
        "Lexer error at line {line}, column {column} (offset {offset}): unrecognized input near '{}'",
        snippet(.remainder)
    )]
    NoMatch {
        offset: usize,
        line: usize,
        column: usize,
        remainder: String,
    },

    #[error("Lexer error at line {line}, column {column} (offset {offset}): unterminated {what}")]
    Unterminated {
        what: &'static str,
        offset: usize,
        line: usize,
        column: usize,
    },
}

fn snippet(remainder: &str) -> String {
    remainder
        .lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(SNIPPET_CHARS)
        .collect()
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::NoMatch { line, column, .. }
            | LexError::Unterminated { line, column, .. } => SourceLocation::new(*line, *column),
        }
    }
}

/// Lexer configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Emit comment tokens instead of skipping them.
    pub keep_comments: bool,
}

/// What a rule does with its match.
#[derive(Debug, Clone, Copy)]
enum Action {
    Skip,
    Comment(TokenKind),
    /// Emit the whole match as a token of this kind.
    Emit(TokenKind),
    /// Emit the text between the quotes.
    StringLiteral,
    /// Identifier, reclassified through the keyword table.
    Symbol,
    /// An opening delimiter whose closing half never appears.
    Unterminated(&'static str),
}

struct Rule {
    pattern: Regex,
    action: Action,
}

impl Rule {
    /// Anchor `pattern` at the cursor. Every pattern is a literal in this
    /// file, so a compile failure is a bug in the table itself.
    fn new(pattern: &str, action: Action) -> Self {
        let pattern = Regex::new(&format!(r"\A(?:{pattern})"))
            .unwrap_or_else(|e| panic!("invalid lexer rule '{pattern}': {e}"));
        Self { pattern, action }
    }

    fn fixed(lexeme: &str, kind: TokenKind) -> Self {
        Self::new(&regex::escape(lexeme), Action::Emit(kind))
    }
}

/// Lexeme table, longest operators first within each group.
const PUNCTUATION: &[(&str, TokenKind)] = &[
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (",", TokenKind::Comma),
    (";", TokenKind::Semicolon),
    (":", TokenKind::Colon),
    (".", TokenKind::Dot),
    ("?", TokenKind::Question),
    ("#", TokenKind::Pound),
];

const OPERATORS: &[(&str, TokenKind)] = &[
    ("<<=", TokenKind::ShiftLeftAssign),
    (">>=", TokenKind::ShiftRightAssign),
    ("==", TokenKind::Equal),
    ("!=", TokenKind::NotEqual),
    ("<=", TokenKind::LessEqual),
    (">=", TokenKind::GreaterEqual),
    ("+=", TokenKind::PlusAssign),
    ("-=", TokenKind::MinusAssign),
    ("*=", TokenKind::StarAssign),
    ("/=", TokenKind::SlashAssign),
    ("%=", TokenKind::PercentAssign),
    ("&=", TokenKind::AmpersandAssign),
    ("|=", TokenKind::PipeAssign),
    ("^=", TokenKind::CaretAssign),
    ("->", TokenKind::Arrow),
    ("++", TokenKind::Increment),
    ("--", TokenKind::Decrement),
    ("<<", TokenKind::ShiftLeft),
    (">>", TokenKind::ShiftRight),
    ("&&", TokenKind::LogicalAnd),
    ("||", TokenKind::LogicalOr),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("&", TokenKind::Ampersand),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::Caret),
    ("~", TokenKind::Tilde),
    ("!", TokenKind::LogicalNot),
    ("=", TokenKind::Assign),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
];

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(build_rules);

fn build_rules() -> Vec<Rule> {
    let mut rules = vec![
        Rule::new(r"\s+", Action::Skip),
        Rule::new(r"//[^\n]*", Action::Comment(TokenKind::SingleLineComment)),
        Rule::new(r"(?s:/\*.*?\*/)", Action::Comment(TokenKind::MultiLineComment)),
        Rule::new(r"/\*", Action::Unterminated("block comment")),
        Rule::new(
            r"[0-9]+\.[0-9]+(?:[eE][+-]?[0-9]+)?[fF]?|[0-9]+[eE][+-]?[0-9]+[fF]?",
            Action::Emit(TokenKind::Floating),
        ),
        Rule::new(
            r"(?:0[xX][0-9a-fA-F]+|[0-9]+)[uU]",
            Action::Emit(TokenKind::UnsignedInteger),
        ),
        Rule::new(r"0[xX][0-9a-fA-F]+|[0-9]+", Action::Emit(TokenKind::Integer)),
        Rule::new(r#""((?:[^"\\\n]|\\.)*)""#, Action::StringLiteral),
        Rule::new(r#"""#, Action::Unterminated("string literal")),
        Rule::new(
            r"'(?:\\x[0-9a-fA-F]+|\\[0-7]{1,3}|\\[^\n]|[^\\'\n])'",
            Action::Emit(TokenKind::Character),
        ),
        Rule::new(
            r#"#include[ \t]*(?:<[^>\n]*>|"[^"\n]*")"#,
            Action::Emit(TokenKind::IncludeDirective),
        ),
        Rule::new(r"[A-Za-z_][A-Za-z0-9_]*", Action::Symbol),
    ];

    for (lexeme, kind) in PUNCTUATION.iter().chain(OPERATORS) {
        rules.push(Rule::fixed(lexeme, *kind));
    }

    rules
}

/// Lexer for C source code
pub struct Lexer<'a> {
    source: &'a str,
    options: LexerOptions,
    position: usize, // byte offset
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, LexerOptions::default())
    }

    pub fn with_options(source: &'a str, options: LexerOptions) -> Self {
        Self {
            source,
            options,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The result always ends with a single
    /// [`TokenKind::Eof`] token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            if let Some(token) = self.next_token()? {
                trace!("lexed {} at {}", token, token.location());
                tokens.push(token);
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));
        Ok(tokens)
    }

    /// Apply the first rule matching at the cursor.
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        let location = self.current_location();
        let source = self.source;
        let remainder = &source[self.position..];

        let Some((action, captures)) = RULES.iter().find_map(|rule| {
            rule.pattern
                .captures(remainder)
                .map(|captures| (rule.action, captures))
        }) else {
            return Err(self.no_match());
        };

        let lexeme = captures.get(0).map_or("", |m| m.as_str());
        let token = match action {
            Action::Skip => None,
            Action::Comment(kind) => self
                .options
                .keep_comments
                .then(|| Token::new(kind, lexeme, location)),
            Action::Emit(kind) => Some(Token::new(kind, lexeme, location)),
            Action::StringLiteral => {
                let contents = captures.get(1).map_or("", |m| m.as_str());
                Some(Token::new(TokenKind::String, contents, location))
            }
            Action::Symbol => {
                let kind = keyword(lexeme).unwrap_or(TokenKind::Identifier);
                Some(Token::new(kind, lexeme, location))
            }
            Action::Unterminated(what) => {
                return Err(LexError::Unterminated {
                    what,
                    offset: self.position,
                    line: location.line,
                    column: location.column,
                });
            }
        };

        let consumed = lexeme.len();
        self.advance(consumed);
        Ok(token)
    }

    fn no_match(&self) -> LexError {
        LexError::NoMatch {
            offset: self.position,
            line: self.line,
            column: self.column,
            remainder: self.source[self.position..].to_string(),
        }
    }

    /// Advance the cursor by `len` bytes, keeping line and column in step.
    fn advance(&mut self, len: usize) {
        let end = self.position + len;
        for ch in self.source[self.position..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position = end;
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
