//! Token model
//!
//! Defines the closed set of lexical categories ([`TokenKind`]), the token
//! record produced by the lexer ([`Token`]) and the reserved-word table used
//! to reclassify identifiers as keywords.
//!
//! Every kind has a fixed upper-case name (see [`TokenKind::name`]) used in
//! diagnostics, token dumps and tests. These names are stable.

use super::ast::SourceLocation;
use std::fmt;

/// All lexical categories recognised by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,

    // Comments (only emitted when `LexerOptions::keep_comments` is set)
    SingleLineComment, // // ...
    MultiLineComment,  // /* ... */

    Identifier,

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Semicolon, // ;
    Colon,     // :
    Dot,       // .
    Question,  // ?
    Pound,     // #

    // Literals
    Integer,          // 42, 0x2A
    UnsignedInteger,  // 42u
    Floating,         // 3.14
    Character,        // 'a'
    String,           // "..."
    IncludeDirective, // #include <...> | #include "..."

    // Arithmetic / bitwise
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Percent,   // %
    Ampersand, // &
    Pipe,      // |
    Caret,     // ^
    Tilde,     // ~
    Increment, // ++
    Decrement, // --

    // Comparison
    Equal,        // ==
    NotEqual,     // !=
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=

    // Assignment
    Assign,           // =
    PlusAssign,       // +=
    MinusAssign,      // -=
    StarAssign,       // *=
    SlashAssign,      // /=
    PercentAssign,    // %=
    AmpersandAssign,  // &=
    PipeAssign,       // |=
    CaretAssign,      // ^=
    ShiftLeftAssign,  // <<=
    ShiftRightAssign, // >>=
    Arrow,            // ->

    // Shift
    ShiftLeft,  // <<
    ShiftRight, // >>

    // Logical
    LogicalAnd, // &&
    LogicalOr,  // ||
    LogicalNot, // !

    // Type keywords
    Void,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Signed,
    Unsigned,

    Sizeof,

    // Data classes
    Typedef,
    Struct,
    Enum,
    Union,

    // Control flow
    If,
    Else,
    For,
    While,
    Do,
    Switch,
    Case,
    Default,
    Break,
    Continue,
    Return,
    Goto,

    // Storage classes
    Extern,
    Static,
    Register,
    Auto,
    Const,
    Volatile,
}

impl TokenKind {
    /// Stable diagnostic name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::SingleLineComment => "SINGLE_LINE_COMMENT",
            TokenKind::MultiLineComment => "MULTI_LINE_COMMENT",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Dot => "DOT",
            TokenKind::Question => "QUESTION",
            TokenKind::Pound => "POUND",
            TokenKind::Integer => "INTEGER",
            TokenKind::UnsignedInteger => "UNSIGNED_INTEGER",
            TokenKind::Floating => "FLOATING",
            TokenKind::Character => "CHARACTER",
            TokenKind::String => "STRING",
            TokenKind::IncludeDirective => "INCLUDE_DIRECTIVE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Percent => "PERCENT",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::Pipe => "PIPE",
            TokenKind::Caret => "CARET",
            TokenKind::Tilde => "TILDE",
            TokenKind::Increment => "INCREMENT",
            TokenKind::Decrement => "DECREMENT",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Assign => "ASSIGN",
            TokenKind::PlusAssign => "PLUS_ASSIGN",
            TokenKind::MinusAssign => "MINUS_ASSIGN",
            TokenKind::StarAssign => "STAR_ASSIGN",
            TokenKind::SlashAssign => "SLASH_ASSIGN",
            TokenKind::PercentAssign => "PERCENT_ASSIGN",
            TokenKind::AmpersandAssign => "AMPERSAND_ASSIGN",
            TokenKind::PipeAssign => "PIPE_ASSIGN",
            TokenKind::CaretAssign => "CARET_ASSIGN",
            TokenKind::ShiftLeftAssign => "SHIFT_LEFT_ASSIGN",
            TokenKind::ShiftRightAssign => "SHIFT_RIGHT_ASSIGN",
            TokenKind::Arrow => "ARROW",
            TokenKind::ShiftLeft => "SHIFT_LEFT",
            TokenKind::ShiftRight => "SHIFT_RIGHT",
            TokenKind::LogicalAnd => "LOGICAL_AND",
            TokenKind::LogicalOr => "LOGICAL_OR",
            TokenKind::LogicalNot => "LOGICAL_NOT",
            TokenKind::Void => "VOID",
            TokenKind::Char => "CHAR",
            TokenKind::Short => "SHORT",
            TokenKind::Int => "INT",
            TokenKind::Long => "LONG",
            TokenKind::Float => "FLOAT",
            TokenKind::Double => "DOUBLE",
            TokenKind::Signed => "SIGNED",
            TokenKind::Unsigned => "UNSIGNED",
            TokenKind::Sizeof => "SIZEOF",
            TokenKind::Typedef => "TYPEDEF",
            TokenKind::Struct => "STRUCT",
            TokenKind::Enum => "ENUM",
            TokenKind::Union => "UNION",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::While => "WHILE",
            TokenKind::Do => "DO",
            TokenKind::Switch => "SWITCH",
            TokenKind::Case => "CASE",
            TokenKind::Default => "DEFAULT",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Return => "RETURN",
            TokenKind::Goto => "GOTO",
            TokenKind::Extern => "EXTERN",
            TokenKind::Static => "STATIC",
            TokenKind::Register => "REGISTER",
            TokenKind::Auto => "AUTO",
            TokenKind::Const => "CONST",
            TokenKind::Volatile => "VOLATILE",
        }
    }

    /// Kinds whose literal text is meaningful in a token dump.
    pub fn carries_text(self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::UnsignedInteger
                | TokenKind::Floating
                | TokenKind::Character
                | TokenKind::String
                | TokenKind::Identifier
                | TokenKind::IncludeDirective
                | TokenKind::SingleLineComment
                | TokenKind::MultiLineComment
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a reserved word to its keyword kind.
///
/// Returns `None` for anything that is not in the fixed keyword table, in
/// which case the lexeme is an ordinary identifier.
pub fn keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "void" => TokenKind::Void,
        "char" => TokenKind::Char,
        "short" => TokenKind::Short,
        "int" => TokenKind::Int,
        "long" => TokenKind::Long,
        "float" => TokenKind::Float,
        "double" => TokenKind::Double,
        "signed" => TokenKind::Signed,
        "unsigned" => TokenKind::Unsigned,

        "sizeof" => TokenKind::Sizeof,

        "typedef" => TokenKind::Typedef,
        "struct" => TokenKind::Struct,
        "enum" => TokenKind::Enum,
        "union" => TokenKind::Union,

        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "for" => TokenKind::For,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "switch" => TokenKind::Switch,
        "case" => TokenKind::Case,
        "default" => TokenKind::Default,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "return" => TokenKind::Return,
        "goto" => TokenKind::Goto,

        "extern" => TokenKind::Extern,
        "static" => TokenKind::Static,
        "register" => TokenKind::Register,
        "auto" => TokenKind::Auto,
        "const" => TokenKind::Const,
        "volatile" => TokenKind::Volatile,
        _ => return None,
    };
    Some(kind)
}

/// A single lexeme with its category and position.
///
/// `text` is the matched lexeme, except for string literals where the
/// enclosing quotes are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            line: location.line,
            column: location.column,
        }
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// One line of a token dump: `"  3: INTEGER (42)"` or `"  4: SEMICOLON ()"`.
    pub fn debug_line(&self, index: usize) -> String {
        if self.kind.carries_text() {
            format!("{:3}: {} ({})", index, self.kind, self.text)
        } else {
            format!("{:3}: {} ()", index, self.kind)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::String => write!(f, "{} \"{}\"", self.kind, self.text),
            _ => write!(f, "{} '{}'", self.kind, self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table() {
        assert_eq!(keyword("int"), Some(TokenKind::Int));
        assert_eq!(keyword("unsigned"), Some(TokenKind::Unsigned));
        assert_eq!(keyword("volatile"), Some(TokenKind::Volatile));
        assert_eq!(keyword("goto"), Some(TokenKind::Goto));
        assert_eq!(keyword("include"), None);
        assert_eq!(keyword("Int"), None);
        assert_eq!(keyword("main"), None);
    }

    #[test]
    fn test_debug_line() {
        let loc = SourceLocation::new(1, 1);
        let int = Token::new(TokenKind::Integer, "42", loc);
        let semi = Token::new(TokenKind::Semicolon, ";", loc);

        assert_eq!(int.debug_line(3), "  3: INTEGER (42)");
        assert_eq!(semi.debug_line(12), " 12: SEMICOLON ()");
    }

    #[test]
    fn test_kind_names_are_upper_snake_case() {
        for kind in [
            TokenKind::Eof,
            TokenKind::ShiftRightAssign,
            TokenKind::IncludeDirective,
            TokenKind::LogicalNot,
        ] {
            let name = kind.name();
            assert!(name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
            assert_eq!(kind.to_string(), name);
        }
    }
}
