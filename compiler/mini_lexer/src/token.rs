//! Cooked tokens handed to the parser.

use mini_ir::{Name, Span};
use std::fmt;

/// A token with its source location.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based source line.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, line: u32) -> Self {
        Token { kind, span, line }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Real(f64),
    Ident(Name),

    // Keywords
    Func,
    While,
    Return,
    If,
    Else,
    Or,
    And,

    // Operators
    EqEq,
    LtEq,
    GtEq,
    Assign,
    Lt,
    Gt,
    Plus,
    Minus,
    Star,
    Slash,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,

    Eof,
}

impl TokenKind {
    /// Human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(n) => format!("number `{n}`"),
            TokenKind::Real(r) => format!("number `{r:?}`"),
            TokenKind::Ident(_) => "identifier".to_owned(),
            TokenKind::Eof => "end of file".to_owned(),
            other => format!("`{}`", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            TokenKind::Func => "func",
            TokenKind::While => "while",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Or => "or",
            TokenKind::And => "and",
            TokenKind::EqEq => "==",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Assign => "=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Int(_) | TokenKind::Real(_) | TokenKind::Ident(_) | TokenKind::Eof => "",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
