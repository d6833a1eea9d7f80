//! Mini Lexer - turns source text into tokens.
//!
//! The raw scanner is generated by `logos`; this crate then "cooks" the raw
//! tokens: identifiers are interned, numeric literals are parsed, and every
//! token is tagged with its span and line.
//!
//! Whitespace and `#` comments are skipped. Newlines only advance the line
//! counter.

mod token;

use logos::Logos;
use mini_ir::{Span, StringInterner};

pub use token::{Token, TokenKind};

/// Scanner failure. Scanning stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("illegal character {ch:?} on line {line}")]
    UnexpectedCharacter { ch: char, line: u32, span: Span },
    #[error("invalid number literal `{text}` on line {line}")]
    InvalidNumber { text: String, line: u32, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. } | LexError::InvalidNumber { span, .. } => {
                *span
            }
        }
    }
}

/// Raw token from logos (before interning). `extras` counts newlines seen.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(extras = u32)]
#[logos(skip r"([ \t\r\f]+|#[^\n]*)")]
enum RawToken {
    #[token("\n", count_newline)]
    Newline,

    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]+")]
    Real,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[token("func")]
    Func,
    #[token("while")]
    While,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("or")]
    Or,
    #[token("and")]
    And,

    #[token("==")]
    EqEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("=")]
    Assign,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
}

fn count_newline(lex: &mut logos::Lexer<RawToken>) -> logos::Skip {
    lex.extras += 1;
    logos::Skip
}

/// Lex `source` into tokens, always terminated by a single `Eof`.
pub fn lex(source: &str, interner: &StringInterner) -> Result<Vec<Token>, LexError> {
    let mut raw = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = raw.next() {
        let span = Span::from_range(raw.span());
        let line = raw.extras + 1;
        let slice = raw.slice();

        let Ok(kind) = result else {
            let ch = slice.chars().next().unwrap_or('\0');
            return Err(LexError::UnexpectedCharacter { ch, line, span });
        };

        let kind = match kind {
            RawToken::Int => match slice.parse::<i64>() {
                Ok(n) => TokenKind::Int(n),
                Err(_) => return Err(invalid_number(slice, line, span)),
            },
            RawToken::Real => match slice.parse::<f64>() {
                Ok(r) => TokenKind::Real(r),
                Err(_) => return Err(invalid_number(slice, line, span)),
            },
            RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
            RawToken::Func => TokenKind::Func,
            RawToken::While => TokenKind::While,
            RawToken::Return => TokenKind::Return,
            RawToken::If => TokenKind::If,
            RawToken::Else => TokenKind::Else,
            RawToken::Or => TokenKind::Or,
            RawToken::And => TokenKind::And,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Assign => TokenKind::Assign,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            // Skipped by its callback; never produced.
            RawToken::Newline => continue,
        };
        tokens.push(Token::new(kind, span, line));
    }

    let end = Span::from_range(source.len()..source.len());
    tokens.push(Token::new(TokenKind::Eof, end, raw.extras + 1));
    Ok(tokens)
}

fn invalid_number(text: &str, line: u32, span: Span) -> LexError {
    LexError::InvalidNumber {
        text: text.to_owned(),
        line,
        span,
    }
}
