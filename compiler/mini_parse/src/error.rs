//! Parse errors.

use mini_ir::Span;
use mini_lexer::LexError;

/// Parser failure. Parsing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} on line {line}")]
    Unexpected {
        expected: &'static str,
        found: String,
        line: u32,
        span: Span,
    },

    #[error("program must end with a `func main` definition")]
    MissingMain,

    #[error("final function in program must be `main`, found `{found}`")]
    EntryNotMain { found: String, span: Span },
}

impl ParseError {
    /// Source location of the error, when there is one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Lex(err) => Some(err.span()),
            ParseError::Unexpected { span, .. } | ParseError::EntryNotMain { span, .. } => {
                Some(*span)
            }
            ParseError::MissingMain => None,
        }
    }
}
