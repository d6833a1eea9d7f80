//! Evaluation errors.
//!
//! Every runtime failure aborts the run. Errors carry the span of the
//! innermost expression or statement that raised them, when known.

use mini_ir::Span;

use crate::Value;

/// What went wrong during evaluation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("undefined name `{name}`")]
    UndefinedName { name: String },

    #[error("`{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("`{name}` is a {type_name}, not a function")]
    NotCallable {
        name: String,
        type_name: &'static str,
    },

    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("cannot subscript a value of type {type_name}")]
    NotIndexable { type_name: &'static str },

    #[error("list index must be an integer, got {got}")]
    InvalidIndex { got: String },

    #[error("`{name}` returned no value")]
    NoResult { name: String },

    #[error("program has no `main` entry point")]
    MissingEntryPoint,

    #[error("`return` outside of a function")]
    ReturnOutsideFunction,

    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("unary `{op}` cannot be applied to {operand}")]
    UnaryTypeMismatch {
        op: &'static str,
        operand: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in `{op}`")]
    IntegerOverflow { op: &'static str },

    #[error("maximum call depth of {limit} exceeded")]
    RecursionLimit { limit: usize },

    #[error("failed to write output: {message}")]
    Output { message: String },
}

/// An evaluation failure with its source location.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

// Factory functions keep error construction uniform at the call sites.

pub fn undefined_name(name: &str) -> EvalError {
    EvalErrorKind::UndefinedName {
        name: name.to_string(),
    }
    .into()
}

pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    }
    .into()
}

pub fn not_callable(name: &str, value: &Value) -> EvalError {
    EvalErrorKind::NotCallable {
        name: name.to_string(),
        type_name: value.type_name(),
    }
    .into()
}

pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalErrorKind::IndexOutOfBounds { index, len }.into()
}

pub fn not_indexable(value: &Value) -> EvalError {
    EvalErrorKind::NotIndexable {
        type_name: value.type_name(),
    }
    .into()
}

pub fn invalid_index(index: &Value) -> EvalError {
    EvalErrorKind::InvalidIndex {
        got: index.to_string(),
    }
    .into()
}

pub fn no_result(name: &str) -> EvalError {
    EvalErrorKind::NoResult {
        name: name.to_string(),
    }
    .into()
}

pub fn type_mismatch(op: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalErrorKind::TypeMismatch {
        op,
        left: left.type_name(),
        right: right.type_name(),
    }
    .into()
}

pub fn unary_type_mismatch(op: &'static str, operand: &Value) -> EvalError {
    EvalErrorKind::UnaryTypeMismatch {
        op,
        operand: operand.type_name(),
    }
    .into()
}

pub fn integer_overflow(op: &'static str) -> EvalError {
    EvalErrorKind::IntegerOverflow { op }.into()
}

pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalErrorKind::RecursionLimit { limit }.into()
}
