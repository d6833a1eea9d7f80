//! Mini Eval - tree-walking evaluator for the mini language.
//!
//! # Architecture
//!
//! - `value` - runtime values; lists are shared, mutable references
//! - `environment` - the global table and per-call local tables
//! - `operators` - the builtin operator functions
//! - `interpreter` - statement and expression evaluation, calls
//! - `print_handler` - where `print` output goes
//!
//! Builtin operators live in the same global table as user globals, keyed
//! by their symbols, and binary expressions resolve their operator through
//! that table.
//!
//! # Usage
//!
//! ```ignore
//! let interner = SharedInterner::new();
//! let program = mini_parse::parse_source(source, &interner)?;
//! let mut interpreter = InterpreterBuilder::new(interner).build();
//! let result = interpreter.run_program(&program)?;
//! ```

mod environment;
mod errors;
mod interpreter;
mod operators;
mod print_handler;
mod stack;
mod value;

pub use environment::{Environment, LocalScope, Table};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Flow, Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use value::{Builtin, FunctionValue, ListValue, Number, Value};

#[cfg(test)]
mod tests;
