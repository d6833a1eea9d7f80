//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use mini_ir::{BinaryOp, SharedInterner};

use super::{Interpreter, OpNames};
use crate::environment::{LocalScope, Table};
use crate::stack::CallDepth;
use crate::{stdout_handler, Builtin, SharedPrintHandler, Value};

/// Builder for creating Interpreter instances.
///
/// Defaults: output goes to stdout and call depth is bounded only by
/// available memory.
pub struct InterpreterBuilder {
    interner: SharedInterner,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new(interner: SharedInterner) -> Self {
        InterpreterBuilder {
            interner,
            print_handler: None,
            max_call_depth: None,
        }
    }

    /// Set where `print` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Fail with a recursion error once this many user calls are active.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Build the interpreter with a freshly seeded global table.
    pub fn build(self) -> Interpreter {
        let globals = LocalScope::new(seed_builtins(&self.interner));
        let op_names = BinaryOp::ALL
            .into_iter()
            .map(|op| (op, self.interner.intern(op.as_symbol())))
            .collect::<OpNames>();
        Interpreter {
            main: self.interner.intern("main"),
            interner: self.interner,
            globals,
            op_names,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            depth: CallDepth::new(self.max_call_depth),
        }
    }
}

/// Global table holding every operator under its symbol, plus `print`.
fn seed_builtins(interner: &SharedInterner) -> Table {
    let mut table = Table::default();
    for op in BinaryOp::ALL {
        table.insert(
            interner.intern(op.as_symbol()),
            Value::Builtin(Builtin::Binary(op)),
        );
    }
    table.insert(
        interner.intern(Builtin::Print.symbol()),
        Value::Builtin(Builtin::Print),
    );
    table
}
