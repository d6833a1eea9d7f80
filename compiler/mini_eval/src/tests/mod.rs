//! Evaluator tests, driven through the parser.

#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

mod scoping_tests;
mod subscript_tests;

use mini_ir::SharedInterner;

use crate::{buffer_handler, EvalError, EvalErrorKind, Interpreter, InterpreterBuilder, Value};

/// Everything a test may want to inspect after a run.
pub(super) struct Run {
    pub result: Result<Option<Value>, EvalError>,
    pub output: String,
    pub interpreter: Interpreter,
}

pub(super) fn run_with(
    source: &str,
    configure: impl FnOnce(InterpreterBuilder) -> InterpreterBuilder,
) -> Run {
    let interner = SharedInterner::new();
    let program = mini_parse::parse_source(source, &interner)
        .unwrap_or_else(|e| panic!("parse failed: {e}\n{source}"));
    let handler = buffer_handler();
    let builder = InterpreterBuilder::new(interner).print_handler(handler.clone());
    let mut interpreter = configure(builder).build();
    let result = interpreter.run_program(&program);
    Run {
        result,
        output: handler.output(),
        interpreter,
    }
}

pub(super) fn run(source: &str) -> Run {
    run_with(source, |builder| builder)
}

/// Run `source` and return `main`'s result.
pub(super) fn eval_ok(source: &str) -> Value {
    match run(source).result {
        Ok(Some(value)) => value,
        Ok(None) => panic!("main returned no value"),
        Err(e) => panic!("evaluation failed: {e}"),
    }
}

/// Run `source` and return the error kind it fails with.
pub(super) fn eval_err(source: &str) -> EvalErrorKind {
    match run(source).result {
        Ok(value) => panic!("expected an error, got {value:?}"),
        Err(e) => e.kind,
    }
}
