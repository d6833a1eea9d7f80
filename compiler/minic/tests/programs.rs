//! End-to-end runs of the programs under `tests/programs/`.

#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use std::io::Write;
use std::path::{Path, PathBuf};

use mini_eval::{buffer_handler, EvalErrorKind, Value};
use minic::{Error, RunOptions};
use pretty_assertions::assert_eq;

fn program(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("programs")
        .join(name)
}

fn captured() -> RunOptions {
    RunOptions {
        print_handler: buffer_handler(),
        ..RunOptions::default()
    }
}

#[test]
fn bubble_sort() {
    let outcome = minic::run_file(&program("bubble_sort.mini"), &captured()).unwrap();
    assert_eq!(outcome.value.unwrap().to_string(), "[1, 2, 3, 5, 6, 7]");
    // the global list was sorted in place
    let data = outcome.globals.iter().find(|(name, _)| name == "data").unwrap();
    assert_eq!(data.1, "[1, 2, 3, 5, 6, 7]");
}

#[test]
fn fib() {
    let outcome = minic::run_file(&program("fib.mini"), &captured()).unwrap();
    assert_eq!(outcome.value, Some(Value::Int(89)));
}

#[test]
fn fact() {
    let outcome = minic::run_file(&program("fact.mini"), &captured()).unwrap();
    assert_eq!(outcome.value, Some(Value::Int(3_628_800)));
}

#[test]
fn counter_prints_and_writes_through() {
    let options = captured();
    let outcome = minic::run_file(&program("counter.mini"), &options).unwrap();
    assert_eq!(outcome.value, Some(Value::Int(6)));
    assert_eq!(options.print_handler.output(), "1 [1, 1]\n3 [2, 3]\n6 [3, 6]\n");
    assert!(outcome.globals_before.contains(&("count".to_string(), "0".to_string())));
    assert!(outcome.globals.contains(&("count".to_string(), "6".to_string())));
    assert!(!outcome.globals.iter().any(|(name, _)| name == "i" || name == "step"));
}

#[test]
fn runs_a_file_written_at_runtime() {
    let mut file = tempfile::Builder::new().suffix(".mini").tempfile().unwrap();
    writeln!(file, "func main() {{ return [1, 2.5, 1 < 2]; }}").unwrap();
    let outcome = minic::run_file(file.path(), &captured()).unwrap();
    assert_eq!(outcome.value.unwrap().to_string(), "[1, 2.5, True]");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = minic::run_file(&program("no_such_program.mini"), &captured()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn runtime_errors_point_at_the_offending_expression() {
    let source = "func main() {\n  xs = [1, 2];\n  return xs[5];\n}\n";
    let err = minic::run_source(source, &captured()).unwrap_err();
    match &err {
        Error::Eval(eval) => {
            assert_eq!(eval.kind, EvalErrorKind::IndexOutOfBounds { index: 5, len: 2 });
        }
        other => panic!("expected an evaluation error, got {other:?}"),
    }
    let rendered = err.render("bad.mini", source);
    assert!(rendered.contains("index 5 out of bounds for list of length 2"), "{rendered}");
    assert!(rendered.contains("bad.mini"), "{rendered}");
}

#[test]
fn program_must_end_with_main() {
    let err = minic::run_source("func helper() { return 1; }", &captured()).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(mini_parse::ParseError::EntryNotMain { .. })
    ));
}
