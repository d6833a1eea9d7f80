//! Global write-through, local isolation and the shadowing gap.

use pretty_assertions::assert_eq;

use super::{eval_ok, run};
use crate::Value;

#[test]
fn global_write_through_persists_after_call() {
    let source = "
        x = 1;
        func bump() {
            x = x + 10;
        }
        func main() {
            bump();
            bump();
            return x;
        }
    ";
    let run = run(source);
    assert_eq!(run.result.unwrap(), Some(Value::Int(21)));
    assert_eq!(run.interpreter.global("x"), Some(Value::Int(21)));
}

#[test]
fn locals_never_reach_the_global_table() {
    let source = "
        func work(n) {
            scratch = n * 2;
            return scratch;
        }
        func main() {
            return work(4);
        }
    ";
    let run = run(source);
    assert_eq!(run.result.unwrap(), Some(Value::Int(8)));
    assert_eq!(run.interpreter.global("scratch"), None);
    assert_eq!(run.interpreter.global("n"), None);
}

#[test]
fn callee_writes_do_not_leak_into_caller_locals() {
    let source = "
        func clobber() {
            y = 100;
        }
        func main() {
            y = 1;
            clobber();
            return y;
        }
    ";
    assert_eq!(eval_ok(source), Value::Int(1));
}

#[test]
fn callee_sees_caller_locals() {
    let source = "
        func peek() {
            return secret;
        }
        func main() {
            secret = 42;
            return peek();
        }
    ";
    assert_eq!(eval_ok(source), Value::Int(42));
}

#[test]
fn recursive_calls_get_separate_locals() {
    let source = "
        func depth(n) {
            mine = n;
            if (n > 0) {
                below = depth(n - 1);
            }
            return mine;
        }
        func main() {
            return depth(5);
        }
    ";
    assert_eq!(eval_ok(source), Value::Int(5));
}

#[test]
fn local_named_like_a_global_writes_through() {
    let source = "
        count = 0;
        func reset() {
            count = 7;
        }
        func main() {
            reset();
            return count;
        }
    ";
    assert_eq!(eval_ok(source), Value::Int(7));
}

#[test]
fn parameter_named_like_a_global_reads_the_global() {
    let source = "
        n = 1;
        func show(n) {
            return n;
        }
        func main() {
            return show(99);
        }
    ";
    let run = run(source);
    assert_eq!(run.result.unwrap(), Some(Value::Int(1)));
    assert_eq!(run.interpreter.global("n"), Some(Value::Int(1)));
}

#[test]
fn top_level_definitions_are_global_functions() {
    let source = "
        func double(x) {
            return x + x;
        }
        limit = double(3);
        func main() {
            return limit;
        }
    ";
    assert_eq!(eval_ok(source), Value::Int(6));
}
