//! List reads, in-place writes and aliasing.

use pretty_assertions::assert_eq;

use super::{eval_err, eval_ok, run};
use crate::{EvalErrorKind, Value};

#[test]
fn nested_subscripts_descend() {
    let source = "
        func main() {
            grid = [[1, 2], [3, [4, 5]]];
            return grid[1][1][0] + grid[0][1];
        }
    ";
    assert_eq!(eval_ok(source), Value::Int(6));
}

#[test]
fn negative_indices_count_from_the_end() {
    assert_eq!(eval_ok("func main() { xs = [1, 2, 3]; return xs[-1]; }"), Value::Int(3));
}

#[test]
fn integral_real_indices_are_accepted() {
    assert_eq!(eval_ok("func main() { xs = [1, 2, 3]; return xs[4 / 2]; }"), Value::Int(3));
}

#[test]
fn nested_assignment_updates_in_place() {
    let source = "
        func main() {
            grid = [[0, 0], [0, 0]];
            grid[1][0] = 9;
            return grid;
        }
    ";
    assert_eq!(eval_ok(source).to_string(), "[[0, 0], [9, 0]]");
}

#[test]
fn aliases_observe_element_writes() {
    let source = "
        func main() {
            a = [1, 2, 3];
            b = a;
            b[0] = 100;
            return a[0];
        }
    ";
    assert_eq!(eval_ok(source), Value::Int(100));
}

#[test]
fn global_list_mutated_inside_call() {
    let source = "
        items = [1, 2];
        func fill(xs) {
            xs[1] = 20;
        }
        func main() {
            fill(items);
            return items;
        }
    ";
    let run = run(source);
    assert_eq!(run.result.unwrap().unwrap().to_string(), "[1, 20]");
    assert_eq!(
        run.interpreter.global("items").unwrap().to_string(),
        "[1, 20]"
    );
}

#[test]
fn list_literal_elements_evaluate_in_order() {
    let source = "
        n = 0;
        func tick() {
            n = n + 1;
            return n;
        }
        func main() {
            return [tick(), tick(), tick()];
        }
    ";
    assert_eq!(eval_ok(source).to_string(), "[1, 2, 3]");
}

#[test]
fn out_of_range_read_is_an_error() {
    assert_eq!(
        eval_err("func main() { xs = [1]; return xs[3]; }"),
        EvalErrorKind::IndexOutOfBounds { index: 3, len: 1 }
    );
    assert_eq!(
        eval_err("func main() { xs = [1]; return xs[-2]; }"),
        EvalErrorKind::IndexOutOfBounds { index: -2, len: 1 }
    );
}

#[test]
fn out_of_range_write_is_an_error() {
    assert_eq!(
        eval_err("func main() { xs = []; xs[0] = 1; }"),
        EvalErrorKind::IndexOutOfBounds { index: 0, len: 0 }
    );
}

#[test]
fn indexing_a_number_is_an_error() {
    assert_eq!(
        eval_err("func main() { x = 5; return x[0]; }"),
        EvalErrorKind::NotIndexable { type_name: "int" }
    );
}

#[test]
fn non_integer_index_is_an_error() {
    assert_eq!(
        eval_err("func main() { xs = [1, 2]; return xs[0.5]; }"),
        EvalErrorKind::InvalidIndex {
            got: "0.5".to_string()
        }
    );
    assert_eq!(
        eval_err("func main() { xs = [1, 2]; return xs[[0]]; }"),
        EvalErrorKind::InvalidIndex {
            got: "[0]".to_string()
        }
    );
}

#[test]
fn subscripted_assignment_to_unknown_name_fails() {
    assert_eq!(
        eval_err("func main() { ys[0] = 1; }"),
        EvalErrorKind::UndefinedName {
            name: "ys".to_string()
        }
    );
}

#[test]
fn list_stored_into_itself_prints_and_compares() {
    let run = run("func main() {
            a = [0];
            a[0] = a;
            print(a);
            b = [0];
            b[0] = b;
            print(a == b, a == a, a[0][0] == a);
            return 1;
        }");
    assert_eq!(run.result.unwrap(), Some(Value::Int(1)));
    assert_eq!(run.output, "[[...]]\nTrue True True\n");
}
