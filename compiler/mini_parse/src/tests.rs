use super::*;
use mini_ir::pretty::dump_program;
use pretty_assertions::assert_eq;

fn dump(source: &str) -> String {
    let interner = StringInterner::new();
    match parse_source(source, &interner) {
        Ok(program) => dump_program(&program, &interner),
        Err(e) => panic!("parse failed: {e}"),
    }
}

/// Parse `func main() { return <expr>; }` and return the rendered expression.
fn dump_expr(expr: &str) -> String {
    let rendered = dump(&format!("func main() {{ return {expr}; }}"));
    rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("(return "))
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or_default()
        .to_owned()
}

fn parse_err(source: &str) -> ParseError {
    let interner = StringInterner::new();
    match parse_source(source, &interner) {
        Ok(_) => panic!("expected a parse error for {source:?}"),
        Err(e) => e,
    }
}

#[test]
fn minimal_program() {
    assert_eq!(
        dump("func main() { return -3; }"),
        "(program\n  (func main ()\n    (return (- 3))\n  )\n)\n"
    );
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(dump_expr("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(dump_expr("(1 + 2) * 3"), "(* (+ 1 2) 3)");
}

#[test]
fn operators_are_left_associative() {
    assert_eq!(dump_expr("10 - 3 - 2"), "(- (- 10 3) 2)");
    assert_eq!(dump_expr("8 / 4 / 2"), "(/ (/ 8 4) 2)");
}

#[test]
fn relational_operators_bind_loosest() {
    assert_eq!(dump_expr("a < b + 1"), "(< a (+ b 1))");
    assert_eq!(dump_expr("a < b and c"), "(< a (and b c))");
    assert_eq!(dump_expr("a == b or c"), "(or (== a b) c)");
}

#[test]
fn prefix_operators_bind_tightest() {
    assert_eq!(dump_expr("-2 * 3"), "(* (- 2) 3)");
    assert_eq!(dump_expr("+x"), "(+ x)");
    assert_eq!(dump_expr("- -1"), "(- (- 1))");
}

#[test]
fn lists_subscripts_and_calls() {
    assert_eq!(dump_expr("[1, [2, 3], []]"), "[1, [2, 3], []]");
    assert_eq!(dump_expr("grid[i][j + 1]"), "grid[i][(+ j 1)]");
    assert_eq!(dump_expr("f(a, g(), [1])"), "(call f a (call g) [1])");
    assert_eq!(dump_expr("2.5"), "2.5");
}

#[test]
fn statements() {
    let source = "
        total = 0;
        func add(a, b) { return a + b; }
        func main() {
            x[0] = add(1, 2);
            print(x);
            if (x[0] > 2) { return 1; } else { { y = 2; } }
            while (total < 3) { total = total + 1; }
            return total;
        }
    ";
    let expected = "\
(program
  (= total 0)
  (func add (a b)
    (return (+ a b))
  )
  (func main ()
    (= x[0] (call add 1 2))
    (call print x)
    (if (> x[0] 2)
      (return 1)
    )
    (else
      (block
        (= y 2)
      )
    )
    (while (< total 3)
      (= total (+ total 1))
    )
    (return total)
  )
)
";
    assert_eq!(dump(source), expected);
}

#[test]
fn empty_function_body_and_if_without_else() {
    let source = "func noop() {} func main() { if (1) { noop(); } return 0; }";
    let interner = StringInterner::new();
    let program = parse_source(source, &interner).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(program.preamble.len(), 1);
    let StmtKind::If { else_body, .. } = &program.entry.body[0].kind else {
        panic!("expected if statement");
    };
    assert!(else_body.is_empty());
}

#[test]
fn program_without_functions_is_rejected() {
    assert_eq!(parse_err("x = 1;"), ParseError::MissingMain);
    assert_eq!(parse_err(""), ParseError::MissingMain);
}

#[test]
fn last_function_must_be_main() {
    let err = parse_err("func main() { return 1; } func helper() { return 2; }");
    assert!(matches!(err, ParseError::EntryNotMain { ref found, .. } if found == "helper"));
}

#[test]
fn missing_semicolon_reports_line() {
    let err = parse_err("func main() {\n  x = 1\n  return x;\n}");
    assert_eq!(
        err.to_string(),
        "expected `;`, found `return` on line 3"
    );
}

#[test]
fn unexpected_identifier_is_named() {
    let err = parse_err("func main() { return 1 2; }");
    assert_eq!(err.to_string(), "expected `;`, found number `2` on line 1");
    let err = parse_err("func main() { 1 = x; }");
    assert_eq!(err.to_string(), "expected a statement, found number `1` on line 1");
}

#[test]
fn function_definitions_are_top_level_only() {
    let err = parse_err("func main() { func inner() {} }");
    assert!(matches!(err, ParseError::Unexpected { expected: "a statement", .. }));
}

#[test]
fn unterminated_block() {
    let err = parse_err("func main() { return 1;");
    assert!(matches!(err, ParseError::Unexpected { expected: "`}`", .. }));
}

#[test]
fn lex_errors_pass_through() {
    let err = parse_err("func main() { return 1 @ 2; }");
    assert!(matches!(err, ParseError::Lex(_)));
    assert!(err.span().is_some());
}

#[test]
fn deeply_nested_parentheses() {
    let depth = 200_000;
    let source = format!(
        "func main() {{ return {}1{}; }}",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    assert_eq!(dump(&source), dump("func main() { return 1; }"));

    let unclosed = format!("func main() {{ return {}1; }}", "(".repeat(depth));
    let err = parse_err(&unclosed);
    assert!(matches!(err, ParseError::Unexpected { expected: "`)`", .. }));
}

#[test]
fn long_prefix_chains() {
    let source = format!("func main() {{ return {}2; }}", "- ".repeat(1_000));
    let interner = StringInterner::new();
    let program = parse_source(&source, &interner).unwrap_or_else(|e| panic!("{e}"));
    let StmtKind::Return(expr) = &program.entry.body[0].kind else {
        panic!("expected a return");
    };
    let mut expr = expr;
    let mut depth = 0;
    while let ExprKind::Unary {
        op: UnaryOp::Neg,
        operand,
    } = &expr.kind
    {
        depth += 1;
        expr = &**operand;
    }
    assert_eq!(depth, 1_000);
    assert!(matches!(expr.kind, ExprKind::Number(NumberLit::Int(2))));
}
