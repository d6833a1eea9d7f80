//! Indented S-expression rendering of a parsed program, for `mini parse`.

use crate::ast::{Call, Expr, ExprKind, FunctionDef, Identifier, Program, Stmt, StmtKind};
use crate::StringInterner;
use std::fmt::Write;

/// Render `program` with names resolved through `interner`.
pub fn dump_program(program: &Program, interner: &StringInterner) -> String {
    let mut printer = Printer {
        interner,
        out: String::new(),
        indent: 0,
    };
    printer.line("(program");
    printer.indent += 1;
    for stmt in &program.preamble {
        printer.stmt(stmt);
    }
    printer.function(&program.entry);
    printer.indent -= 1;
    printer.line(")");
    printer.out
}

struct Printer<'a> {
    interner: &'a StringInterner,
    out: String,
    indent: usize,
}

impl Printer<'_> {
    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn block(&mut self, head: &str, body: &[Stmt]) {
        self.line(&format!("({head}"));
        self.indent += 1;
        for stmt in body {
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.line(")");
    }

    fn function(&mut self, def: &FunctionDef) {
        let params: Vec<_> = def.params.iter().map(|p| self.interner.lookup(*p)).collect();
        let head = format!(
            "func {} ({})",
            self.interner.lookup(def.name),
            params.join(" ")
        );
        self.block(&head, &def.body);
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Assign { target, value } => {
                let text = format!("(= {} {})", self.ident(target), self.expr(value));
                self.line(&text);
            }
            StmtKind::FunctionDef(def) => self.function(def),
            StmtKind::Call(call) => {
                let text = self.call(call);
                self.line(&text);
            }
            StmtKind::Return(value) => {
                let text = format!("(return {})", self.expr(value));
                self.line(&text);
            }
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                let head = format!("if {}", self.expr(cond));
                self.block(&head, then_body);
                if !else_body.is_empty() {
                    self.block("else", else_body);
                }
            }
            StmtKind::While { cond, body } => {
                let head = format!("while {}", self.expr(cond));
                self.block(&head, body);
            }
            StmtKind::Block(body) => self.block("block", body),
        }
    }

    fn ident(&self, ident: &Identifier) -> String {
        let mut text = self.interner.lookup(ident.name).to_owned();
        for subscript in &ident.subscripts {
            let _ = write!(text, "[{}]", self.expr(subscript));
        }
        text
    }

    fn call(&self, call: &Call) -> String {
        let mut text = format!("(call {}", self.interner.lookup(call.callee));
        for arg in &call.args {
            let _ = write!(text, " {}", self.expr(arg));
        }
        text.push(')');
        text
    }

    fn expr(&self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Number(lit) => lit.to_string(),
            ExprKind::List(items) => {
                let items: Vec<_> = items.iter().map(|e| self.expr(e)).collect();
                format!("[{}]", items.join(", "))
            }
            ExprKind::Ident(ident) => self.ident(ident),
            ExprKind::Unary { op, operand } => format!("({} {})", op.as_symbol(), self.expr(operand)),
            ExprKind::Binary { op, left, right } => {
                format!("({op} {} {})", self.expr(left), self.expr(right))
            }
            ExprKind::Call(call) => self.call(call),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, NumberLit};
    use crate::Span;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[test]
    fn dumps_nested_structure() {
        let interner = StringInterner::new();
        let x = interner.intern("x");
        let num = |n| Expr::new(ExprKind::Number(NumberLit::Int(n)), Span::DUMMY);
        let var = || Identifier {
            name: x,
            subscripts: Vec::new(),
            span: Span::DUMMY,
        };
        let program = Program {
            preamble: vec![Stmt::new(
                StmtKind::Assign {
                    target: var(),
                    value: num(3),
                },
                Span::DUMMY,
            )],
            entry: Rc::new(FunctionDef {
                name: interner.intern("main"),
                params: vec![],
                body: vec![Stmt::new(
                    StmtKind::Return(Expr::new(
                        ExprKind::Binary {
                            op: BinaryOp::Add,
                            left: Box::new(Expr::new(
                                ExprKind::Ident(var()),
                                Span::DUMMY,
                            )),
                            right: Box::new(num(1)),
                        },
                        Span::DUMMY,
                    )),
                    Span::DUMMY,
                )],
                span: Span::DUMMY,
            }),
        };

        let expected = "\
(program
  (= x 3)
  (func main ()
    (return (+ x 1))
  )
)
";
        assert_eq!(dump_program(&program, &interner), expected);
    }
}
