//! Tree-walking interpreter.
//!
//! Expressions evaluate to a [`Value`]; statements evaluate to a [`Flow`]
//! that says whether a `return` has fired. A `Return` stops the enclosing
//! blocks up to the nearest call boundary, where `call_function` turns it
//! into the call's result.
//!
//! Submodules:
//! - `builder` - construction and builtin seeding
//! - `function_call` - call protocol and the `print` builtin
//! - `subscript` - identifier reads and list element writes

mod builder;
mod function_call;
mod subscript;

pub use builder::InterpreterBuilder;

use std::rc::Rc;

use mini_ir::{
    BinaryOp, Expr, ExprKind, Name, NumberLit, Program, SharedInterner, Stmt, StmtKind,
};
use rustc_hash::FxHashMap;

use crate::environment::{Environment, LocalScope, Table};
use crate::errors::{
    no_result, not_callable, undefined_name, EvalError, EvalErrorKind, EvalResult,
};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::stack::{ensure_sufficient_stack, CallDepth};
use crate::{Builtin, FunctionValue, SharedPrintHandler, Value};

/// Pre-interned operator keys, so binary expressions resolve their
/// operator through the global table without touching the interner.
type OpNames = FxHashMap<BinaryOp, Name>;

/// Outcome of executing a statement or block.
#[derive(Debug)]
pub enum Flow {
    /// Ran to completion; continue with the next statement.
    Normal,
    /// A `return` fired with this value.
    Return(Value),
}

/// Tree-walking interpreter for a single program run.
///
/// The global table lives as long as the interpreter; running several
/// programs on one interpreter shares their globals.
pub struct Interpreter {
    interner: SharedInterner,
    globals: LocalScope<Table>,
    op_names: OpNames,
    main: Name,
    print_handler: SharedPrintHandler,
    depth: CallDepth,
}

impl Interpreter {
    /// Interpreter with default settings: stdout output, no depth limit.
    pub fn new(interner: SharedInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    /// Run the preamble against the global table, then call `main` with no
    /// arguments. Returns `None` when `main` finishes without `return`.
    pub fn run_program(&mut self, program: &Program) -> Result<Option<Value>, EvalError> {
        self.load(program)?;
        self.call_main()
    }

    /// Execute the preamble and register the entry function, without
    /// calling it. Fails before running anything if the entry function is
    /// not `main`, and at the first preamble statement that returns.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn load(&mut self, program: &Program) -> Result<(), EvalError> {
        if program.entry.name != self.main {
            return Err(
                EvalError::new(EvalErrorKind::MissingEntryPoint).or_span(program.entry.span),
            );
        }

        let mut env = Environment::top_level(self.globals.clone());
        for stmt in &program.preamble {
            if let Flow::Return(_) = self.exec_stmt(stmt, &mut env)? {
                return Err(
                    EvalError::new(EvalErrorKind::ReturnOutsideFunction).or_span(stmt.span)
                );
            }
        }
        let entry = &program.entry;
        let label = self.name_str(entry.name);
        env.define(entry.name, Value::Function(FunctionValue::new(Rc::clone(entry), label)));
        tracing::trace!(statements = program.preamble.len(), "program loaded");
        Ok(())
    }

    /// Call the global `main` with no arguments.
    pub fn call_main(&mut self) -> Result<Option<Value>, EvalError> {
        let env = Environment::top_level(self.globals.clone());
        match env.lookup(self.main) {
            Some(Value::Function(entry)) => self.call_function(&entry, &[], &env),
            _ => Err(EvalErrorKind::MissingEntryPoint.into()),
        }
    }

    /// User-visible globals (everything except builtins), sorted by name.
    pub fn globals(&self) -> Vec<(String, Value)> {
        let mut globals: Vec<_> = self
            .globals
            .borrow()
            .iter()
            .filter(|(_, value)| !matches!(value, Value::Builtin(_)))
            .map(|(name, value)| (self.interner.lookup(*name).to_string(), value.clone()))
            .collect();
        globals.sort_by(|a, b| a.0.cmp(&b.0));
        globals
    }

    /// Current value of the global `name`, if bound.
    pub fn global(&self, name: &str) -> Option<Value> {
        let name = self.interner.intern(name);
        self.globals.borrow().get(&name).cloned()
    }

    fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Evaluate an expression against `env`.
    pub(crate) fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
            .map_err(|e| e.or_span(expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        match &expr.kind {
            ExprKind::Number(NumberLit::Int(n)) => Ok(Value::Int(*n)),
            ExprKind::Number(NumberLit::Real(r)) => Ok(Value::Real(*r)),
            ExprKind::List(items) => {
                let values = items
                    .iter()
                    .map(|item| self.eval_expr(item, env))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(values))
            }
            ExprKind::Ident(ident) => self.eval_identifier(ident, env),
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand, env)?;
                evaluate_unary(*op, value)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                self.apply_operator(*op, &left, &right, env)
            }
            ExprKind::Call(call) => self
                .eval_call(call, env)?
                .ok_or_else(|| no_result(self.name_str(call.callee))),
        }
    }

    /// Apply `op` through whatever its symbol is bound to in `env`.
    fn apply_operator(
        &self,
        op: BinaryOp,
        left: &Value,
        right: &Value,
        env: &Environment,
    ) -> EvalResult {
        let symbol = op.as_symbol();
        let bound = self
            .op_names
            .get(&op)
            .and_then(|name| env.lookup(*name))
            .ok_or_else(|| undefined_name(symbol))?;
        match bound {
            Value::Builtin(Builtin::Binary(builtin)) => evaluate_binary(builtin, left, right),
            other => Err(not_callable(symbol, &other)),
        }
    }

    /// Execute statements in order until one returns.
    pub(crate) fn exec_block(
        &mut self,
        stmts: &[Stmt],
        env: &mut Environment,
    ) -> Result<Flow, EvalError> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &mut Environment) -> Result<Flow, EvalError> {
        let flow = match &stmt.kind {
            StmtKind::Assign { target, value } => {
                self.assign(target, value, env).map(|()| Flow::Normal)
            }
            StmtKind::FunctionDef(def) => {
                let label = self.name_str(def.name);
                env.define(def.name, Value::Function(FunctionValue::new(Rc::clone(def), label)));
                Ok(Flow::Normal)
            }
            StmtKind::Call(call) => self.eval_call(call, env).map(|_| Flow::Normal),
            StmtKind::Return(expr) => self.eval_expr(expr, env).map(Flow::Return),
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => match self.eval_expr(cond, env) {
                Ok(test) if test.is_truthy() => self.exec_block(then_body, env),
                Ok(_) => self.exec_block(else_body, env),
                Err(e) => Err(e),
            },
            StmtKind::While { cond, body } => self.exec_while(cond, body, env),
            StmtKind::Block(stmts) => self.exec_block(stmts, env),
        };
        flow.map_err(|e| e.or_span(stmt.span))
    }

    fn exec_while(
        &mut self,
        cond: &Expr,
        body: &[Stmt],
        env: &mut Environment,
    ) -> Result<Flow, EvalError> {
        while self.eval_expr(cond, env)?.is_truthy() {
            if let Flow::Return(value) = self.exec_block(body, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }
}
