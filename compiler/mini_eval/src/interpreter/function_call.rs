//! Call protocol.

use mini_ir::{Call, Expr};

use super::{Flow, Interpreter};
use crate::environment::Environment;
use crate::errors::{arity_mismatch, not_callable, undefined_name, EvalError, EvalErrorKind};
use crate::stack::ensure_sufficient_stack;
use crate::{Builtin, FunctionValue, Value};

impl Interpreter {
    /// Call whatever `call.callee` names in `env`. Only user functions and
    /// `print` are callable; operator builtins are applied by binary
    /// expressions, never by name.
    ///
    /// Returns `Ok(None)` when a user function finishes without `return`,
    /// and always for `print`.
    pub(super) fn eval_call(
        &mut self,
        call: &Call,
        env: &Environment,
    ) -> Result<Option<Value>, EvalError> {
        let name = self.name_str(call.callee);
        let result = match env.lookup(call.callee) {
            Some(Value::Function(func)) => self.call_function(&func, &call.args, env),
            Some(Value::Builtin(Builtin::Print)) => {
                let args = self.eval_args(&call.args, env)?;
                self.print_values(&args).map(|()| None)
            }
            Some(other) => Err(not_callable(name, &other)),
            None => Err(undefined_name(name)),
        };
        result.map_err(|e| e.or_span(call.span))
    }

    /// Invoke a user function.
    ///
    /// The callee gets a snapshot of the caller's visible bindings. Each
    /// argument is evaluated against that snapshot after the earlier
    /// parameters have been bound into it, so an argument may refer to a
    /// preceding parameter by name.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = func.label(), depth = self.depth.current())
    )]
    pub(super) fn call_function(
        &mut self,
        func: &FunctionValue,
        args: &[Expr],
        env: &Environment,
    ) -> Result<Option<Value>, EvalError> {
        let params = func.params();
        if args.len() != params.len() {
            return Err(arity_mismatch(func.label(), params.len(), args.len()));
        }

        self.depth.enter()?;
        let result = ensure_sufficient_stack(|| -> Result<Option<Value>, EvalError> {
            let mut frame = env.call_frame();
            for (&param, arg) in params.iter().zip(args) {
                let value = self.eval_expr(arg, &frame)?;
                frame.define(param, value);
            }
            match self.exec_block(&func.def().body, &mut frame)? {
                Flow::Return(value) => Ok(Some(value)),
                Flow::Normal => Ok(None),
            }
        });
        self.depth.exit();
        result
    }

    fn eval_args(&mut self, args: &[Expr], env: &Environment) -> Result<Vec<Value>, EvalError> {
        args.iter().map(|arg| self.eval_expr(arg, env)).collect()
    }

    /// `print`: display forms joined by single spaces, then a newline.
    fn print_values(&self, args: &[Value]) -> Result<(), EvalError> {
        let line = args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        self.print_handler.write_line(&line).map_err(|e| {
            EvalError::new(EvalErrorKind::Output {
                message: e.to_string(),
            })
        })
    }
}
