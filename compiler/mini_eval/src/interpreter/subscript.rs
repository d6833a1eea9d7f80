//! Identifier reads and assignments, including list subscripts.

use mini_ir::{Expr, Identifier};

use super::Interpreter;
use crate::environment::Environment;
use crate::errors::{
    index_out_of_bounds, invalid_index, not_indexable, undefined_name, EvalError, EvalResult,
};
use crate::{ListValue, Value};

impl Interpreter {
    /// Read `name[i0][i1]...`, descending one list per subscript.
    pub(super) fn eval_identifier(&mut self, ident: &Identifier, env: &Environment) -> EvalResult {
        let mut value = self.resolve(ident, env)?;
        for subscript in &ident.subscripts {
            let index = self.eval_expr(subscript, env)?;
            value = index_into(&value, &index).map_err(|e| e.or_span(subscript.span))?;
        }
        Ok(value)
    }

    /// `target = value`.
    ///
    /// For a subscripted target the base name is resolved first, then every
    /// subscript, then the right-hand side; the innermost list is updated
    /// in place so all aliases observe the write.
    pub(super) fn assign(
        &mut self,
        target: &Identifier,
        value: &Expr,
        env: &mut Environment,
    ) -> Result<(), EvalError> {
        if target.subscripts.is_empty() {
            let value = self.eval_expr(value, env)?;
            env.assign(target.name, value);
            return Ok(());
        }

        let base = self.resolve(target, env)?;
        let indices = target
            .subscripts
            .iter()
            .map(|subscript| self.eval_expr(subscript, env))
            .collect::<Result<Vec<_>, _>>()?;
        let value = self.eval_expr(value, env)?;

        let mut container = base;
        let last = indices.len() - 1;
        for (index, subscript) in indices[..last].iter().zip(&target.subscripts) {
            container = index_into(&container, index).map_err(|e| e.or_span(subscript.span))?;
        }
        let last_span = target.subscripts[last].span;
        store_into(&container, &indices[last], value).map_err(|e| e.or_span(last_span))
    }

    fn resolve(&self, ident: &Identifier, env: &Environment) -> EvalResult {
        env.lookup(ident.name)
            .ok_or_else(|| undefined_name(self.name_str(ident.name)).or_span(ident.span))
    }
}

fn as_list(value: &Value) -> Result<&ListValue, EvalError> {
    match value {
        Value::List(list) => Ok(list),
        other => Err(not_indexable(other)),
    }
}

fn index_into(container: &Value, index: &Value) -> EvalResult {
    let list = as_list(container)?;
    let position = list_position(index, list.len())?;
    list.get(position)
        .ok_or_else(|| index_out_of_bounds(raw_index(index).unwrap_or_default(), list.len()))
}

fn store_into(container: &Value, index: &Value, value: Value) -> Result<(), EvalError> {
    let list = as_list(container)?;
    let len = list.len();
    let position = list_position(index, len)?;
    if list.set(position, value) {
        Ok(())
    } else {
        Err(index_out_of_bounds(raw_index(index).unwrap_or_default(), len))
    }
}

/// Integer value of an index. Reals are accepted when integral, since `/`
/// always yields a real.
fn raw_index(index: &Value) -> Option<i64> {
    match index {
        Value::Int(n) => Some(*n),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Real(r) if r.is_finite() && r.fract() == 0.0 => Some(real_to_index(*r)),
        _ => None,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "integral reals outside i64 saturate and then fail the bounds check"
)]
fn real_to_index(r: f64) -> i64 {
    r as i64
}

/// Map an index onto `0..len`. Negative indices count from the end.
fn list_position(index: &Value, len: usize) -> Result<usize, EvalError> {
    let raw = raw_index(index).ok_or_else(|| invalid_index(index))?;
    let len_i64 = i64::try_from(len).unwrap_or(i64::MAX);
    let adjusted = if raw < 0 { raw + len_i64 } else { raw };
    if (0..len_i64).contains(&adjusted) {
        usize::try_from(adjusted).map_err(|_| index_out_of_bounds(raw, len))
    } else {
        Err(index_out_of_bounds(raw, len))
    }
}
