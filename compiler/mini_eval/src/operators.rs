//! Builtin operator implementations.
//!
//! Operands are always both evaluated before an operator runs, so `or` and
//! `and` are plain functions of two values. Booleans take part in
//! arithmetic as 0 and 1.

use mini_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    integer_overflow, type_mismatch, unary_type_mismatch, EvalError, EvalErrorKind, EvalResult,
};
use crate::value::Number;
use crate::Value;

/// Apply a binary operator to two evaluated operands.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => arithmetic(op, left, right),
        BinaryOp::Div => divide(left, right),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => compare(op, left, right),
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
    }
}

/// Apply a prefix operator. `+` returns its operand unchanged.
pub fn evaluate_unary(op: UnaryOp, operand: Value) -> EvalResult {
    match op {
        UnaryOp::Plus => Ok(operand),
        UnaryOp::Neg => match operand.as_number() {
            Some(Number::Int(n)) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("-")),
            Some(Number::Real(r)) => Ok(Value::Real(-r)),
            None => Err(unary_type_mismatch("-", &operand)),
        },
    }
}

fn operands(op: BinaryOp, left: &Value, right: &Value) -> Result<(Number, Number), EvalError> {
    match (left.as_number(), right.as_number()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(type_mismatch(op.as_symbol(), left, right)),
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let symbol = op.as_symbol();
    match operands(op, left, right)? {
        (Number::Int(a), Number::Int(b)) => {
            let result = match op {
                BinaryOp::Add => a.checked_add(b),
                BinaryOp::Sub => a.checked_sub(b),
                _ => a.checked_mul(b),
            };
            result.map(Value::Int).ok_or_else(|| integer_overflow(symbol))
        }
        (a, b) => {
            let (a, b) = (a.to_f64(), b.to_f64());
            Ok(Value::Real(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                _ => a * b,
            }))
        }
    }
}

/// `/` always produces a real quotient.
fn divide(left: &Value, right: &Value) -> EvalResult {
    let (a, b) = operands(BinaryOp::Div, left, right)?;
    let divisor = b.to_f64();
    if divisor == 0.0 {
        return Err(EvalErrorKind::DivisionByZero.into());
    }
    Ok(Value::Real(a.to_f64() / divisor))
}

fn compare(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let holds = match operands(op, left, right)? {
        (Number::Int(a), Number::Int(b)) => match op {
            BinaryOp::Lt => a < b,
            BinaryOp::LtEq => a <= b,
            BinaryOp::Gt => a > b,
            _ => a >= b,
        },
        (a, b) => {
            let (a, b) = (a.to_f64(), b.to_f64());
            match op {
                BinaryOp::Lt => a < b,
                BinaryOp::LtEq => a <= b,
                BinaryOp::Gt => a > b,
                _ => a >= b,
            }
        }
    };
    Ok(Value::Bool(holds))
}
