//! Stack growth for deep recursion.
//!
//! The parser recurses once per nested expression and the evaluator once
//! per nested expression and per call. Both wrap those recursions in
//! [`ensure_sufficient_stack`], which moves onto a freshly allocated stack
//! segment when the current one runs low.
//!
//! On `wasm32` the guard is a plain call.

/// Grow when less than this much stack remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the native stack first if less than the red zone
/// remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
