//! Stack safety for deep recursion.
//!
//! Mini programs recurse freely (naive `fib`, recursive sorts), and each
//! mini call nests several native frames. Evaluation grows the native
//! stack on demand instead of overflowing it, and an optional depth limit
//! turns runaway recursion into an ordinary error.

use crate::errors::{recursion_limit_exceeded, EvalError};

pub use mini_stack::ensure_sufficient_stack;

/// Counts active user-function calls.
#[derive(Debug, Default)]
pub struct CallDepth {
    current: usize,
    limit: Option<usize>,
}

impl CallDepth {
    pub fn new(limit: Option<usize>) -> Self {
        CallDepth { current: 0, limit }
    }

    /// Enter one call level, failing if the limit would be exceeded.
    pub fn enter(&mut self) -> Result<(), EvalError> {
        if let Some(limit) = self.limit {
            if self.current >= limit {
                return Err(recursion_limit_exceeded(limit));
            }
        }
        self.current += 1;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn current(&self) -> usize {
        self.current
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;

    #[test]
    fn unlimited_by_default() {
        let mut depth = CallDepth::default();
        for _ in 0..10_000 {
            assert!(depth.enter().is_ok());
        }
        assert_eq!(depth.current(), 10_000);
    }

    #[test]
    fn limit_is_enforced() {
        let mut depth = CallDepth::new(Some(2));
        assert!(depth.enter().is_ok());
        assert!(depth.enter().is_ok());
        let err = depth.enter().unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::RecursionLimit { limit: 2 });
        depth.exit();
        assert!(depth.enter().is_ok());
    }
}
