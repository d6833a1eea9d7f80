//! Name tables for the interpreter.
//!
//! There is one global table, shared by every activation, and one local
//! table per function call. A call's local table starts as a copy of the
//! caller's visible bindings, so a callee can read (but not write) its
//! caller's locals.
//!
//! Whether a name is global is decided by one rule: it is global if the
//! global table has a key for it at the moment of access. Reads and writes
//! of such names go to the global table; every other name lives in the
//! active local table. Parameters are the exception: they are bound
//! straight into the local table, so a parameter named like a global is
//! stored locally yet every read of that name still returns the global.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use mini_ir::Name;
use rustc_hash::FxHashMap;

use crate::Value;

/// Bindings from names to values.
pub type Table = FxHashMap<Name, Value>;

/// A single-threaded shared cell for the global table.
///
/// Every activation holds a clone of the same handle, so writes through
/// one are visible through all of them.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&*self.0.borrow()).finish()
    }
}

/// The view of names from one activation.
pub struct Environment {
    global: LocalScope<Table>,
    /// `None` at top level, where the global table is the active table.
    local: Option<Table>,
}

impl Environment {
    /// Top-level environment: statements bind straight into `global`.
    pub fn top_level(global: LocalScope<Table>) -> Self {
        Environment {
            global,
            local: None,
        }
    }

    /// Whether `name` currently has a key in the global table.
    fn is_global(&self, name: Name) -> bool {
        self.global.borrow().contains_key(&name)
    }

    /// Resolve `name` for reading.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.global.borrow().get(&name) {
            return Some(value.clone());
        }
        self.local.as_ref().and_then(|local| local.get(&name).cloned())
    }

    /// Bind `name` for writing, following the global-key rule.
    pub fn assign(&mut self, name: Name, value: Value) {
        let is_global = self.is_global(name);
        match &mut self.local {
            Some(local) if !is_global => {
                local.insert(name, value);
            }
            Some(_) => {
                tracing::trace!(?name, "write through to global");
                self.global.borrow_mut().insert(name, value);
            }
            None => {
                self.global.borrow_mut().insert(name, value);
            }
        }
    }

    /// Bind `name` directly in the active table, bypassing the global-key
    /// rule. Used for parameters and function definitions.
    pub fn define(&mut self, name: Name, value: Value) {
        match &mut self.local {
            Some(local) => {
                local.insert(name, value);
            }
            None => {
                self.global.borrow_mut().insert(name, value);
            }
        }
    }

    /// Environment for a call made from this activation.
    ///
    /// The new local table is a snapshot of every binding visible here;
    /// later writes on either side are not seen by the other, except
    /// through the shared global table or shared list storage.
    pub fn call_frame(&self) -> Environment {
        let snapshot = match &self.local {
            Some(local) => local.clone(),
            None => self.global.borrow().clone(),
        };
        Environment {
            global: self.global.clone(),
            local: Some(snapshot),
        }
    }
}
