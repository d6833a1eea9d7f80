//! Runtime values.
//!
//! Lists have reference semantics: cloning a `Value::List` clones the
//! handle, so every binding that received the same list observes element
//! writes made through any of them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use mini_ir::{BinaryOp, FunctionDef, Name};
use rustc_hash::FxHashSet;

use crate::stack::ensure_sufficient_stack;

/// A value produced by evaluation.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Real(f64),
    Bool(bool),
    List(ListValue),
    Function(FunctionValue),
    Builtin(Builtin),
}

impl Value {
    /// Build a list value from owned elements.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(ListValue::new(items))
    }

    /// Name of the value's kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Real(_) => "real",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
        }
    }

    /// Zero, false and the empty list are false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Real(r) => *r != 0.0,
            Value::Bool(b) => *b,
            Value::List(list) => !list.is_empty(),
            Value::Function(_) | Value::Builtin(_) => true,
        }
    }

    /// View the value as a number. Booleans count as 0 and 1.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Real(r) => Some(Number::Real(*r)),
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            _ => None,
        }
    }
}

/// Numeric view of a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Real(f64),
}

impl Number {
    #[expect(
        clippy::cast_precision_loss,
        reason = "mixed int/real arithmetic promotes to f64"
    )]
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Real(r) => r,
        }
    }
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp, reason = "numeric equality is exact")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => match (self.as_number(), other.as_number()) {
                (Some(Number::Int(a)), Some(Number::Int(b))) => a == b,
                (Some(a), Some(b)) => a.to_f64() == b.to_f64(),
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            // Debug keeps the fractional part: 2.0 prints as "2.0"
            Value::Real(r) => write!(f, "{r:?}"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::List(list) => write!(f, "{list}"),
            Value::Function(func) => write!(f, "<function {}>", func.label),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.symbol()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Real(r) => write!(f, "Real({r:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::List(list) => write!(f, "List({list})"),
            Value::Function(func) => write!(f, "Function({})", func.label),
            Value::Builtin(b) => write!(f, "Builtin({})", b.symbol()),
        }
    }
}

/// Identity of a list's storage.
type ListPtr = *const RefCell<Vec<Value>>;

/// Shared, mutable list storage.
#[derive(Clone, Debug)]
pub struct ListValue(Rc<RefCell<Vec<Value>>>);

impl ListValue {
    pub fn new(items: Vec<Value>) -> Self {
        ListValue(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Element at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Overwrite the element at `index`. Returns `false` when out of range.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Whether both handles refer to the same storage.
    pub fn ptr_eq(&self, other: &ListValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn as_ptr(&self) -> ListPtr {
        Rc::as_ptr(&self.0)
    }

    /// Write the list, printing `[...]` for a list already being written
    /// further up.
    fn fmt_nested(
        &self,
        f: &mut fmt::Formatter<'_>,
        open: &mut FxHashSet<ListPtr>,
    ) -> fmt::Result {
        if !open.insert(self.as_ptr()) {
            return f.write_str("[...]");
        }
        let result = ensure_sufficient_stack(|| -> fmt::Result {
            f.write_str("[")?;
            for (i, item) in self.0.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match item {
                    Value::List(inner) => inner.fmt_nested(f, open)?,
                    other => write!(f, "{other}")?,
                }
            }
            f.write_str("]")
        });
        open.remove(&self.as_ptr());
        result
    }

    /// Element-wise equality. A pair of lists already being compared
    /// further up counts as equal.
    fn eq_nested(&self, other: &ListValue, open: &mut FxHashSet<(ListPtr, ListPtr)>) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let pair = (self.as_ptr(), other.as_ptr());
        if !open.insert(pair) {
            return true;
        }
        let equal = ensure_sufficient_stack(|| {
            let (left, right) = (self.0.borrow(), other.0.borrow());
            left.len() == right.len()
                && left.iter().zip(right.iter()).all(|items| match items {
                    (Value::List(a), Value::List(b)) => a.eq_nested(b, open),
                    (a, b) => a == b,
                })
        });
        open.remove(&pair);
        equal
    }
}

impl PartialEq for ListValue {
    fn eq(&self, other: &Self) -> bool {
        self.eq_nested(other, &mut FxHashSet::default())
    }
}

impl fmt::Display for ListValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, &mut FxHashSet::default())
    }
}

/// A user-defined function. Equality is identity of the definition.
#[derive(Clone)]
pub struct FunctionValue {
    def: Rc<FunctionDef>,
    /// Source name, for display.
    label: &'static str,
}

impl FunctionValue {
    pub fn new(def: Rc<FunctionDef>, label: &'static str) -> Self {
        FunctionValue { def, label }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn params(&self) -> &[Name] {
        &self.def.params
    }

    pub fn def(&self) -> &FunctionDef {
        &self.def
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.def, &other.def)
    }
}

/// Host-provided callables seeded into the global table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    /// Two-argument operator, bound under its symbol.
    Binary(BinaryOp),
    /// `print(args...)`
    Print,
}

impl Builtin {
    /// Key the builtin is registered under.
    pub fn symbol(self) -> &'static str {
        match self {
            Builtin::Binary(op) => op.as_symbol(),
            Builtin::Print => "print",
        }
    }
}
