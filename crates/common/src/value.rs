//! Runtime value representation for the microvm.
//!
//! Values are what live on the operand stack and in the variable store.
//! Every variant except [`Value::List`] is copied on push and store. Lists
//! are shared: cloning a list value clones the handle, so a subscript store
//! through one handle is visible through every other.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::type_tag::TypeTag;

/// A shared, mutable list of values.
///
/// `Clone` produces a new handle to the same backing sequence.
#[derive(Clone, Default)]
pub struct List(Rc<RefCell<Vec<Value>>>);

impl List {
    /// Wrap a vector as a fresh list with its own identity.
    pub fn new(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Element at `index`, or `None` when out of bounds.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Replace the element at `index` in place. Returns `false` when out of
    /// bounds, leaving the list untouched.
    pub fn set(&self, index: usize, value: Value) -> bool {
        let mut items = self.0.borrow_mut();
        match items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Copy of the current elements. Nested lists stay shared.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// True when both handles refer to the same backing sequence.
    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn id(&self) -> *const RefCell<Vec<Value>> {
        Rc::as_ptr(&self.0)
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        List::new(items)
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(items) => f.debug_list().entries(items.iter()).finish(),
            Err(_) => f.write_str("[<borrowed>]"),
        }
    }
}

/// Runtime value representation.
#[derive(Debug, Clone)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(i64),
    /// IEEE 754 64-bit float.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Unicode codepoint.
    Char(char),
    /// UTF-8 string.
    Str(String),
    /// Shared, mutable list.
    List(List),
    /// The built-in `print` callable pushed by `LOAD_GLOBAL print`.
    NativePrint,
}

// Floats compare bitwise so that Value is reflexive; arithmetic comparisons
// go through the numeric helpers in the VM, never through this impl.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::NativePrint, Value::NativePrint) => true,
            _ => false,
        }
    }
}

impl Value {
    /// Build a fresh list value from its elements.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(List::new(items))
    }

    /// Returns the type tag for this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Bool(_) => TypeTag::Bool,
            Value::Char(_) => TypeTag::Char,
            Value::Str(_) => TypeTag::Str,
            Value::List(_) => TypeTag::List,
            Value::NativePrint => TypeTag::Native,
        }
    }

    /// Truthiness used by conditional jumps and the logical operators.
    ///
    /// Numbers are true when nonzero, strings and lists when non-empty.
    /// Chars and the print sentinel are always true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Char(_) | Value::NativePrint => true,
        }
    }

    fn write_display(
        &self,
        f: &mut fmt::Formatter<'_>,
        open: &mut Vec<*const RefCell<Vec<Value>>>,
    ) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(f, *x),
            Value::Bool(b) => write!(f, "{b}"),
            // Printed as the character itself, not its code point.
            Value::Char(c) => write!(f, "{c}"),
            Value::Str(s) => f.write_str(s),
            Value::NativePrint => f.write_str("<built-in function print>"),
            Value::List(list) => {
                if open.contains(&list.id()) {
                    return f.write_str("[...]");
                }
                open.push(list.id());
                f.write_str("[")?;
                for (i, item) in list.to_vec().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    item.write_display(f, open)?;
                }
                open.pop();
                f.write_str("]")
            }
        }
    }
}

/// Shortest round-trip digits, switching to `d.ddde±XX` when the decimal
/// exponent is below -4 or at least 6 (`1e+06`, `1.5e-05`). Infinities
/// print as `+Inf`/`-Inf`.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "+Inf" } else { "-Inf" });
    }
    let sci = format!("{x:e}");
    if let Some((mantissa, exp)) = sci.split_once('e') {
        if let Ok(exp) = exp.parse::<i32>() {
            if x != 0.0 && !(-4..6).contains(&exp) {
                let sign = if exp < 0 { '-' } else { '+' };
                return write!(f, "{mantissa}e{sign}{:02}", exp.abs());
            }
        }
    }
    write!(f, "{x}")
}

/// Renders a value the way `print` shows it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_display(f, &mut Vec::new())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}
