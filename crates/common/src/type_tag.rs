//! Type tags describing the runtime variant of a [`Value`](crate::Value).
//!
//! Tags are descriptive metadata only. The variable store recomputes the tag
//! on every store; nothing checks a tag before an operation.

use std::fmt;

/// Identifies the runtime variant of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Signed 64-bit integer.
    Int,
    /// IEEE 754 64-bit float.
    Float,
    /// Boolean.
    Bool,
    /// Single Unicode scalar value.
    Char,
    /// UTF-8 string.
    Str,
    /// Shared, mutable list of values.
    List,
    /// The built-in `print` callable.
    Native,
}

/// All type tags, in definition order.
pub const ALL_TYPE_TAGS: [TypeTag; 7] = [
    TypeTag::Int,
    TypeTag::Float,
    TypeTag::Bool,
    TypeTag::Char,
    TypeTag::Str,
    TypeTag::List,
    TypeTag::Native,
];

impl TypeTag {
    /// Returns the lowercase name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Bool => "bool",
            TypeTag::Char => "char",
            TypeTag::Str => "string",
            TypeTag::List => "list",
            TypeTag::Native => "native",
        }
    }

    /// True for the two tags that take part in numeric promotion.
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeTag::Int | TypeTag::Float)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
