//! Runtime type descriptors.

use std::fmt;
use std::sync::Arc;

use crate::Value;

/// Descriptor for a parameter, return, or value type.
///
/// Primitive descriptors are inline; user types are named. `Any` is the
/// top type and accepts every value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Void,
    Bool,
    Int,
    Float,
    Char,
    Str,
    List,
    /// Top type: assignable from every descriptor.
    Any,
    /// A user-defined or opaque type, identified by name.
    Named(Arc<str>),
}

impl TypeDesc {
    /// Create a named descriptor.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        TypeDesc::Named(name.into())
    }

    /// Runtime descriptor of a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Void => TypeDesc::Void,
            Value::Bool(_) => TypeDesc::Bool,
            Value::Int(_) => TypeDesc::Int,
            Value::Float(_) => TypeDesc::Float,
            Value::Char(_) => TypeDesc::Char,
            Value::Str(_) => TypeDesc::Str,
            Value::List(_) => TypeDesc::List,
            Value::Opaque(o) => TypeDesc::Named(Arc::clone(&o.type_name)),
        }
    }

    /// Human-readable name of the descriptor.
    pub fn name(&self) -> &str {
        match self {
            TypeDesc::Void => "Void",
            TypeDesc::Bool => "Bool",
            TypeDesc::Int => "Int",
            TypeDesc::Float => "Float",
            TypeDesc::Char => "Char",
            TypeDesc::Str => "Str",
            TypeDesc::List => "List",
            TypeDesc::Any => "Any",
            TypeDesc::Named(name) => &**name,
        }
    }

    /// Whether a value of type `other` may be passed where `self` is expected.
    #[inline]
    pub fn is_assignable_from(&self, other: &TypeDesc) -> bool {
        matches!(self, TypeDesc::Any) || self == other
    }

    /// Whether `value` may be passed where `self` is expected.
    #[inline]
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(self, TypeDesc::Any) || *self == TypeDesc::of(value)
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
