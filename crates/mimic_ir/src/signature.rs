//! Method signatures and contract member declarations.
//!
//! `MethodSignature` is the matching key used everywhere in dispatch.
//! `MethodDecl` adds what a contract says about a member beyond its key:
//! the return type and the checked faults it is allowed to raise.

use std::fmt;
use std::sync::Arc;

use crate::{Fault, TypeDesc, Value};

/// Key for method lookup: name plus ordered parameter types.
///
/// Two signatures are equal iff the name and the full parameter list
/// match. The return type is not part of the key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    name: Arc<str>,
    params: Arc<[TypeDesc]>,
}

impl MethodSignature {
    /// Create a signature from a name and parameter types.
    pub fn new(name: impl Into<Arc<str>>, params: impl IntoIterator<Item = TypeDesc>) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn params(&self) -> &[TypeDesc] {
        &self.params
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether `args` can be passed to a method with this signature.
    pub fn accepts(&self, args: &[Value]) -> bool {
        args.len() == self.params.len()
            && self
                .params
                .iter()
                .zip(args)
                .all(|(param, arg)| param.accepts(arg))
    }

    /// Whether every argument's runtime type equals the declared parameter type.
    pub fn matches_exactly(&self, args: &[Value]) -> bool {
        args.len() == self.params.len()
            && self
                .params
                .iter()
                .zip(args)
                .all(|(param, arg)| *param == TypeDesc::of(arg))
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodSignature({self})")
    }
}

/// A member of a contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDecl {
    pub signature: MethodSignature,
    /// Declared return type. `Void` discards whatever a behavior returns.
    pub returns: TypeDesc,
    /// Checked fault types this member may raise across the boundary.
    pub throws: Vec<Arc<str>>,
}

impl MethodDecl {
    /// Declare a `Void` method with no declared faults.
    pub fn new(name: impl Into<Arc<str>>, params: impl IntoIterator<Item = TypeDesc>) -> Self {
        Self {
            signature: MethodSignature::new(name, params),
            returns: TypeDesc::Void,
            throws: Vec::new(),
        }
    }

    /// Set the declared return type.
    #[must_use]
    pub fn returns(mut self, returns: TypeDesc) -> Self {
        self.returns = returns;
        self
    }

    /// Add a checked fault type to the declared set.
    #[must_use]
    pub fn throws(mut self, fault_type: impl Into<Arc<str>>) -> Self {
        self.throws.push(fault_type.into());
        self
    }

    /// Whether `fault` is an instance of one of the declared fault types.
    pub fn permits(&self, fault: &Fault) -> bool {
        self.throws.iter().any(|t| fault.is_instance_of(t))
    }

    /// Whether `value` satisfies the declared return type.
    pub fn admits_return(&self, value: &Value) -> bool {
        match &self.returns {
            TypeDesc::Void | TypeDesc::Any => true,
            declared => declared.accepts(value),
        }
    }
}
