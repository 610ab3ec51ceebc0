//! Fallback delegation to a pre-existing object.
//!
//! A [`Target`] is a concrete object reachable by signature. The
//! [`FallbackDelegate`] serves every call no handler matched, provided the
//! target exposes the signature itself or one of the contracts the delegate
//! was told the target implements declares it.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use mimic_ir::{Contract, Fault, MethodSignature, TypeDesc, Value};

use crate::classify::FaultClassifier;
use crate::errors::ValidationError;
use crate::registry::validate;

/// A concrete object that can be invoked by signature.
pub trait Target: Send + Sync {
    /// Name of the object's concrete type, used in diagnostics.
    fn type_name(&self) -> &str;

    /// The methods this object exposes.
    fn signatures(&self) -> Vec<MethodSignature>;

    /// Whether this object exposes `signature`.
    fn responds_to(&self, signature: &MethodSignature) -> bool {
        self.signatures().contains(signature)
    }

    /// Call `signature` with `args`.
    fn invoke(&self, signature: &MethodSignature, args: &[Value]) -> Result<Value, Fault>;
}

/// Body of an [`ObjectTarget`] method.
pub type TargetMethod = Arc<dyn Fn(&[Value]) -> Result<Value, Fault> + Send + Sync>;

/// A [`Target`] assembled from closures.
///
/// State shared between methods lives in whatever the closures capture.
#[derive(Clone)]
pub struct ObjectTarget {
    type_name: Arc<str>,
    order: Vec<MethodSignature>,
    methods: FxHashMap<MethodSignature, TargetMethod>,
}

impl ObjectTarget {
    pub fn new(type_name: impl Into<Arc<str>>) -> Self {
        Self {
            type_name: type_name.into(),
            order: Vec::new(),
            methods: FxHashMap::default(),
        }
    }

    /// Expose a method. A later definition of the same signature replaces
    /// the earlier body.
    #[must_use]
    pub fn method(
        mut self,
        name: impl Into<Arc<str>>,
        params: impl IntoIterator<Item = TypeDesc>,
        body: impl Fn(&[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
    ) -> Self {
        let signature = MethodSignature::new(name, params);
        if !self.methods.contains_key(&signature) {
            self.order.push(signature.clone());
        }
        self.methods.insert(signature, Arc::new(body));
        self
    }
}

impl Target for ObjectTarget {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn signatures(&self) -> Vec<MethodSignature> {
        self.order.clone()
    }

    fn responds_to(&self, signature: &MethodSignature) -> bool {
        self.methods.contains_key(signature)
    }

    fn invoke(&self, signature: &MethodSignature, args: &[Value]) -> Result<Value, Fault> {
        match self.methods.get(signature) {
            Some(body) => body(args),
            None => Err(Fault::runtime(
                "NoSuchMethod",
                format!("{} has no method {signature}", self.type_name),
            )),
        }
    }
}

impl fmt::Debug for ObjectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectTarget")
            .field("type_name", &self.type_name)
            .field("methods", &self.order)
            .finish()
    }
}

/// Routes unmatched calls to a shared target.
#[derive(Clone)]
pub struct FallbackDelegate {
    target: Arc<dyn Target>,
    declared: Vec<Contract>,
    identity: String,
}

impl FallbackDelegate {
    pub fn new(target: Arc<dyn Target>) -> Self {
        let identity = format!(
            "{}@{:p}",
            target.type_name(),
            Arc::as_ptr(&target).cast::<()>()
        );
        Self {
            target,
            declared: Vec::new(),
            identity,
        }
    }

    /// Record that the target implements `contract`, so every member of it
    /// is routed to the target.
    ///
    /// Fails if the contract, or any contract it extends, is not
    /// interface-like.
    pub fn declaring(mut self, contract: Contract) -> Result<Self, ValidationError> {
        validate(&contract)?;
        if !self.declared.contains(&contract) {
            self.declared.push(contract);
        }
        Ok(self)
    }

    /// Whether calls to `signature` may be routed to the target.
    pub fn supports(&self, signature: &MethodSignature) -> bool {
        self.target.responds_to(signature) || self.declared.iter().any(|c| c.declares(signature))
    }

    /// Call the target. A failure is enveloped as an invocation failure and
    /// classified before it is returned.
    pub fn invoke(
        &self,
        signature: &MethodSignature,
        args: &[Value],
        classifier: &FaultClassifier,
        permits: impl Fn(&Fault) -> bool,
    ) -> Result<Value, Fault> {
        tracing::trace!(fallback = %self.identity, %signature, "delegating to fallback");
        self.target
            .invoke(signature, args)
            .map_err(|fault| classifier.classify(Fault::invocation_failed(fault), permits))
    }

    /// `Type@address` rendering of the target.
    #[inline]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[inline]
    pub fn target(&self) -> &Arc<dyn Target> {
        &self.target
    }

    /// Contracts explicitly declared for the target.
    #[inline]
    pub fn declared(&self) -> &[Contract] {
        &self.declared
    }
}

impl fmt::Debug for FallbackDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackDelegate")
            .field("identity", &self.identity)
            .field("declared", &self.declared)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
