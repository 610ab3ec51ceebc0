//! `Synthesizer` for configuring and building synthesized objects.

use std::sync::Arc;

use mimic_ir::{Contract, Fault, MethodSignature, TypeDesc, Value};

use crate::classify::FaultClassifier;
use crate::config::{DispatchConfig, UnresolvedPolicy};
use crate::errors::{unresolved_members, ValidationError};
use crate::fallback::{FallbackDelegate, Target};
use crate::handlers::{Behavior, HandlerTable, Matcher};
use crate::registry::ContractRegistry;
use crate::SynthesizedObject;

/// Builder for [`SynthesizedObject`]s.
///
/// Contracts are validated as they are added. Everything else is checked
/// by [`build`](Self::build), after which the configuration is frozen.
///
/// ```
/// use mimic_dispatch::Synthesizer;
/// use mimic_ir::{Contract, MethodDecl, TypeDesc, Value};
///
/// let greeter = Contract::interface("Greeter")
///     .method(MethodDecl::new("greet", [TypeDesc::Str]).returns(TypeDesc::Str));
///
/// let object = Synthesizer::new()
///     .contract(greeter.clone())?
///     .on("greet", [TypeDesc::Str], |_, args| {
///         let name = args[0].as_str().unwrap_or_default();
///         Ok(Value::string(format!("Hello, {name}")))
///     })
///     .build()?;
///
/// let view = object.cast_to(&greeter)?;
/// assert_eq!(view.call("greet", &[Value::string("Alice")])?, Value::string("Hello, Alice"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Synthesizer {
    contracts: ContractRegistry,
    handlers: HandlerTable,
    fallback: Option<FallbackDelegate>,
    classifier: FaultClassifier,
    unresolved: UnresolvedPolicy,
}

impl Synthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contract the object will implement.
    pub fn contract(mut self, contract: Contract) -> Result<Self, ValidationError> {
        self.contracts.add(contract)?;
        Ok(self)
    }

    /// Add several contracts, stopping at the first invalid one.
    pub fn contracts(
        mut self,
        contracts: impl IntoIterator<Item = Contract>,
    ) -> Result<Self, ValidationError> {
        for contract in contracts {
            self.contracts.add(contract)?;
        }
        Ok(self)
    }

    /// Bind `behavior` to every signature `matcher` accepts.
    #[must_use]
    pub fn handle(mut self, matcher: Matcher, behavior: impl Behavior + 'static) -> Self {
        self.handlers.register(matcher, Arc::new(behavior));
        self
    }

    /// Bind `behavior` to exactly `name(params)`.
    #[must_use]
    pub fn on<F>(
        self,
        name: impl Into<Arc<str>>,
        params: impl IntoIterator<Item = TypeDesc>,
        behavior: F,
    ) -> Self
    where
        F: Fn(&SynthesizedObject, &[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
    {
        self.handle(Matcher::exact(name, params), behavior)
    }

    /// Bind `behavior` to `name` calls whose parameters are assignable to `params`.
    #[must_use]
    pub fn on_compatible<F>(
        self,
        name: impl Into<Arc<str>>,
        params: impl IntoIterator<Item = TypeDesc>,
        behavior: F,
    ) -> Self
    where
        F: Fn(&SynthesizedObject, &[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
    {
        self.handle(Matcher::compatible(name, params), behavior)
    }

    /// Bind `behavior` to every overload of `name`.
    #[must_use]
    pub fn on_name<F>(self, name: impl Into<Arc<str>>, behavior: F) -> Self
    where
        F: Fn(&SynthesizedObject, &[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
    {
        self.handle(Matcher::name(name), behavior)
    }

    /// Bind `behavior` to every signature `test` accepts.
    #[must_use]
    pub fn on_predicate<F>(
        self,
        label: impl Into<Arc<str>>,
        test: impl Fn(&MethodSignature) -> bool + Send + Sync + 'static,
        behavior: F,
    ) -> Self
    where
        F: Fn(&SynthesizedObject, &[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
    {
        self.handle(Matcher::predicate(label, test), behavior)
    }

    /// Route unmatched calls to `delegate`. Replaces any earlier fallback.
    #[must_use]
    pub fn fallback(mut self, delegate: FallbackDelegate) -> Self {
        self.fallback = Some(delegate);
        self
    }

    /// Route unmatched calls to `target`.
    #[must_use]
    pub fn fallback_to(self, target: Arc<dyn Target>) -> Self {
        self.fallback(FallbackDelegate::new(target))
    }

    /// Message used for undeclared-fault wrappers.
    #[must_use]
    pub fn undeclared_message(mut self, message: impl Into<String>) -> Self {
        self.classifier = self.classifier.with_undeclared_message(message);
        self
    }

    #[must_use]
    pub fn unresolved_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = policy;
        self
    }

    /// Freeze the configuration into a synthesized object.
    ///
    /// Under [`UnresolvedPolicy::Strict`] this fails on the first contract
    /// (in registration order) with members nothing can serve.
    pub fn build(self) -> Result<SynthesizedObject, ValidationError> {
        let object = SynthesizedObject::new(DispatchConfig {
            contracts: self.contracts,
            handlers: self.handlers,
            fallback: self.fallback,
            classifier: self.classifier,
            unresolved: self.unresolved,
        });

        if object.config().unresolved_policy().rejects_unresolved() {
            for contract in object.contracts() {
                let missing: Vec<MethodSignature> = contract
                    .methods()
                    .into_iter()
                    .map(|decl| &decl.signature)
                    .filter(|signature| !object.resolve(signature).is_resolved())
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    return Err(unresolved_members(contract.name(), missing));
                }
            }
        }

        tracing::debug!(
            object = %object,
            handlers = object.config().handlers().len(),
            fallback = object.fallback_identity(),
            "synthesized object"
        );
        Ok(object)
    }
}

#[cfg(test)]
mod tests;
