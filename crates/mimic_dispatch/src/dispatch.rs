//! Dispatch core.
//!
//! Every call on a synthesized object runs the same state machine:
//!
//! 1. arguments are checked against the requested signature
//! 2. the handler table is consulted; a match is final
//! 3. otherwise the fallback is consulted if it supports the signature
//! 4. otherwise the call fails with [`NoHandlerFoundError`]
//!
//! Faults raised by handlers or the fallback are classified before they
//! leave, and values returned for a declared member are checked against
//! the declared return type.
//!
//! [`NoHandlerFoundError`]: crate::NoHandlerFoundError

use mimic_ir::{Fault, MethodSignature, TypeDesc, Value};

use crate::config::DispatchConfig;
use crate::errors::{bad_arguments, bad_return, no_handler_found, DispatchError};
use crate::fallback::FallbackDelegate;
use crate::handlers::Precision;
use crate::SynthesizedObject;

/// Where a signature would be served, without serving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The handler registered at `index`.
    Handler { index: usize, precision: Precision },
    /// The fallback target.
    Fallback,
    /// Nothing; a call fails with `NoHandlerFoundError`.
    Unresolved,
}

impl Resolution {
    #[inline]
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// Stateless dispatcher over a frozen configuration.
///
/// Owned by exactly one synthesized object, which passes itself as the
/// receiver of every call. Callers go through [`SynthesizedObject::invoke`].
#[derive(Debug)]
pub(crate) struct DispatchCore {
    config: DispatchConfig,
}

impl DispatchCore {
    pub(crate) fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub(crate) fn config(&self) -> &DispatchConfig {
        &self.config
    }

    fn supporting_fallback(&self, signature: &MethodSignature) -> Option<&FallbackDelegate> {
        self.config
            .fallback
            .as_ref()
            .filter(|fallback| fallback.supports(signature))
    }

    /// Decide how `signature` would be served.
    pub(crate) fn resolve(&self, signature: &MethodSignature) -> Resolution {
        let resolution = if let Some(found) = self.config.handlers.resolve(signature) {
            Resolution::Handler {
                index: found.index,
                precision: found.precision,
            }
        } else if self.supporting_fallback(signature).is_some() {
            Resolution::Fallback
        } else {
            Resolution::Unresolved
        };
        tracing::trace!(%signature, ?resolution, "resolved");
        resolution
    }

    /// Contract members that neither a handler nor the fallback serves.
    pub(crate) fn unresolved_signatures(&self) -> Vec<MethodSignature> {
        self.config
            .contracts
            .signatures()
            .into_iter()
            .filter(|signature| !self.resolve(signature).is_resolved())
            .collect()
    }

    /// Serve one call.
    #[tracing::instrument(level = "debug", skip_all, fields(
        object = receiver.id(),
        signature = %signature,
    ))]
    pub(crate) fn dispatch(
        &self,
        receiver: &SynthesizedObject,
        signature: &MethodSignature,
        args: &[Value],
    ) -> Result<Value, DispatchError> {
        if !signature.accepts(args) {
            return Err(bad_arguments(signature, args));
        }

        let permits = |fault: &Fault| self.config.contracts.permits(signature, fault);
        let classifier = &self.config.classifier;

        let value = if let Some(found) = self.config.handlers.resolve(signature) {
            tracing::trace!(index = found.index, precision = ?found.precision, "handler matched");
            found
                .entry
                .behavior
                .call(receiver, args)
                .map_err(|fault| classifier.classify(fault, permits))?
        } else if let Some(fallback) = self.supporting_fallback(signature) {
            fallback.invoke(signature, args, classifier, permits)?
        } else {
            let fallback = self.config.fallback.as_ref().map(FallbackDelegate::identity);
            tracing::debug!(?fallback, "no handler and no supporting fallback");
            return Err(no_handler_found(fallback, signature).into());
        };

        self.check_return(signature, value)
    }

    /// Hold a returned value to the first declaration of `signature`.
    /// Undeclared signatures return whatever was produced.
    fn check_return(
        &self,
        signature: &MethodSignature,
        value: Value,
    ) -> Result<Value, DispatchError> {
        let Some(decl) = self.config.contracts.declaration(signature) else {
            return Ok(value);
        };
        if decl.returns == TypeDesc::Void {
            return Ok(Value::Void);
        }
        if decl.admits_return(&value) {
            Ok(value)
        } else {
            Err(bad_return(signature, &decl.returns, &value))
        }
    }
}
