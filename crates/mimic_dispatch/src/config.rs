//! Frozen dispatch configuration.
//!
//! Produced once by [`Synthesizer::build`](crate::Synthesizer::build) and
//! never mutated afterwards; every synthesized object shares it read-only.

use crate::classify::FaultClassifier;
use crate::fallback::FallbackDelegate;
use crate::handlers::HandlerTable;
use crate::registry::ContractRegistry;

/// What `build` does with contract members nothing can serve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnresolvedPolicy {
    /// Build anyway; such calls fail with `NoHandlerFoundError`.
    #[default]
    Lenient,
    /// Fail the build with a `ValidationError` listing the members.
    Strict,
}

impl UnresolvedPolicy {
    #[inline]
    pub fn rejects_unresolved(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Everything the dispatch core consults when serving a call.
#[derive(Clone, Debug, Default)]
pub struct DispatchConfig {
    pub(crate) contracts: ContractRegistry,
    pub(crate) handlers: HandlerTable,
    pub(crate) fallback: Option<FallbackDelegate>,
    pub(crate) classifier: FaultClassifier,
    pub(crate) unresolved: UnresolvedPolicy,
}

impl DispatchConfig {
    #[inline]
    pub fn contracts(&self) -> &ContractRegistry {
        &self.contracts
    }

    #[inline]
    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    #[inline]
    pub fn fallback(&self) -> Option<&FallbackDelegate> {
        self.fallback.as_ref()
    }

    #[inline]
    pub fn classifier(&self) -> &FaultClassifier {
        &self.classifier
    }

    #[inline]
    pub fn unresolved_policy(&self) -> UnresolvedPolicy {
        self.unresolved
    }
}
