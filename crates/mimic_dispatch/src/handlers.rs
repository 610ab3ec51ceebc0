//! Handler table: ordered (matcher, behavior) bindings.
//!
//! # Resolution Order
//!
//! Every matcher reports how precisely it accepts a signature:
//! 1. `Exact`: name and full parameter list are equal
//! 2. `Compatible`: same name and arity, parameters assignable
//! 3. `NameOnly`: same name (optionally same arity)
//! 4. `Predicate`: an arbitrary test over the signature
//!
//! The most precise match wins regardless of registration order; among
//! equally precise matches the earliest registered entry wins. Lookup is a
//! single pass over the entries and stops at the first exact match.

use std::fmt;
use std::sync::Arc;

use mimic_ir::{Fault, MethodSignature, TypeDesc, Value};

use crate::SynthesizedObject;

/// Per-method behavior attached to a synthesized object.
///
/// `receiver` is the synthesized object itself, so a behavior can call
/// other contract methods through it.
pub trait Behavior: Send + Sync {
    fn call(&self, receiver: &SynthesizedObject, args: &[Value]) -> Result<Value, Fault>;
}

impl<F> Behavior for F
where
    F: Fn(&SynthesizedObject, &[Value]) -> Result<Value, Fault> + Send + Sync,
{
    fn call(&self, receiver: &SynthesizedObject, args: &[Value]) -> Result<Value, Fault> {
        self(receiver, args)
    }
}

/// Signature test used by `Matcher::Predicate`.
pub type SignatureTest = Arc<dyn Fn(&MethodSignature) -> bool + Send + Sync>;

/// How precisely a matcher accepted a signature. Greater is more precise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    Predicate,
    NameOnly,
    Compatible,
    Exact,
}

/// Decides which signatures a handler serves.
#[derive(Clone)]
pub enum Matcher {
    /// Exactly this name and parameter list.
    Exact(MethodSignature),
    /// Same name and arity; every requested parameter type must be
    /// assignable to the matcher's parameter type.
    Compatible(MethodSignature),
    /// Any signature with this name, optionally restricted to an arity.
    Name {
        name: Arc<str>,
        arity: Option<usize>,
    },
    /// Any signature the test accepts. `label` is used in diagnostics.
    Predicate { label: Arc<str>, test: SignatureTest },
}

impl Matcher {
    pub fn exact(name: impl Into<Arc<str>>, params: impl IntoIterator<Item = TypeDesc>) -> Self {
        Matcher::Exact(MethodSignature::new(name, params))
    }

    pub fn compatible(
        name: impl Into<Arc<str>>,
        params: impl IntoIterator<Item = TypeDesc>,
    ) -> Self {
        Matcher::Compatible(MethodSignature::new(name, params))
    }

    pub fn name(name: impl Into<Arc<str>>) -> Self {
        Matcher::Name {
            name: name.into(),
            arity: None,
        }
    }

    pub fn name_with_arity(name: impl Into<Arc<str>>, arity: usize) -> Self {
        Matcher::Name {
            name: name.into(),
            arity: Some(arity),
        }
    }

    pub fn predicate(
        label: impl Into<Arc<str>>,
        test: impl Fn(&MethodSignature) -> bool + Send + Sync + 'static,
    ) -> Self {
        Matcher::Predicate {
            label: label.into(),
            test: Arc::new(test),
        }
    }

    /// How precisely this matcher accepts `signature`, or `None`.
    pub fn precision(&self, signature: &MethodSignature) -> Option<Precision> {
        match self {
            Matcher::Exact(expected) => (expected == signature).then_some(Precision::Exact),
            Matcher::Compatible(pattern) => {
                if pattern == signature {
                    return Some(Precision::Exact);
                }
                let compatible = pattern.name() == signature.name()
                    && pattern.arity() == signature.arity()
                    && pattern
                        .params()
                        .iter()
                        .zip(signature.params())
                        .all(|(accepting, requested)| accepting.is_assignable_from(requested));
                compatible.then_some(Precision::Compatible)
            }
            Matcher::Name { name, arity } => (**name == *signature.name()
                && arity.map_or(true, |n| n == signature.arity()))
            .then_some(Precision::NameOnly),
            Matcher::Predicate { test, .. } => test(signature).then_some(Precision::Predicate),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Exact(sig) => write!(f, "{sig}"),
            Matcher::Compatible(sig) => write!(f, "~{sig}"),
            Matcher::Name { name, arity: None } => write!(f, "{name}(..)"),
            Matcher::Name {
                name,
                arity: Some(n),
            } => write!(f, "{name}/{n}"),
            Matcher::Predicate { label, .. } => write!(f, "<{label}>"),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matcher({self})")
    }
}

/// One binding in the handler table.
#[derive(Clone)]
pub struct HandlerEntry {
    pub matcher: Matcher,
    pub behavior: Arc<dyn Behavior>,
}

impl fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// Result of a successful handler lookup.
#[derive(Clone, Copy, Debug)]
pub struct HandlerMatch<'a> {
    /// Registration index of the entry.
    pub index: usize,
    pub precision: Precision,
    pub entry: &'a HandlerEntry,
}

/// Ordered handler bindings.
#[derive(Clone, Debug, Default)]
pub struct HandlerTable {
    entries: Vec<HandlerEntry>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding. Behaviors are not validated here.
    pub fn register(&mut self, matcher: Matcher, behavior: Arc<dyn Behavior>) {
        tracing::debug!(matcher = %matcher, index = self.entries.len(), "registered handler");
        self.entries.push(HandlerEntry { matcher, behavior });
    }

    /// Find the handler for `signature`: most precise first, then earliest.
    pub fn resolve(&self, signature: &MethodSignature) -> Option<HandlerMatch<'_>> {
        let mut best: Option<HandlerMatch<'_>> = None;
        for (index, entry) in self.entries.iter().enumerate() {
            let Some(precision) = entry.matcher.precision(signature) else {
                continue;
            };
            let candidate = HandlerMatch {
                index,
                precision,
                entry,
            };
            if precision == Precision::Exact {
                return Some(candidate);
            }
            if best.map_or(true, |b| precision > b.precision) {
                best = Some(candidate);
            }
        }
        best
    }

    /// Whether some handler accepts `signature`.
    #[inline]
    pub fn covers(&self, signature: &MethodSignature) -> bool {
        self.resolve(signature).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&HandlerEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandlerEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
