//! Contract descriptors.
//!
//! A `Contract` is a named type descriptor with a set of member
//! declarations and the super-contracts it extends. Only interface-like
//! contracts may be implemented by a synthesized object; the kind is kept so
//! the registry can reject everything else at configuration time.
//!
//! Contracts are immutable once shared: the fluent `method`/`extends`
//! helpers copy-on-write the shared data.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::{MethodDecl, MethodSignature};

/// What sort of type a contract descriptor names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Interface,
    Class,
    AbstractClass,
    Enum,
    Record,
}

impl ContractKind {
    /// Whether a synthesized object may claim to implement this kind.
    #[inline]
    pub fn is_interface_like(self) -> bool {
        matches!(self, Self::Interface)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Class => "class",
            Self::AbstractClass => "abstract class",
            Self::Enum => "enum",
            Self::Record => "record",
        }
    }
}

#[derive(Clone, Debug)]
struct ContractData {
    name: Arc<str>,
    kind: ContractKind,
    methods: Vec<MethodDecl>,
    supers: Vec<Contract>,
}

/// A named type descriptor. Identity is the name.
#[derive(Clone)]
pub struct Contract {
    data: Arc<ContractData>,
}

impl Contract {
    /// Create a contract descriptor of the given kind with no members.
    pub fn new(name: impl Into<Arc<str>>, kind: ContractKind) -> Self {
        Self {
            data: Arc::new(ContractData {
                name: name.into(),
                kind,
                methods: Vec::new(),
                supers: Vec::new(),
            }),
        }
    }

    /// Create an interface descriptor.
    pub fn interface(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, ContractKind::Interface)
    }

    /// Create a concrete class descriptor.
    pub fn class(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, ContractKind::Class)
    }

    /// Add a member declaration.
    #[must_use]
    pub fn method(mut self, decl: MethodDecl) -> Self {
        Arc::make_mut(&mut self.data).methods.push(decl);
        self
    }

    /// Add a super-contract whose members are inherited.
    #[must_use]
    pub fn extends(mut self, parent: Contract) -> Self {
        Arc::make_mut(&mut self.data).supers.push(parent);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.data.name
    }

    #[inline]
    pub fn kind(&self) -> ContractKind {
        self.data.kind
    }

    #[inline]
    pub fn is_interface_like(&self) -> bool {
        self.data.kind.is_interface_like()
    }

    /// Direct super-contracts.
    #[inline]
    pub fn supers(&self) -> &[Contract] {
        &self.data.supers
    }

    /// Members declared directly on this contract.
    #[inline]
    pub fn own_methods(&self) -> &[MethodDecl] {
        &self.data.methods
    }

    /// All members, own first, then inherited in `extends` order.
    ///
    /// A signature declared more than once appears once, with the first
    /// declaration found.
    pub fn methods(&self) -> Vec<&MethodDecl> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        self.collect_methods(&mut seen, &mut out);
        out
    }

    fn collect_methods<'a>(
        &'a self,
        seen: &mut FxHashSet<&'a MethodSignature>,
        out: &mut Vec<&'a MethodDecl>,
    ) {
        for decl in &self.data.methods {
            if seen.insert(&decl.signature) {
                out.push(decl);
            }
        }
        for parent in &self.data.supers {
            parent.collect_methods(seen, out);
        }
    }

    /// Find the member declaration for `signature`, own members first.
    pub fn find_method(&self, signature: &MethodSignature) -> Option<&MethodDecl> {
        self.data
            .methods
            .iter()
            .find(|decl| decl.signature == *signature)
            .or_else(|| {
                self.data
                    .supers
                    .iter()
                    .find_map(|parent| parent.find_method(signature))
            })
    }

    /// Whether this contract (or an ancestor) declares `signature`.
    #[inline]
    pub fn declares(&self, signature: &MethodSignature) -> bool {
        self.find_method(signature).is_some()
    }

    /// All members with the given name, in `methods()` order.
    pub fn methods_named(&self, name: &str) -> Vec<&MethodDecl> {
        self.methods()
            .into_iter()
            .filter(|decl| decl.signature.name() == name)
            .collect()
    }

    /// Whether `name` is this contract or one of its ancestors.
    pub fn is_subcontract_of(&self, name: &str) -> bool {
        self.name() == name || self.data.supers.iter().any(|p| p.is_subcontract_of(name))
    }

    /// This contract and all ancestors, depth-first, without repeats.
    pub fn lineage(&self) -> Vec<&Contract> {
        let mut out: Vec<&Contract> = Vec::new();
        let mut stack = vec![self];
        while let Some(contract) = stack.pop() {
            if out.iter().any(|c| c.name() == contract.name()) {
                continue;
            }
            out.push(contract);
            stack.extend(contract.data.supers.iter().rev());
        }
        out
    }
}

impl PartialEq for Contract {
    fn eq(&self, other: &Self) -> bool {
        self.data.name == other.data.name
    }
}

impl Eq for Contract {}

impl Hash for Contract {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.name.hash(state);
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("name", &self.data.name)
            .field("kind", &self.data.kind)
            .field("methods", &self.data.methods.len())
            .field("supers", &self.data.supers.len())
            .finish()
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.data.kind.as_str(), self.data.name)
    }
}

#[cfg(test)]
mod tests;
