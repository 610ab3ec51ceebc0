//! Contract registry.
//!
//! Holds the interface-like contracts a synthesized object claims to
//! implement, in registration order. Validation happens on `add`, so a bad
//! contract is reported while configuring rather than at the first call.

use rustc_hash::FxHashMap;

use mimic_ir::{Contract, Fault, MethodDecl, MethodSignature};

use crate::errors::{inherits_non_interface, not_interface_like, ValidationError};

/// Check that `contract` and every contract it extends are interface-like.
pub(crate) fn validate(contract: &Contract) -> Result<(), ValidationError> {
    if !contract.is_interface_like() {
        return Err(not_interface_like(contract));
    }
    if let Some(parent) = contract
        .lineage()
        .into_iter()
        .find(|c| !c.is_interface_like())
    {
        return Err(inherits_non_interface(contract, parent));
    }
    Ok(())
}

/// Ordered, validated set of contracts.
#[derive(Clone, Debug, Default)]
pub struct ContractRegistry {
    contracts: Vec<Contract>,
    index: FxHashMap<String, usize>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contract.
    ///
    /// Fails if the contract, or any contract it extends, is not
    /// interface-like. Re-adding a contract with an already registered name
    /// is a no-op.
    pub fn add(&mut self, contract: Contract) -> Result<(), ValidationError> {
        validate(&contract)?;
        if self.index.contains_key(contract.name()) {
            tracing::trace!(contract = contract.name(), "contract already registered");
            return Ok(());
        }
        tracing::debug!(
            contract = contract.name(),
            members = contract.methods().len(),
            "registered contract"
        );
        self.index
            .insert(contract.name().to_string(), self.contracts.len());
        self.contracts.push(contract);
        Ok(())
    }

    /// Registered contracts in registration order.
    #[inline]
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    /// Look up a directly registered contract by name.
    pub fn get(&self, name: &str) -> Option<&Contract> {
        self.index.get(name).map(|&i| &self.contracts[i])
    }

    /// Whether `name` was registered directly.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Find a registered contract that is, or extends, `name`.
    pub fn implementing(&self, name: &str) -> Option<&Contract> {
        self.get(name).or_else(|| {
            self.contracts
                .iter()
                .find(|c| c.is_subcontract_of(name))
        })
    }

    /// Whether `name` is registered or inherited by a registered contract.
    #[inline]
    pub fn implements(&self, name: &str) -> bool {
        self.implementing(name).is_some()
    }

    /// Every declaration of `signature`, one per declaring contract.
    pub fn declarations(&self, signature: &MethodSignature) -> Vec<&MethodDecl> {
        self.contracts
            .iter()
            .filter_map(|c| c.find_method(signature))
            .collect()
    }

    /// The first declaration of `signature`, in registration order.
    pub fn declaration(&self, signature: &MethodSignature) -> Option<&MethodDecl> {
        self.contracts.iter().find_map(|c| c.find_method(signature))
    }

    /// Union of all member signatures, first occurrence order.
    pub fn signatures(&self) -> Vec<MethodSignature> {
        let mut out: Vec<MethodSignature> = Vec::new();
        for contract in &self.contracts {
            for decl in contract.methods() {
                if !out.contains(&decl.signature) {
                    out.push(decl.signature.clone());
                }
            }
        }
        out
    }

    /// Whether a checked `fault` may cross the boundary of `signature`.
    ///
    /// A signature declared by several contracts permits only what every
    /// declaration permits. An undeclared signature permits nothing.
    pub fn permits(&self, signature: &MethodSignature, fault: &Fault) -> bool {
        let declarations = self.declarations(signature);
        !declarations.is_empty() && declarations.iter().all(|decl| decl.permits(fault))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
