//! Synthesized objects and their contract views.
//!
//! A [`SynthesizedObject`] is a cheap handle (`Arc`) around a frozen
//! dispatch core. Clones share identity: they compare equal and hash the
//! same. A [`ContractView`] is the object seen through one contract, the
//! way a caller holding an interface reference would see it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use mimic_ir::{Contract, MethodSignature, Value};

use crate::config::DispatchConfig;
use crate::dispatch::{DispatchCore, Resolution};
use crate::errors::{contract_not_registered, undeclared_method, DispatchError, ValidationError};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

struct ObjectInner {
    id: u64,
    core: DispatchCore,
}

/// An object implementing a set of contracts chosen at runtime.
#[derive(Clone)]
pub struct SynthesizedObject {
    inner: Arc<ObjectInner>,
}

impl SynthesizedObject {
    pub(crate) fn new(config: DispatchConfig) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            inner: Arc::new(ObjectInner {
                id,
                core: DispatchCore::new(config),
            }),
        }
    }

    /// Process-unique identity of this object.
    #[inline]
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    #[inline]
    pub fn config(&self) -> &DispatchConfig {
        self.inner.core.config()
    }

    /// Call `signature` with `args`.
    ///
    /// This is the only way into dispatch, so a behavior always receives
    /// this object as its receiver. The dispatch core is not public:
    ///
    /// ```compile_fail
    /// use mimic_dispatch::{DispatchCore, Synthesizer};
    ///
    /// let object = Synthesizer::new().build().unwrap();
    /// let core = DispatchCore::new(object.config().clone());
    /// ```
    pub fn invoke(
        &self,
        signature: &MethodSignature,
        args: &[Value],
    ) -> Result<Value, DispatchError> {
        self.inner.core.dispatch(self, signature, args)
    }

    /// View this object through `contract`.
    pub fn cast_to(&self, contract: &Contract) -> Result<ContractView, ValidationError> {
        self.cast(contract.name())
    }

    /// View this object through the contract named `name`.
    ///
    /// Succeeds for registered contracts and for every contract they extend.
    pub fn cast(&self, name: &str) -> Result<ContractView, ValidationError> {
        let contract = self
            .config()
            .contracts()
            .implementing(name)
            .and_then(|registered| registered.lineage().into_iter().find(|c| c.name() == name))
            .cloned()
            .ok_or_else(|| contract_not_registered(name))?;
        Ok(ContractView {
            object: self.clone(),
            contract,
        })
    }

    /// Whether this object implements the contract named `name`.
    #[inline]
    pub fn implements(&self, name: &str) -> bool {
        self.config().contracts().implements(name)
    }

    /// Registered contracts in registration order.
    #[inline]
    pub fn contracts(&self) -> &[Contract] {
        self.config().contracts().contracts()
    }

    #[inline]
    pub fn resolve(&self, signature: &MethodSignature) -> Resolution {
        self.inner.core.resolve(signature)
    }

    /// Contract members whose calls would fail with `NoHandlerFoundError`.
    pub fn unresolved_signatures(&self) -> Vec<MethodSignature> {
        self.inner.core.unresolved_signatures()
    }

    /// `Type@address` of the fallback target, if one is configured.
    pub fn fallback_identity(&self) -> Option<&str> {
        self.config().fallback().map(|f| f.identity())
    }
}

impl PartialEq for SynthesizedObject {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for SynthesizedObject {}

impl Hash for SynthesizedObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Display for SynthesizedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Synthesized[")?;
        for (i, contract) in self.contracts().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", contract.name())?;
        }
        write!(f, "]#{}", self.id())
    }
}

impl fmt::Debug for SynthesizedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SynthesizedObject({self})")
    }
}

/// A synthesized object seen through one of its contracts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContractView {
    object: SynthesizedObject,
    contract: Contract,
}

impl ContractView {
    /// Call the member named `method` that accepts `args`.
    ///
    /// A member whose parameter types equal the argument types is preferred
    /// over one that merely accepts them.
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value, DispatchError> {
        let members = self.contract.methods_named(method);
        let decl = members
            .iter()
            .find(|decl| decl.signature.matches_exactly(args))
            .or_else(|| members.iter().find(|decl| decl.signature.accepts(args)))
            .ok_or_else(|| undeclared_method(&self.contract, method, args))?;
        self.object.invoke(&decl.signature, args)
    }

    /// Call a member of this view's contract by signature.
    pub fn invoke(
        &self,
        signature: &MethodSignature,
        args: &[Value],
    ) -> Result<Value, DispatchError> {
        if !self.contract.declares(signature) {
            return Err(undeclared_method(&self.contract, signature.name(), args));
        }
        self.object.invoke(signature, args)
    }

    /// View the same object through another contract.
    pub fn cast_to(&self, contract: &Contract) -> Result<ContractView, ValidationError> {
        self.object.cast_to(contract)
    }

    #[inline]
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    #[inline]
    pub fn object(&self) -> &SynthesizedObject {
        &self.object
    }
}

impl fmt::Display for ContractView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as {}", self.object, self.contract.name())
    }
}
