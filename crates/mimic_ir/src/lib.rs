//! Mimic IR - data model for runtime contract synthesis.
//!
//! This crate contains the plain data that the dispatch core reads:
//! - `TypeDesc`: runtime type descriptors for parameters and values
//! - `MethodSignature`: the matching key (name + ordered parameter types)
//! - `MethodDecl`: a contract member (signature, return type, declared faults)
//! - `Contract`: a named interface-like type descriptor
//! - `Value`: runtime argument and return values
//! - `Fault`: raised conditions with an explicit kind and a recursive cause
//!
//! # Design Philosophy
//!
//! - **Kinds, not hierarchies**: checked/runtime/fatal distinctions are a
//!   `FaultKind` tag; unwrapping is a walk over the `cause` field.
//! - **Cheap clones**: strings and lists are shared (`Arc`) so values and
//!   signatures can be copied into diagnostics freely.
//! - **Return type is not identity**: two signatures are equal iff name and
//!   parameter list match.

mod contract;
mod fault;
mod signature;
mod type_desc;
mod value;

pub use contract::{Contract, ContractKind};
pub use fault::{Fault, FaultChain, FaultKind, INVOCATION_FAILED, UNDECLARED_FAULT};
pub use signature::{MethodDecl, MethodSignature};
pub use type_desc::TypeDesc;
pub use value::{OpaqueValue, Value};
