//! Error types for configuration and dispatch.
//!
//! `ValidationError` is raised while configuring (and by `cast_to`);
//! `DispatchError` is what a call on a synthesized object can return.
//! Factory functions are the construction API so every message is
//! produced in one place.

use std::fmt;

use mimic_ir::{Contract, ContractKind, Fault, MethodSignature, TypeDesc, Value};

/// A contract-level configuration violation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{type_name}` {reason}")]
pub struct ValidationError {
    /// Name of the offending type.
    pub type_name: String,
    pub reason: ValidationReason,
}

/// Why a contract was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationReason {
    /// The type is not an interface-like abstract contract.
    NotInterfaceLike { kind: ContractKind },
    /// The contract extends a type that is not interface-like.
    InheritsNonInterface { parent: String, kind: ContractKind },
    /// `cast_to` named a contract the object does not implement.
    NotRegistered,
    /// Strict build: members with neither a handler nor a supporting fallback.
    Unresolved { signatures: Vec<MethodSignature> },
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInterfaceLike { kind } => {
                write!(f, "is not an interface-like contract (it is a {})", kind.as_str())
            }
            Self::InheritsNonInterface { parent, kind } => write!(
                f,
                "extends `{parent}`, which is not an interface-like contract (it is a {})",
                kind.as_str()
            ),
            Self::NotRegistered => {
                write!(f, "is not a contract implemented by this synthesized object")
            }
            Self::Unresolved { signatures } => {
                write!(f, "has members with no handler and no supporting fallback: ")?;
                for (i, sig) in signatures.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{sig}")?;
                }
                Ok(())
            }
        }
    }
}

/// No handler matched and the fallback (if any) does not support the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no handler found for `{signature}` (fallback: {})", .fallback.as_deref().unwrap_or("none"))]
pub struct NoHandlerFoundError {
    /// Identity of the fallback object, if one was configured.
    pub fallback: Option<String>,
    pub signature: MethodSignature,
}

/// Failure of a call on a synthesized object.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    NoHandler(#[from] NoHandlerFoundError),
    /// A view was asked for a member its contract does not declare.
    #[error("`{contract}` declares no method `{method}` accepting ({args})")]
    UndeclaredMethod {
        contract: String,
        method: String,
        args: String,
    },
    /// Arguments do not fit the requested signature.
    #[error("`{signature}` cannot be called with ({got})")]
    BadArguments {
        signature: MethodSignature,
        got: String,
    },
    /// A handler or fallback returned a value of the wrong type.
    #[error("`{signature}` must return {expected}, got {got}")]
    BadReturn {
        signature: MethodSignature,
        expected: TypeDesc,
        got: String,
    },
    /// A classified fault raised by a handler or the fallback.
    #[error(transparent)]
    Fault(#[from] Fault),
}

impl DispatchError {
    /// The raised fault, if this error carries one.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// Whether this error is an unrecoverable fault.
    pub fn is_fatal(&self) -> bool {
        self.fault().is_some_and(Fault::is_fatal)
    }

    /// Type name used when this error is re-raised as a `Fault`.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::NoHandler(_) => "NoHandlerFoundError",
            Self::UndeclaredMethod { .. } => "UndeclaredMethod",
            Self::BadArguments { .. } => "BadArguments",
            Self::BadReturn { .. } => "BadReturn",
            Self::Fault(fault) => &*fault.type_name,
        }
    }
}

/// Lets behaviors that call back into their receiver propagate with `?`.
impl From<DispatchError> for Fault {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Fault(fault) => fault,
            other => Fault::runtime(other.type_name().to_string(), other.to_string()),
        }
    }
}

impl From<ValidationError> for Fault {
    fn from(err: ValidationError) -> Self {
        DispatchError::Validation(err).into()
    }
}

fn render_types(args: &[Value]) -> String {
    args.iter()
        .map(|arg| TypeDesc::of(arg).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// Validation errors

/// A non-interface type was offered as a contract.
#[cold]
pub fn not_interface_like(contract: &Contract) -> ValidationError {
    ValidationError {
        type_name: contract.name().to_string(),
        reason: ValidationReason::NotInterfaceLike {
            kind: contract.kind(),
        },
    }
}

/// A contract inherits from a non-interface type.
#[cold]
pub fn inherits_non_interface(contract: &Contract, parent: &Contract) -> ValidationError {
    ValidationError {
        type_name: contract.name().to_string(),
        reason: ValidationReason::InheritsNonInterface {
            parent: parent.name().to_string(),
            kind: parent.kind(),
        },
    }
}

/// `cast_to` on a contract the object does not implement.
#[cold]
pub fn contract_not_registered(name: &str) -> ValidationError {
    ValidationError {
        type_name: name.to_string(),
        reason: ValidationReason::NotRegistered,
    }
}

/// Strict build found unresolvable members.
#[cold]
pub fn unresolved_members(contract: &str, signatures: Vec<MethodSignature>) -> ValidationError {
    ValidationError {
        type_name: contract.to_string(),
        reason: ValidationReason::Unresolved { signatures },
    }
}

// Dispatch errors

/// Nothing can serve the requested signature.
#[cold]
pub fn no_handler_found(fallback: Option<&str>, signature: &MethodSignature) -> NoHandlerFoundError {
    NoHandlerFoundError {
        fallback: fallback.map(str::to_string),
        signature: signature.clone(),
    }
}

/// A view's contract has no member for the requested name and arguments.
#[cold]
pub fn undeclared_method(contract: &Contract, method: &str, args: &[Value]) -> DispatchError {
    DispatchError::UndeclaredMethod {
        contract: contract.name().to_string(),
        method: method.to_string(),
        args: render_types(args),
    }
}

/// Arguments rejected by the signature.
#[cold]
pub fn bad_arguments(signature: &MethodSignature, args: &[Value]) -> DispatchError {
    DispatchError::BadArguments {
        signature: signature.clone(),
        got: render_types(args),
    }
}

/// Returned value rejected by the declared return type.
#[cold]
pub fn bad_return(signature: &MethodSignature, expected: &TypeDesc, got: &Value) -> DispatchError {
    DispatchError::BadReturn {
        signature: signature.clone(),
        expected: expected.clone(),
        got: TypeDesc::of(got).to_string(),
    }
}

#[cfg(test)]
mod tests;
