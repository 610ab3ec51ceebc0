//! Raised conditions.
//!
//! A `Fault` is whatever a handler behavior or a fallback target raises.
//! Instead of an exception class hierarchy, every fault carries:
//! - a `FaultKind` tag deciding how the dispatch boundary treats it
//! - a `type_name` (plus optional `supertypes`) for instance-of matching
//! - an optional boxed `cause`, forming a chain
//!
//! Two kinds are wrappers rather than original conditions:
//! `InvocationFailed` (a low-level "the target threw" envelope) and
//! `Undeclared` (the library's envelope for checked faults a method may not
//! raise). `into_original` strips both, recursively.

use std::fmt;
use std::sync::Arc;

/// Type name of the low-level invocation wrapper.
pub const INVOCATION_FAILED: &str = "InvocationFailed";

/// Type name of the library wrapper for undeclared checked faults.
pub const UNDECLARED_FAULT: &str = "UndeclaredFault";

/// How a fault is treated when it crosses the dispatch boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// A recoverable condition that must be declared to cross the boundary.
    Checked,
    /// An ordinary runtime failure; always crosses unchanged.
    Runtime,
    /// An unrecoverable condition (resource exhaustion, violated assertion).
    /// Never wrapped, never swallowed.
    Fatal,
    /// Envelope: the invoked target raised `cause`.
    InvocationFailed,
    /// Envelope: `cause` is a checked fault the method does not declare.
    Undeclared,
}

impl FaultKind {
    /// Whether this kind only exists to carry a cause.
    #[inline]
    pub fn is_wrapper(self) -> bool {
        matches!(self, Self::InvocationFailed | Self::Undeclared)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checked => "checked",
            Self::Runtime => "runtime",
            Self::Fatal => "fatal",
            Self::InvocationFailed => "invocation-failed",
            Self::Undeclared => "undeclared",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raised condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fault {
    pub kind: FaultKind,
    /// The condition's type, used for declared-fault and catch matching.
    pub type_name: Arc<str>,
    /// Types this fault is also an instance of.
    pub supertypes: Vec<Arc<str>>,
    pub message: String,
    cause: Option<Box<Fault>>,
}

impl Fault {
    fn from_parts(kind: FaultKind, type_name: Arc<str>, message: String) -> Self {
        Self {
            kind,
            type_name,
            supertypes: Vec::new(),
            message,
            cause: None,
        }
    }

    /// A checked fault.
    pub fn checked(type_name: impl Into<Arc<str>>, message: impl Into<String>) -> Self {
        Self::from_parts(FaultKind::Checked, type_name.into(), message.into())
    }

    /// An ordinary runtime fault.
    pub fn runtime(type_name: impl Into<Arc<str>>, message: impl Into<String>) -> Self {
        Self::from_parts(FaultKind::Runtime, type_name.into(), message.into())
    }

    /// An unrecoverable fault.
    pub fn fatal(type_name: impl Into<Arc<str>>, message: impl Into<String>) -> Self {
        Self::from_parts(FaultKind::Fatal, type_name.into(), message.into())
    }

    /// Envelope a fault raised by an invoked target.
    pub fn invocation_failed(cause: Fault) -> Self {
        let message = format!("invocation target raised {}", cause.type_name);
        Self::from_parts(FaultKind::InvocationFailed, INVOCATION_FAILED.into(), message)
            .with_cause(cause)
    }

    /// Envelope a checked fault that may not cross the boundary.
    ///
    /// `message` overrides the default "undeclared checked fault" text.
    pub fn undeclared(message: Option<String>, cause: Fault) -> Self {
        let message = message.unwrap_or_else(|| {
            format!(
                "undeclared checked fault {}: {}",
                cause.type_name, cause.message
            )
        });
        Self::from_parts(FaultKind::Undeclared, UNDECLARED_FAULT.into(), message)
            .with_cause(cause)
    }

    /// Attach a cause.
    #[must_use]
    pub fn with_cause(mut self, cause: Fault) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Declare an additional type this fault is an instance of.
    #[must_use]
    pub fn with_supertype(mut self, supertype: impl Into<Arc<str>>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    #[inline]
    pub fn cause(&self) -> Option<&Fault> {
        self.cause.as_deref()
    }

    /// Take the cause out of this fault.
    pub fn into_cause(self) -> Option<Fault> {
        self.cause.map(|c| *c)
    }

    /// Whether this fault is of `type_name` or declares it as a supertype.
    pub fn is_instance_of(&self, type_name: &str) -> bool {
        &*self.type_name == type_name || self.supertypes.iter().any(|s| &**s == type_name)
    }

    #[inline]
    pub fn is_wrapper(&self) -> bool {
        self.kind.is_wrapper()
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.kind == FaultKind::Fatal
    }

    /// The last fault in the cause chain.
    pub fn root_cause(&self) -> &Fault {
        let mut current = self;
        while let Some(next) = current.cause() {
            current = next;
        }
        current
    }

    /// Strip every wrapper envelope that carries a cause.
    ///
    /// Stops at the first fault that is either not a wrapper or a wrapper
    /// without a cause. Ordinary causes (a checked fault caused by another
    /// fault) are kept intact.
    pub fn into_original(self) -> Fault {
        let mut current = self;
        loop {
            if !current.is_wrapper() {
                return current;
            }
            match current.cause.take() {
                Some(cause) => current = *cause,
                None => return current,
            }
        }
    }

    /// Iterate over this fault and its causes, outermost first.
    pub fn chain(&self) -> FaultChain<'_> {
        FaultChain {
            next: Some(self),
        }
    }
}

/// Iterator over a fault and its causes.
pub struct FaultChain<'a> {
    next: Option<&'a Fault>,
}

impl<'a> Iterator for FaultChain<'a> {
    type Item = &'a Fault;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}
