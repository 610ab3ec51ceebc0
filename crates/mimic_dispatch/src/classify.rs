//! Fault classification at the synthesized-object boundary.
//!
//! Every fault leaving a handler or the fallback passes through
//! [`FaultClassifier::classify`]:
//!
//! - invocation wrappers (and undeclared wrappers that carry a cause) are
//!   stripped down to the innermost original fault
//! - fatal and runtime faults pass through unchanged
//! - a checked fault passes through only if the method permits it;
//!   otherwise it is wrapped once in an undeclared-fault wrapper
//!
//! Cause-less wrappers have nothing to unwrap and pass through as they are.

use mimic_ir::{Fault, FaultKind};

/// Classification policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaultClassifier {
    undeclared_message: Option<String>,
}

impl FaultClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `message` for every undeclared-fault wrapper instead of the
    /// generated one.
    #[must_use]
    pub fn with_undeclared_message(mut self, message: impl Into<String>) -> Self {
        self.undeclared_message = Some(message.into());
        self
    }

    pub fn undeclared_message(&self) -> Option<&str> {
        self.undeclared_message.as_deref()
    }

    /// Classify `fault`. `permits` answers whether a checked fault may cross
    /// the boundary of the method being called.
    pub fn classify(&self, fault: Fault, permits: impl Fn(&Fault) -> bool) -> Fault {
        let original = fault.into_original();
        match original.kind {
            FaultKind::Checked if !permits(&original) => {
                tracing::debug!(
                    fault = %original.type_name,
                    "wrapping checked fault the method does not declare"
                );
                Fault::undeclared(self.undeclared_message.clone(), original)
            }
            _ => original,
        }
    }
}
