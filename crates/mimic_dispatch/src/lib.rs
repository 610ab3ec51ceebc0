//! Mimic Dispatch - runtime synthesis of objects from interface contracts.
//!
//! A caller picks a set of interface-like contracts, binds behavior to some
//! of their members, optionally names a fallback object for the rest, and
//! gets back one [`SynthesizedObject`] that implements all of them.
//!
//! # Architecture
//!
//! - `ContractRegistry`: validated, ordered set of contracts
//! - `HandlerTable`: (matcher, behavior) bindings, most precise match wins
//! - `FallbackDelegate`: routes unmatched calls to a pre-existing object
//! - `FaultClassifier`: unwraps and classifies faults at the boundary
//! - `DispatchCore` (internal): the per-call state machine over a frozen
//!   `DispatchConfig`, reached only through `SynthesizedObject::invoke`
//! - `SynthesizedObject` / `ContractView`: what callers hold
//! - `Synthesizer`: the builder that produces them
//!
//! # Re-exports
//!
//! The data model (`Contract`, `MethodSignature`, `Value`, `Fault`, ...)
//! lives in `mimic_ir`; the types needed to drive a synthesized object are
//! re-exported here.

mod builder;
pub mod classify;
mod config;
mod dispatch;
pub mod errors;
pub mod fallback;
pub mod handlers;
mod object;
pub mod registry;

pub use mimic_ir::{
    Contract, ContractKind, Fault, FaultKind, MethodDecl, MethodSignature, TypeDesc, Value,
};

pub use builder::Synthesizer;
pub use classify::FaultClassifier;
pub use config::{DispatchConfig, UnresolvedPolicy};
pub use dispatch::Resolution;
pub use errors::{DispatchError, NoHandlerFoundError, ValidationError, ValidationReason};
pub use fallback::{FallbackDelegate, ObjectTarget, Target};
pub use handlers::{Behavior, HandlerTable, Matcher, Precision};
pub use object::{ContractView, SynthesizedObject};
pub use registry::ContractRegistry;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for dispatch diagnostics.
///
/// Installs a subscriber only when `RUST_LOG` is set, so embedding
/// applications that configure their own subscriber are left alone.
/// Calling this more than once has no further effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .try_init()
                .ok();
        }
    });
}
