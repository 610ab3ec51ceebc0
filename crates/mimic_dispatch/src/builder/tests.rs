use super::*;
use crate::errors::ValidationReason;
use crate::{ObjectTarget, Resolution};
use mimic_ir::{ContractKind, MethodDecl};
use pretty_assertions::assert_eq;

fn runnable() -> Contract {
    Contract::interface("Runnable")
        .method(MethodDecl::new("run", []))
        .method(MethodDecl::new("stop", []))
}

#[test]
fn contract_is_validated_immediately() {
    let err = Synthesizer::new()
        .contract(Contract::new("Point", ContractKind::Record))
        .unwrap_err();
    assert_eq!(err.type_name, "Point");
    assert_eq!(
        err.reason,
        ValidationReason::NotInterfaceLike {
            kind: ContractKind::Record
        }
    );
}

#[test]
fn contracts_stops_at_first_invalid() {
    let err = Synthesizer::new()
        .contracts([runnable(), Contract::class("Thread"), Contract::interface("Never")])
        .unwrap_err();
    assert_eq!(err.type_name, "Thread");
}

#[test]
fn empty_builder_builds_an_object_without_contracts() {
    let object = Synthesizer::new().build().unwrap();
    assert!(object.contracts().is_empty());
    assert!(object.unresolved_signatures().is_empty());
    assert_eq!(object.fallback_identity(), None);
}

#[test]
fn handlers_keep_registration_order() {
    let object = Synthesizer::new()
        .contract(runnable())
        .unwrap()
        .on_name("run", |_, _| Ok(Value::Void))
        .on_predicate("any", |_| true, |_, _| Ok(Value::Void))
        .on_compatible("stop", [], |_, _| Ok(Value::Void))
        .build()
        .unwrap();

    let handlers = object.config().handlers();
    assert_eq!(handlers.len(), 3);
    let rendered: Vec<String> = handlers.iter().map(|e| e.matcher.to_string()).collect();
    assert_eq!(rendered, vec!["run(..)", "<any>", "~stop()"]);

    assert_eq!(
        object.resolve(&MethodSignature::new("stop", [])),
        Resolution::Handler {
            index: 2,
            precision: crate::Precision::Exact
        }
    );
}

#[test]
fn later_fallback_replaces_earlier() {
    let first: Arc<dyn Target> = Arc::new(ObjectTarget::new("First"));
    let second: Arc<dyn Target> = Arc::new(ObjectTarget::new("Second"));
    let object = Synthesizer::new()
        .fallback_to(first)
        .fallback_to(second)
        .build()
        .unwrap();
    assert!(object.fallback_identity().unwrap().starts_with("Second@"));
}

#[test]
fn strict_build_reports_first_incomplete_contract() {
    let err = Synthesizer::new()
        .contract(runnable())
        .unwrap()
        .contract(Contract::interface("Closeable").method(MethodDecl::new("close", [])))
        .unwrap()
        .on("run", [], |_, _| Ok(Value::Void))
        .unresolved_policy(UnresolvedPolicy::Strict)
        .build()
        .unwrap_err();

    assert_eq!(err.type_name, "Runnable");
    assert_eq!(
        err.reason,
        ValidationReason::Unresolved {
            signatures: vec![MethodSignature::new("stop", [])]
        }
    );
}

#[test]
fn strict_build_accepts_declared_fallback_contracts() {
    let target: Arc<dyn Target> = Arc::new(ObjectTarget::new("Worker"));
    let object = Synthesizer::new()
        .contract(runnable())
        .unwrap()
        .fallback(FallbackDelegate::new(target).declaring(runnable()).unwrap())
        .unresolved_policy(UnresolvedPolicy::Strict)
        .build()
        .unwrap();
    assert_eq!(
        object.resolve(&MethodSignature::new("run", [])),
        Resolution::Fallback
    );
}

#[test]
fn undeclared_message_reaches_classifier() {
    let object = Synthesizer::new()
        .undeclared_message("nope")
        .build()
        .unwrap();
    assert_eq!(object.config().classifier().undeclared_message(), Some("nope"));
}
