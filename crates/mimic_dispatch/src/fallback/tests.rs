use super::*;
use crate::errors::ValidationReason;
use mimic_ir::{ContractKind, FaultKind, MethodDecl};
use pretty_assertions::assert_eq;

fn greet_sig() -> MethodSignature {
    MethodSignature::new("greet", [TypeDesc::Str])
}

fn plain() -> Arc<dyn Target> {
    Arc::new(
        ObjectTarget::new("Plain")
            .method("greet", [TypeDesc::Str], |args| {
                let name = args.first().and_then(Value::as_str).unwrap_or_default();
                Ok(Value::string(format!("hi {name}")))
            })
            .method("fail", [], |_| Err(Fault::checked("IoFault", "disk"))),
    )
}

#[test]
fn object_target_exposes_methods_in_order() {
    let target = plain();
    assert_eq!(target.type_name(), "Plain");
    assert_eq!(
        target.signatures(),
        vec![greet_sig(), MethodSignature::new("fail", [])]
    );
    assert!(target.responds_to(&greet_sig()));
    assert!(!target.responds_to(&MethodSignature::new("greet", [TypeDesc::Int])));
}

#[test]
fn object_target_redefinition_replaces_body() {
    let target = ObjectTarget::new("T")
        .method("n", [], |_| Ok(Value::int(1)))
        .method("n", [], |_| Ok(Value::int(2)));
    let sig = MethodSignature::new("n", []);
    assert_eq!(target.signatures().len(), 1);
    assert_eq!(target.invoke(&sig, &[]), Ok(Value::int(2)));
}

#[test]
fn object_target_unknown_method() {
    let err = plain()
        .invoke(&MethodSignature::new("wave", []), &[])
        .unwrap_err();
    assert_eq!(err.kind, FaultKind::Runtime);
    assert_eq!(&*err.type_name, "NoSuchMethod");
}

#[test]
fn delegate_supports_own_and_declared_signatures() {
    let wave = Contract::interface("Waver").method(MethodDecl::new("wave", []));
    let delegate = FallbackDelegate::new(plain());
    assert!(delegate.supports(&greet_sig()));
    assert!(!delegate.supports(&MethodSignature::new("wave", [])));

    let delegate = delegate
        .declaring(wave.clone())
        .unwrap()
        .declaring(wave)
        .unwrap();
    assert_eq!(delegate.declared().len(), 1);
    assert!(delegate.supports(&MethodSignature::new("wave", [])));
}

#[test]
fn delegate_identity_names_type_and_address() {
    let target = plain();
    let a = FallbackDelegate::new(Arc::clone(&target));
    let b = FallbackDelegate::new(Arc::clone(&target));
    let other = FallbackDelegate::new(plain());

    let address = a.identity().strip_prefix("Plain@0x").unwrap();
    assert!(
        !address.is_empty() && address.chars().all(|c| c.is_ascii_hexdigit()),
        "{}",
        a.identity()
    );
    assert_eq!(a.identity(), b.identity());
    assert!(a.identity() != other.identity());
    assert!(Arc::ptr_eq(a.target(), &target));
}

#[test]
fn delegate_invoke_returns_value() {
    let delegate = FallbackDelegate::new(plain());
    let out = delegate
        .invoke(
            &greet_sig(),
            &[Value::string("Bob")],
            &FaultClassifier::new(),
            |_| false,
        )
        .unwrap();
    assert_eq!(out, Value::string("hi Bob"));
}

#[test]
fn delegate_invoke_classifies_target_faults() {
    let delegate = FallbackDelegate::new(plain());
    let fail = MethodSignature::new("fail", []);
    let classifier = FaultClassifier::new();

    let declared = delegate
        .invoke(&fail, &[], &classifier, |f| f.is_instance_of("IoFault"))
        .unwrap_err();
    assert_eq!(declared, Fault::checked("IoFault", "disk"));

    let undeclared = delegate.invoke(&fail, &[], &classifier, |_| false).unwrap_err();
    assert_eq!(undeclared.kind, FaultKind::Undeclared);
    assert_eq!(undeclared.cause(), Some(&Fault::checked("IoFault", "disk")));
}

#[test]
fn delegate_rejects_non_interface_declarations() {
    let err = FallbackDelegate::new(plain())
        .declaring(Contract::class("Thread"))
        .unwrap_err();
    assert_eq!(err.type_name, "Thread");
    assert_eq!(
        err.reason,
        ValidationReason::NotInterfaceLike {
            kind: ContractKind::Class
        }
    );

    let base = Contract::new("Base", ContractKind::AbstractClass);
    let err = FallbackDelegate::new(plain())
        .declaring(Contract::interface("Child").extends(base))
        .unwrap_err();
    assert_eq!(err.type_name, "Child");
}
