use super::*;
use pretty_assertions::assert_eq;

#[test]
fn not_interface_like_names_type_and_reason() {
    let err = not_interface_like(&Contract::class("Plain"));
    assert_eq!(err.type_name, "Plain");
    assert_eq!(
        err.reason,
        ValidationReason::NotInterfaceLike {
            kind: ContractKind::Class
        }
    );
    let message = err.to_string();
    assert!(message.contains("Plain"), "{message}");
    assert!(message.contains("not an interface-like contract"), "{message}");
}

#[test]
fn inherits_non_interface_names_parent() {
    let parent = Contract::new("Base", ContractKind::AbstractClass);
    let child = Contract::interface("Child").extends(parent.clone());
    let err = inherits_non_interface(&child, &parent);
    assert_eq!(
        err.to_string(),
        "`Child` extends `Base`, which is not an interface-like contract (it is a abstract class)"
    );
}

#[test]
fn unresolved_lists_signatures() {
    let err = unresolved_members(
        "Greeter",
        vec![
            MethodSignature::new("greet", [TypeDesc::Str]),
            MethodSignature::new("wave", []),
        ],
    );
    assert_eq!(
        err.to_string(),
        "`Greeter` has members with no handler and no supporting fallback: greet(Str), wave()"
    );
}

#[test]
fn no_handler_found_renders_fallback_and_signature() {
    let sig = MethodSignature::new("greet", [TypeDesc::Str]);
    let with = no_handler_found(Some("Plain@0x10"), &sig);
    assert_eq!(
        with.to_string(),
        "no handler found for `greet(Str)` (fallback: Plain@0x10)"
    );
    let without = no_handler_found(None, &sig);
    assert_eq!(
        without.to_string(),
        "no handler found for `greet(Str)` (fallback: none)"
    );
}

#[test]
fn argument_and_return_errors_render_types() {
    let sig = MethodSignature::new("greet", [TypeDesc::Str]);
    let args = bad_arguments(&sig, &[Value::int(1), Value::Bool(true)]);
    assert_eq!(args.to_string(), "`greet(Str)` cannot be called with (Int, Bool)");

    let ret = bad_return(&sig, &TypeDesc::Str, &Value::Void);
    assert_eq!(ret.to_string(), "`greet(Str)` must return Str, got Void");

    let undeclared = undeclared_method(
        &Contract::interface("Greeter"),
        "wave",
        &[Value::string("hi")],
    );
    assert_eq!(
        undeclared.to_string(),
        "`Greeter` declares no method `wave` accepting (Str)"
    );
}

#[test]
fn dispatch_error_fault_accessors() {
    let fatal = DispatchError::from(Fault::fatal("OutOfMemory", "heap"));
    assert!(fatal.is_fatal());
    assert_eq!(fatal.type_name(), "OutOfMemory");
    assert_eq!(fatal.to_string(), "OutOfMemory: heap");

    let missing: DispatchError =
        no_handler_found(None, &MethodSignature::new("x", [])).into();
    assert!(missing.fault().is_none());
    assert!(!missing.is_fatal());
}

#[test]
fn dispatch_error_into_fault() {
    let original = Fault::checked("IoFault", "disk");
    let back: Fault = DispatchError::Fault(original.clone()).into();
    assert_eq!(back, original);

    let missing: DispatchError =
        no_handler_found(None, &MethodSignature::new("x", [])).into();
    let as_fault: Fault = missing.into();
    assert_eq!(as_fault.kind, mimic_ir::FaultKind::Runtime);
    assert_eq!(&*as_fault.type_name, "NoHandlerFoundError");
    assert!(as_fault.message.contains("x()"));

    let invalid: Fault = contract_not_registered("Runnable").into();
    assert_eq!(&*invalid.type_name, "ValidationError");
    assert_eq!(
        invalid.message,
        "`Runnable` is not a contract implemented by this synthesized object"
    );
}
