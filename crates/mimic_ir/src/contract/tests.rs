use super::*;
use crate::TypeDesc;
use pretty_assertions::assert_eq;

fn greeter() -> Contract {
    Contract::interface("Greeter")
        .method(MethodDecl::new("greet", [TypeDesc::Str]).returns(TypeDesc::Str))
        .method(MethodDecl::new("greet", []).returns(TypeDesc::Str))
}

fn named() -> Contract {
    Contract::interface("Named").method(MethodDecl::new("name", []).returns(TypeDesc::Str))
}

#[test]
fn test_kind_is_interface_like() {
    assert!(ContractKind::Interface.is_interface_like());
    for kind in [
        ContractKind::Class,
        ContractKind::AbstractClass,
        ContractKind::Enum,
        ContractKind::Record,
    ] {
        assert!(!kind.is_interface_like(), "{kind:?}");
    }
}

#[test]
fn test_identity_is_name() {
    let a = greeter();
    let b = Contract::interface("Greeter");
    assert_eq!(a, b);
    assert_ne!(a, named());
}

#[test]
fn test_builder_does_not_mutate_shared_clone() {
    let base = named();
    let extended = base
        .clone()
        .method(MethodDecl::new("rename", [TypeDesc::Str]));
    assert_eq!(base.own_methods().len(), 1);
    assert_eq!(extended.own_methods().len(), 2);
}

#[test]
fn test_methods_include_inherited_once() {
    let polite = Contract::interface("Polite")
        .extends(greeter())
        .extends(named())
        // Redeclares an inherited member; the own declaration wins.
        .method(MethodDecl::new("name", []).returns(TypeDesc::Any));

    let rendered: Vec<String> = polite
        .methods()
        .iter()
        .map(|d| d.signature.to_string())
        .collect();
    assert_eq!(rendered, vec!["name()", "greet(Str)", "greet()"]);

    let name = MethodSignature::new("name", []);
    assert_eq!(
        polite.find_method(&name).map(|d| d.returns.clone()),
        Some(TypeDesc::Any)
    );
}

#[test]
fn test_find_method_and_declares() {
    let polite = Contract::interface("Polite").extends(greeter());
    let greet = MethodSignature::new("greet", [TypeDesc::Str]);
    assert!(polite.declares(&greet));
    assert!(!polite.declares(&MethodSignature::new("greet", [TypeDesc::Int])));
    assert_eq!(polite.methods_named("greet").len(), 2);
    assert!(polite.methods_named("wave").is_empty());
}

#[test]
fn test_subcontract_and_lineage() {
    let base = named();
    let mid = Contract::interface("Person").extends(base.clone());
    let leaf = Contract::interface("Employee")
        .extends(mid.clone())
        .extends(base.clone());

    assert!(leaf.is_subcontract_of("Named"));
    assert!(leaf.is_subcontract_of("Person"));
    assert!(leaf.is_subcontract_of("Employee"));
    assert!(!base.is_subcontract_of("Employee"));

    let names: Vec<&str> = leaf.lineage().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Employee", "Person", "Named"]);
}

#[test]
fn test_display() {
    assert_eq!(greeter().to_string(), "interface Greeter");
    assert_eq!(Contract::class("Plain").to_string(), "class Plain");
}
