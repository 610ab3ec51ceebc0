use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_of_value() {
    assert_eq!(TypeDesc::of(&Value::Void), TypeDesc::Void);
    assert_eq!(TypeDesc::of(&Value::int(3)), TypeDesc::Int);
    assert_eq!(TypeDesc::of(&Value::string("x")), TypeDesc::Str);
    assert_eq!(TypeDesc::of(&Value::list(vec![])), TypeDesc::List);
    assert_eq!(
        TypeDesc::of(&Value::opaque("Point", (1_i64, 2_i64))),
        TypeDesc::named("Point")
    );
}

#[test]
fn test_any_accepts_everything() {
    for desc in [
        TypeDesc::Void,
        TypeDesc::Int,
        TypeDesc::Str,
        TypeDesc::named("Point"),
    ] {
        assert!(TypeDesc::Any.is_assignable_from(&desc));
    }
    assert!(TypeDesc::Any.accepts(&Value::Float(1.5)));
}

#[test]
fn test_assignability_is_not_symmetric() {
    assert!(!TypeDesc::Str.is_assignable_from(&TypeDesc::Any));
    assert!(TypeDesc::Str.is_assignable_from(&TypeDesc::Str));
    assert!(!TypeDesc::Str.is_assignable_from(&TypeDesc::Int));
    assert!(!TypeDesc::named("A").is_assignable_from(&TypeDesc::named("B")));
}

#[test]
fn test_display() {
    assert_eq!(TypeDesc::Str.to_string(), "Str");
    assert_eq!(TypeDesc::named("Greeter").to_string(), "Greeter");
}
