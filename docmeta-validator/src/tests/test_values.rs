use super::{object, Fixture};
use crate::{ArrayKey, Value};
use indexmap::IndexMap;

fn valid_values() -> Vec<(Option<&'static str>, Value)> {
    vec![
        // primitive data types
        (Some("bool"), Value::from(true)),
        (Some("int"), Value::from(42)),
        (Some("float"), Value::from(4.2)),
        (Some("float"), Value::from(4)),
        (Some("string"), Value::from("some string")),
        (Some("array"), Value::list([1, 2])),
        (Some("object"), object("stdClass")),
        (Some("object"), object("DateTime")),
        (Some("null"), Value::Null),
        (Some("true"), Value::from(true)),
        (Some("false"), Value::from(false)),
        (Some("void"), Value::Null),
        // no declaration or mixed
        (None, Value::from("any value allowed")),
        (Some("mixed"), Value::from("any value allowed")),
        (Some("mixed"), Value::Null),
        // unions
        (Some("string|int"), Value::from(42)),
        (Some("string|int"), Value::from("some string")),
        // classes and interfaces
        (Some("DateTimeInterface"), object("DateTimeImmutable")),
        (Some("\\DateTime"), object("DateTime")),
        // arrays of a type
        (Some("int[]"), Value::list([1, 2])),
        (Some("int[]"), Value::list(Vec::<Value>::new())),
        (Some("stdClass[]"), Value::list([object("stdClass"), object("stdClass")])),
        (
            Some("DateTimeInterface[]"),
            Value::list([object("DateTimeImmutable"), object("DateTime")]),
        ),
        // unions with arrays of a type
        (Some("int[]|string[]"), Value::list([1, 2])),
        (Some("int[]|string[]"), Value::list(["value1", "value2"])),
        (Some("int[]|string"), Value::list([1, 2])),
        (Some("int[]|string"), Value::from("string value")),
    ]
}

fn invalid_values() -> Vec<(&'static str, Value)> {
    vec![
        // primitive data types
        ("bool", Value::from("true")),
        ("int", Value::from("42")),
        ("float", Value::from("4.2")),
        ("string", Value::Null),
        ("array", Value::from(4)),
        ("object", Value::from(false)),
        ("null", Value::from("null")),
        ("true", Value::from(false)),
        ("true", Value::from("a truthy string")),
        ("false", Value::from(0)),
        ("void", Value::from(true)),
        // unions
        ("string|int", Value::from(0.07)),
        ("string|int", Value::Null),
        // classes and interfaces
        ("DateTimeInterface", object("stdClass")),
        ("DateTimeImmutable", object("DateTime")),
        ("DateTime", Value::from("DateTime")),
        ("Unknown\\Thing", object("stdClass")),
        ("Unknown\\Thing", object("Unknown\\Thing")),
        ("Nowhere", object("Nowhere")),
        // arrays of a type
        ("string[]", Value::from("no array")),
        ("string[]", Value::list([1, 2])),
        ("int[]", Value::list(["array", "of", "strings"])),
        ("int[]", Value::list([Value::from(0), Value::from(1), Value::from("no int")])),
        ("int[]", Value::list([Value::list([1])])),
        // unions with a non-matching array member
        ("string[]|int", Value::from("some string")),
    ]
}

#[test]
fn test_validates_valid_values() {
    let fixture = Fixture::new();

    for (declaration, value) in valid_values() {
        assert!(
            fixture.validate(declaration, &value).unwrap(),
            "{declaration:?} should accept {value:?}"
        );
    }
}

#[test]
fn test_invalidates_invalid_values() {
    let fixture = Fixture::new();

    for (declaration, value) in invalid_values() {
        assert!(
            !fixture.validate(Some(declaration), &value).unwrap(),
            "{declaration} should reject {value:?}"
        );
    }
}

#[test]
fn test_union_order_does_not_matter() {
    let fixture = Fixture::new();
    let values = [
        Value::from(42),
        Value::from("text"),
        Value::Null,
        Value::list([1, 2]),
        Value::list(["a"]),
        object("DateTime"),
    ];

    for (a, b) in [
        ("int", "string"),
        ("int[]", "string"),
        ("int[]", "string[]"),
        ("DateTimeInterface", "null"),
        ("self", "float"),
    ] {
        for value in &values {
            assert_eq!(
                fixture.validate(Some(&format!("{a}|{b}")), value).unwrap(),
                fixture.validate(Some(&format!("{b}|{a}")), value).unwrap(),
                "{a}|{b} against {value:?}"
            );
        }
    }
}

#[test]
fn test_validation_is_deterministic() {
    let fixture = Fixture::new();
    let value = Value::list([object("DateTime"), object("DateTimeImmutable")]);

    let first = fixture.validate(Some("DateTimeInterface[]|null"), &value).unwrap();
    for _ in 0..3 {
        assert_eq!(
            fixture.validate(Some("DateTimeInterface[]|null"), &value).unwrap(),
            first
        );
    }
}

#[test]
fn test_associative_arrays_are_checked_by_their_values() {
    let fixture = Fixture::new();
    let value = Value::Array(IndexMap::from([
        (ArrayKey::String("first".to_string()), Value::from(1)),
        (ArrayKey::String("second".to_string()), Value::from(2)),
    ]));

    assert!(fixture.validate(Some("int[]"), &value).unwrap());
    assert!(!fixture.validate(Some("string[]"), &value).unwrap());
    assert!(fixture.validate(Some("array"), &value).unwrap());
}

#[test]
fn test_json_values() {
    let fixture = Fixture::new();
    let value = Value::from(serde_json::json!([
        { "@class": "DateTime" },
        { "@class": "DateTimeImmutable", "timezone": "UTC" }
    ]));

    assert!(fixture.validate(Some("DateTimeInterface[]"), &value).unwrap());
    assert!(!fixture.validate(Some("DateTime[]"), &value).unwrap());
}

#[test]
fn test_unknown_classes_never_match() {
    let fixture = Fixture::new();

    for declaration in ["Unknown\\Thing", "\\Unknown\\Thing", "Unknown\\Thing[]|null"] {
        assert!(
            !fixture
                .validate(Some(declaration), &object("Unknown\\Thing"))
                .unwrap(),
            "{declaration}"
        );
    }
}
