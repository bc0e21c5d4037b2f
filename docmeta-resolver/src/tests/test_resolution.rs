use super::{registry, CLASS_FOR_TESTING};
use crate::imports::ImportTable;
use crate::resolver::ResolutionScope;
use crate::types::{namespace_of, TypeDeclaration, TypeTerm};
use crate::{ClassDeclaration, ClassDescriptor, NotAnObjectError, PrimitiveKind};
use docmeta_parser::ParseError;
use pretty_assertions::assert_eq;

fn descriptor(imports: &[&str]) -> ClassDescriptor {
    let declaration = imports
        .iter()
        .fold(ClassDeclaration::new(CLASS_FOR_TESTING), |declaration, statement| {
            declaration.import(*statement)
        });
    ClassDescriptor::from_declaration(&declaration, &registry()).expect("valid declaration")
}

fn resolved(descriptor: &ClassDescriptor, raw: Option<&str>) -> Option<String> {
    descriptor
        .resolve(raw, &registry())
        .expect("valid declaration")
        .map(|declaration| declaration.to_string())
}

#[test]
fn test_short_specifications_become_fully_qualified() {
    let descriptor = descriptor(&[
        "ScaleUpStack\\Metadata\\ClassMetadata",
        "Metadata\\ClassMetadata as BaseClassMetadata",
    ]);

    let cases: &[(Option<&str>, Option<&str>)] = &[
        (None, None),
        (Some("int"), Some("int")),
        (Some("bool"), Some("bool")),
        (Some("\\DateTime"), Some("DateTime")),
        (Some("ClassMetadata"), Some("ScaleUpStack\\Metadata\\ClassMetadata")),
        (Some("BaseClassMetadata"), Some("Metadata\\ClassMetadata")),
        (Some("ClassForTesting"), Some(CLASS_FOR_TESTING)),
        (Some("int[]"), Some("int[]")),
        (Some("\\DateTime[]"), Some("DateTime[]")),
        (Some("ClassMetadata[]"), Some("ScaleUpStack\\Metadata\\ClassMetadata[]")),
        (Some("int[]|\\DateTime"), Some("int[]|DateTime")),
        (Some("self"), Some("self")),
        (Some("$this"), Some("$this")),
    ];

    for (raw, expected) in cases {
        assert_eq!(
            resolved(&descriptor, *raw),
            expected.map(str::to_string),
            "resolving {raw:?}"
        );
    }
}

#[test]
fn test_resolution_produces_structured_terms() {
    let descriptor = descriptor(&["Metadata\\ClassMetadata as BaseClassMetadata"]);
    let declaration = descriptor
        .resolve(Some("BaseClassMetadata[]|null|callable"), &registry())
        .unwrap()
        .unwrap();

    assert_eq!(
        declaration,
        TypeDeclaration::new(vec![
            TypeTerm::array_of(TypeTerm::class_ref("Metadata\\ClassMetadata")),
            TypeTerm::Primitive(PrimitiveKind::Null),
            TypeTerm::Unhandled("callable".to_string()),
        ])
        .unwrap()
    );
}

#[test]
fn test_unknown_names_are_left_as_written() {
    let descriptor = descriptor(&[]);

    assert_eq!(resolved(&descriptor, Some("Nowhere")), Some("Nowhere".to_string()));
    assert_eq!(
        resolved(&descriptor, Some("Some\\Nested\\Nowhere")),
        Some("Some\\Nested\\Nowhere".to_string())
    );
}

#[test]
fn test_aliases_match_whole_tokens_only() {
    // `Annotation\MethodAnnotation` is not the alias `MethodAnnotation`
    let descriptor = descriptor(&["ScaleUpStack\\Annotations\\Annotation\\MethodAnnotation"]);

    assert_eq!(
        resolved(&descriptor, Some("MethodAnnotation")),
        Some("ScaleUpStack\\Annotations\\Annotation\\MethodAnnotation".to_string())
    );
    assert_eq!(
        resolved(&descriptor, Some("Annotation\\MethodAnnotation")),
        Some("Annotation\\MethodAnnotation".to_string())
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let descriptor = descriptor(&["Metadata\\ClassMetadata as BaseClassMetadata"]);
    let registry = registry();

    for raw in ["BaseClassMetadata", "ClassForTesting[]|int", "\\DateTime", "self|null"] {
        let once = descriptor.resolve(Some(raw), &registry).unwrap();
        let again = descriptor.resolve(Some(raw), &registry).unwrap();

        assert_eq!(once, again, "resolving {raw} twice");
    }

    for identifier in ["Metadata\\ClassMetadata", CLASS_FOR_TESTING] {
        let declaration = descriptor
            .resolve(Some(&format!("\\{identifier}")), &registry)
            .unwrap()
            .unwrap();

        assert_eq!(declaration, TypeDeclaration::single(TypeTerm::class_ref(identifier)));
    }
}

#[test]
fn test_global_namespace_classes_resolve_to_themselves() {
    let registry = registry();
    let imports = ImportTable::new();
    let scope = ResolutionScope::new("TopLevel", namespace_of("TopLevel"), &imports, &registry);

    assert_eq!(scope.namespace(), "");
    assert_eq!(
        scope.resolve("DateTime").unwrap().to_string(),
        "DateTime".to_string()
    );
}

#[test]
fn test_malformed_declarations_are_parse_errors() {
    let descriptor = descriptor(&[]);

    assert!(matches!(
        descriptor.resolve(Some("int|"), &registry()),
        Err(ParseError::EmptyAlternative { .. })
    ));
    assert!(matches!(
        descriptor.resolve(Some("[]"), &registry()),
        Err(ParseError::ArrayWithoutElementType { .. })
    ));
}

#[test]
fn test_object_type_table() {
    let descriptor = descriptor(&["ScaleUpStack\\Metadata\\Metadata\\ClassMetadata"]);
    let registry = registry();

    let cases: &[(Option<&str>, bool)] = &[
        (Some("bool"), false),
        (Some("int[]"), false),
        (Some("DateTime"), true),
        (Some("DateTime[]"), true),
        (Some("DateTime|int"), false),
        (Some("ClassMetadata"), true),
        (None, false),
        (Some(""), false),
        (Some("self"), true),
        (Some("$this"), true),
        (Some("DateTimeInterface"), false),
        (Some("ScaleUpStack\\Metadata\\Generator\\FeatureAnalyzer"), false),
        (Some("callable"), false),
    ];

    for (raw, expected) in cases {
        assert_eq!(
            descriptor.is_object_type(*raw, &registry),
            *expected,
            "is {raw:?} an object type"
        );
    }
}

#[test]
fn test_class_identifier_table() {
    let descriptor = descriptor(&["ScaleUpStack\\Metadata\\Metadata\\ClassMetadata"]);
    let registry = registry();

    for (raw, expected) in [
        ("DateTime", "DateTime"),
        ("ClassMetadata", "ScaleUpStack\\Metadata\\Metadata\\ClassMetadata"),
        ("self", CLASS_FOR_TESTING),
        ("$this", CLASS_FOR_TESTING),
    ] {
        assert_eq!(
            descriptor.class_identifier_of(raw, &registry).unwrap(),
            expected,
            "class identifier of {raw}"
        );
    }
}

#[test]
fn test_non_object_specifications_have_no_class_identifier() {
    let descriptor = descriptor(&["ScaleUpStack\\Metadata\\Metadata\\ClassMetadata"]);
    let registry = registry();

    for raw in ["DateTimeInterface", "int", "DateTime|Exception", "DateTime[]", "resource", "int|"] {
        let error = descriptor.class_identifier_of(raw, &registry).unwrap_err();

        assert_eq!(
            error,
            NotAnObjectError {
                specification: raw.to_string()
            }
        );
        assert_eq!(
            error.to_string(),
            format!(
                "Data type specification '{raw}' is not an object. (Interfaces and union types are not supported.)"
            )
        );
    }
}

#[test]
fn test_scope_level_class_identifier() {
    let registry = registry();
    let imports = ImportTable::new();
    let scope = ResolutionScope::new(CLASS_FOR_TESTING, namespace_of(CLASS_FOR_TESTING), &imports, &registry);

    assert_eq!(
        scope.class_identifier_of(&TypeTerm::SelfRef).unwrap(),
        CLASS_FOR_TESTING
    );
    assert!(scope
        .class_identifier_of(&TypeTerm::array_of(TypeTerm::SelfRef))
        .is_err());
    assert!(scope
        .class_identifier_of(&TypeTerm::class_ref("DateTimeInterface"))
        .is_err());
}
