use docmeta_parser::{parse_declaration, parse_import_statement, PrimitiveKind, TypeName};

#[test]
fn test_public_api_parses_declarations() {
    let declaration = parse_declaration("int[]|\\DateTime").expect("Failed to parse");

    assert!(declaration.is_union());
    assert_eq!(declaration.source, "int[]|\\DateTime");
    assert_eq!(
        declaration.terms[0].name,
        TypeName::Primitive(PrimitiveKind::Int)
    );
    assert!(declaration.terms[0].is_array);
    assert_eq!(declaration.terms[1].to_string(), "\\DateTime");
}

#[test]
fn test_terms_render_back_to_source_form() {
    for input in ["int[]", "self", "$this", "\\Foo\\Bar[]", "Baz", "resource (closed)"] {
        let declaration = parse_declaration(input).expect("Failed to parse");
        assert_eq!(declaration.terms[0].to_string(), input);
    }
}

#[test]
fn test_public_api_parses_imports() {
    let import = parse_import_statement("Foo\\Bar as Baz").expect("Failed to parse");
    assert_eq!(import.alias(), "Baz");
}

#[test]
fn test_errors_render_as_diagnostics() {
    let error = parse_declaration("int|").unwrap_err();
    let report = miette::Report::new(error);
    assert!(format!("{report:?}").contains("docmeta::parse::empty_alternative"));
}
