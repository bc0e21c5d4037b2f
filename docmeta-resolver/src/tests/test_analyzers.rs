use super::{registry, CLASS_FOR_TESTING};
use crate::analyzers::{AnalysisContext, AnalyzerRegistry, FeatureAnalyzer, ObjectProperties};
use crate::descriptor::ClassDescriptor;
use crate::error::ConstructionError;
use crate::source::{ClassDeclaration, PropertyDeclaration};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Counts the `property-read` tags of a class
struct ReadOnlyProperties;

impl FeatureAnalyzer for ReadOnlyProperties {
    fn name(&self) -> &str {
        "read_only_properties"
    }

    fn extract(&self, context: &AnalysisContext<'_>) -> Result<Value, ConstructionError> {
        Ok(json!(context
            .descriptor
            .annotations()
            .by_tag("property-read")
            .count()))
    }
}

struct Failing;

impl FeatureAnalyzer for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn extract(&self, context: &AnalysisContext<'_>) -> Result<Value, ConstructionError> {
        Err(ConstructionError::AnalyzerFailed {
            analyzer: self.name().to_string(),
            class: context.declaration.name.clone(),
            message: "always fails".to_string(),
        })
    }
}

fn declaration() -> ClassDeclaration {
    ClassDeclaration::new(CLASS_FOR_TESTING)
        .import("Metadata\\ClassMetadata as BaseClassMetadata")
        .annotation(crate::Annotation::tag("property-read", "$createdAt"))
        .property(PropertyDeclaration::typed("createdAt", "\\DateTime"))
        .property(PropertyDeclaration::typed("parents", "BaseClassMetadata[]"))
        .property(PropertyDeclaration::typed("sibling", "self|null"))
        .property(PropertyDeclaration::typed("clock", "DateTimeInterface"))
        .property(PropertyDeclaration::typed("count", "int"))
        .property(PropertyDeclaration::new("untyped"))
}

#[test]
fn test_features_are_keyed_by_analyzer_name_in_order() {
    let analyzers = AnalyzerRegistry::new()
        .with(ReadOnlyProperties)
        .with(ObjectProperties);

    assert_eq!(
        analyzers.names().collect::<Vec<_>>(),
        vec!["read_only_properties", "object_properties"]
    );

    let descriptor = ClassDescriptor::build(&declaration(), &registry(), &analyzers).unwrap();

    assert_eq!(
        descriptor.features().keys().collect::<Vec<_>>(),
        vec!["read_only_properties", "object_properties"]
    );
    assert_eq!(descriptor.feature("read_only_properties"), Some(&json!(1)));
}

#[test]
fn test_object_properties_lists_single_class_properties() {
    let analyzers = AnalyzerRegistry::new().with(ObjectProperties);
    let descriptor = ClassDescriptor::build(&declaration(), &registry(), &analyzers).unwrap();

    assert_eq!(
        descriptor.feature(ObjectProperties::NAME),
        Some(&json!({
            "createdAt": { "class": "DateTime", "is_array": false },
            "parents": { "class": "Metadata\\ClassMetadata", "is_array": true },
        }))
    );
}

#[test]
fn test_a_failing_analyzer_aborts_construction() {
    let analyzers = AnalyzerRegistry::new().with(ObjectProperties).with(Failing);
    let error = ClassDescriptor::build(&declaration(), &registry(), &analyzers).unwrap_err();

    assert_eq!(
        error.to_string(),
        format!("Feature analyzer 'failing' failed for class {CLASS_FOR_TESTING}: always fails")
    );
}

#[test]
fn test_empty_registry_adds_no_features() {
    let analyzers = AnalyzerRegistry::new();
    let descriptor = ClassDescriptor::build(&declaration(), &registry(), &analyzers).unwrap();

    assert!(analyzers.is_empty());
    assert!(descriptor.features().is_empty());
    assert_eq!(format!("{analyzers:?}"), "[]");
}
