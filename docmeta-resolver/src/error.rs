//! Error types for the docmeta resolver
//!
//! Following the parser's miette patterns for consistent error reporting.

use docmeta_parser::ParseError;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building a [`crate::ClassDescriptor`]. Construction is
/// all-or-nothing: any of these aborts the whole descriptor.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("Invalid use statement '{statement}' in class {class}")]
    #[diagnostic(
        code(docmeta::construction::invalid_import_statement),
        help("Use statements look like `Vendor\\Package\\Name` or `Vendor\\Package\\Name as Alias`")
    )]
    InvalidImportStatement {
        statement: String,
        class: String,
        #[source]
        #[diagnostic_source]
        source: ParseError,
    },

    #[error("Alias '{alias}' is imported twice in class {class} ('{first}' and '{second}')")]
    #[diagnostic(
        code(docmeta::construction::duplicate_import_alias),
        help("Give one of the imports a different alias with `as`")
    )]
    DuplicateImportAlias {
        alias: String,
        class: String,
        first: String,
        second: String,
    },

    #[error("Only one type annotation is allowed per property.")]
    #[diagnostic(
        code(docmeta::construction::multiple_type_annotations),
        help("Property {class}::${property} has {count} `var` annotations; keep one")
    )]
    MultipleTypeAnnotations {
        class: String,
        property: String,
        count: usize,
    },

    #[error("Currently, default values are not supported in virtual methods.")]
    #[diagnostic(
        code(docmeta::construction::default_value_not_supported),
        help("Remove the default value of ${parameter} in {class}::{method}()")
    )]
    DefaultValueNotSupported {
        class: String,
        method: String,
        parameter: String,
    },

    #[error("Virtual method {class}::{method}() is declared more than once")]
    #[diagnostic(
        code(docmeta::construction::duplicate_virtual_method),
        help("Each `method` annotation must name a different method")
    )]
    DuplicateVirtualMethod { class: String, method: String },

    #[error("Invalid data type declaration for {member} in class {class}")]
    #[diagnostic(code(docmeta::construction::invalid_declaration))]
    InvalidDeclaration {
        class: String,
        member: String,
        #[source]
        #[diagnostic_source]
        source: ParseError,
    },

    #[error("Feature analyzer '{analyzer}' failed for class {class}: {message}")]
    #[diagnostic(code(docmeta::construction::analyzer_failed))]
    AnalyzerFailed {
        analyzer: String,
        class: String,
        message: String,
    },
}

/// A declaration was asked for its class identifier but does not denote a single class
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Data type specification '{specification}' is not an object. (Interfaces and union types are not supported.)")]
#[diagnostic(
    code(docmeta::resolve::not_an_object),
    help("Check `is_object_type` before asking for the class identifier")
)]
pub struct NotAnObjectError {
    pub specification: String,
}

/// Inconsistent type registry input
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Type {type_name} is registered more than once")]
    #[diagnostic(code(docmeta::registry::duplicate_type))]
    DuplicateType { type_name: String },

    #[error("Type {type_name} extends unknown type {parent}")]
    #[diagnostic(
        code(docmeta::registry::unknown_parent),
        help("Register {parent} before building the registry")
    )]
    UnknownParentType { type_name: String, parent: String },

    #[error("Inheritance cycle through type {type_name}")]
    #[diagnostic(code(docmeta::registry::inheritance_cycle))]
    InheritanceCycle { type_name: String },
}

/// Errors surfaced by [`crate::MetadataFactory`] and descriptor (de)serialization
#[derive(Error, Diagnostic, Debug)]
pub enum MetadataError {
    #[error("No declaration found for class {class}")]
    #[diagnostic(
        code(docmeta::metadata::class_not_found),
        help("Is the class part of the declaration source?")
    )]
    ClassNotFound { class: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error("Class metadata could not be (de)serialized")]
    #[diagnostic(code(docmeta::metadata::serialization))]
    Serialization(#[from] serde_json::Error),
}
