//! Validation errors
//!
//! A value that simply does not match its declaration is `Ok(false)`. These
//! errors mean the check itself could not be made.

use docmeta_parser::ParseError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Data type declaration \"{name}\" not handled yet.")]
    #[diagnostic(
        code(docmeta::validate::unsupported_declaration),
        help("`{name}` is recognised but values cannot be checked against it")
    )]
    UnsupportedDeclaration { name: String },

    #[error("Object context for $this is no object. Is it some static context?")]
    #[diagnostic(
        code(docmeta::validate::invalid_context),
        help("`$this` needs a live instance of {class} as object context")
    )]
    InvalidContext { class: String },

    #[error("Class {class} has no property ${property}")]
    #[diagnostic(code(docmeta::validate::unknown_property))]
    UnknownProperty { class: String, property: String },

    #[error("Class {class} declares no virtual method {method}()")]
    #[diagnostic(code(docmeta::validate::unknown_method))]
    UnknownMethod { class: String, method: String },

    #[error("Virtual method {class}::{method}() has no parameter ${parameter}")]
    #[diagnostic(code(docmeta::validate::unknown_parameter))]
    UnknownParameter {
        class: String,
        method: String,
        parameter: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Declaration(#[from] ParseError),
}
