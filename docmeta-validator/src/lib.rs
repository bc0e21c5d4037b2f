//! Docmeta Validator
//!
//! Decides whether a runtime [`Value`] satisfies a resolved
//! [`TypeDeclaration`](docmeta_resolver::TypeDeclaration).
//!
//! `self` and `$this` are checked against an [`ObjectContext`]; class terms
//! against the subtype relation of a [`TypeRegistry`](docmeta_resolver::TypeRegistry).

pub mod context;
pub mod error;
pub mod validator;
pub mod value;

pub use context::ObjectContext;
pub use error::ValidationError;
pub use validator::Validator;
pub use value::{same_instance, ArrayKey, Instance, ObjectRef, Value, ValueKind, CLASS_KEY};

#[cfg(test)]
mod tests;
