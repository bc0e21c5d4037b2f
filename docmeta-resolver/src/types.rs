//! Resolved type terms and declarations
//!
//! A [`TypeDeclaration`] is the union written in a `var`/`method` annotation after
//! every class name has been rewritten to its fully-qualified identifier.

use crate::registry::TypeRegistry;
use docmeta_parser::{PrimitiveKind, NAMESPACE_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One alternative of a resolved declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypeTerm {
    Primitive(PrimitiveKind),
    /// Class or interface identifier. Fully qualified once resolution found it,
    /// otherwise the token exactly as written.
    ClassRef(String),
    /// `self`: the declaring class or any subtype
    SelfRef,
    /// `$this`: the very instance the declaration is checked against
    ThisRef,
    /// `T[]`; never wraps another `ArrayOf`
    ArrayOf(Box<TypeTerm>),
    /// Recognised but unsupported keyword (`callable`, `resource`, ...)
    Unhandled(String),
}

impl TypeTerm {
    pub fn class_ref(identifier: impl Into<String>) -> Self {
        TypeTerm::ClassRef(identifier.into())
    }

    pub fn array_of(inner: TypeTerm) -> Self {
        TypeTerm::ArrayOf(Box::new(inner))
    }

    /// True for `self`, `$this`, registered classes, and arrays of those.
    ///
    /// Interfaces do not count: an object type must name something that can be
    /// instantiated.
    pub fn is_object_type(&self, registry: &TypeRegistry) -> bool {
        match self {
            TypeTerm::SelfRef | TypeTerm::ThisRef => true,
            TypeTerm::ClassRef(identifier) => registry.is_class(identifier),
            TypeTerm::ArrayOf(inner) => inner.is_object_type(registry),
            TypeTerm::Primitive(_) | TypeTerm::Unhandled(_) => false,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, TypeTerm::Primitive(PrimitiveKind::Mixed))
    }
}

impl fmt::Display for TypeTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTerm::Primitive(kind) => write!(f, "{kind}"),
            TypeTerm::ClassRef(identifier) => f.write_str(identifier),
            TypeTerm::SelfRef => f.write_str("self"),
            TypeTerm::ThisRef => f.write_str("$this"),
            TypeTerm::ArrayOf(inner) => write!(f, "{inner}[]"),
            TypeTerm::Unhandled(name) => f.write_str(name),
        }
    }
}

/// A non-empty union of [`TypeTerm`]s
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TypeTerm>", into = "Vec<TypeTerm>")]
pub struct TypeDeclaration {
    terms: Vec<TypeTerm>,
}

impl TypeDeclaration {
    /// Returns `None` for an empty term list
    pub fn new(terms: Vec<TypeTerm>) -> Option<Self> {
        if terms.is_empty() {
            None
        } else {
            Some(Self { terms })
        }
    }

    pub fn single(term: TypeTerm) -> Self {
        Self { terms: vec![term] }
    }

    pub fn terms(&self) -> &[TypeTerm] {
        &self.terms
    }

    pub fn is_union(&self) -> bool {
        self.terms.len() > 1
    }

    /// The only term, if this is not a union
    pub fn single_term(&self) -> Option<&TypeTerm> {
        match self.terms.as_slice() {
            [term] => Some(term),
            _ => None,
        }
    }

    pub fn is_object_type(&self, registry: &TypeRegistry) -> bool {
        self.single_term()
            .is_some_and(|term| term.is_object_type(registry))
    }
}

impl fmt::Display for TypeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

/// Raised when deserializing a declaration without terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyDeclarationError;

impl fmt::Display for EmptyDeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a type declaration needs at least one term")
    }
}

impl TryFrom<Vec<TypeTerm>> for TypeDeclaration {
    type Error = EmptyDeclarationError;

    fn try_from(terms: Vec<TypeTerm>) -> Result<Self, Self::Error> {
        TypeDeclaration::new(terms).ok_or(EmptyDeclarationError)
    }
}

impl From<TypeDeclaration> for Vec<TypeTerm> {
    fn from(declaration: TypeDeclaration) -> Self {
        declaration.terms
    }
}

/// Namespace of a fully-qualified class name: everything before the last separator
pub fn namespace_of(class_name: &str) -> &str {
    match class_name.rfind(NAMESPACE_SEPARATOR) {
        Some(index) => &class_name[..index],
        None => "",
    }
}
