//! Name resolution for parsed declarations
//!
//! Rewrites every class-name fragment of a declaration into a fully-qualified
//! identifier, using the declaring class's import table and namespace. Resolution
//! never fails on unknown names: they are left as written and rejected (as a
//! plain mismatch) by the validator.

use crate::error::NotAnObjectError;
use crate::imports::ImportTable;
use crate::registry::TypeRegistry;
use crate::types::{TypeDeclaration, TypeTerm};
use docmeta_parser::{
    parse_declaration, ParseError, TypeDeclarationSyntax, TypeName, TypeTermSyntax,
    NAMESPACE_SEPARATOR,
};
use tracing::trace;

/// Everything needed to resolve names written inside one class
#[derive(Debug, Clone, Copy)]
pub struct ResolutionScope<'a> {
    class_name: &'a str,
    namespace: &'a str,
    imports: &'a ImportTable,
    registry: &'a TypeRegistry,
}

impl<'a> ResolutionScope<'a> {
    pub fn new(
        class_name: &'a str,
        namespace: &'a str,
        imports: &'a ImportTable,
        registry: &'a TypeRegistry,
    ) -> Self {
        Self {
            class_name,
            namespace,
            imports,
            registry,
        }
    }

    pub fn class_name(&self) -> &'a str {
        self.class_name
    }

    pub fn namespace(&self) -> &'a str {
        self.namespace
    }

    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Parse and resolve a raw declaration
    pub fn resolve(&self, raw: &str) -> Result<TypeDeclaration, ParseError> {
        let syntax = parse_declaration(raw)?;
        self.resolve_syntax(&syntax)
    }

    /// Resolve an already parsed declaration
    pub fn resolve_syntax(
        &self,
        syntax: &TypeDeclarationSyntax,
    ) -> Result<TypeDeclaration, ParseError> {
        let terms = syntax
            .terms
            .iter()
            .map(|term| self.resolve_term(term))
            .collect();

        TypeDeclaration::new(terms).ok_or_else(|| ParseError::EmptyAlternative {
            src: syntax.source.clone(),
            span: (0, syntax.source.len()).into(),
        })
    }

    pub fn resolve_term(&self, term: &TypeTermSyntax) -> TypeTerm {
        let resolved = match &term.name {
            TypeName::Primitive(kind) => TypeTerm::Primitive(*kind),
            TypeName::SelfType => TypeTerm::SelfRef,
            TypeName::This => TypeTerm::ThisRef,
            TypeName::Unhandled(name) => TypeTerm::Unhandled(name.clone()),
            TypeName::Class {
                name,
                fully_qualified,
            } => TypeTerm::ClassRef(self.resolve_class_name(name, *fully_qualified)),
        };

        if term.is_array {
            TypeTerm::array_of(resolved)
        } else {
            resolved
        }
    }

    fn resolve_class_name(&self, name: &str, fully_qualified: bool) -> String {
        if fully_qualified {
            trace!(token = name, "fully qualified");
            return name.to_string();
        }

        if let Some(identifier) = self.imports.get(name) {
            trace!(token = name, identifier, "resolved from import table");
            return identifier.to_string();
        }

        let candidate = if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}{NAMESPACE_SEPARATOR}{name}", self.namespace)
        };

        if self.registry.contains(&candidate) {
            trace!(token = name, identifier = %candidate, "resolved in class namespace");
            candidate
        } else {
            trace!(token = name, class = self.class_name, "left unresolved");
            name.to_string()
        }
    }

    pub fn is_object_type(&self, term: &TypeTerm) -> bool {
        term.is_object_type(self.registry)
    }

    /// Concrete class a single term denotes: the identifier of a registered
    /// class, or the declaring class for `self` and `$this`.
    pub fn class_identifier_of(&self, term: &TypeTerm) -> Result<String, NotAnObjectError> {
        match term {
            TypeTerm::SelfRef | TypeTerm::ThisRef => Ok(self.class_name.to_string()),
            TypeTerm::ClassRef(identifier) if self.registry.is_class(identifier) => {
                Ok(identifier.clone())
            }
            _ => Err(NotAnObjectError {
                specification: term.to_string(),
            }),
        }
    }

    /// [`Self::class_identifier_of`] for a declaration; unions are never objects
    pub fn class_identifier_of_declaration(
        &self,
        declaration: &TypeDeclaration,
    ) -> Result<String, NotAnObjectError> {
        match declaration.single_term() {
            Some(term) => self.class_identifier_of(term),
            None => Err(NotAnObjectError {
                specification: declaration.to_string(),
            }),
        }
    }
}
