//! Docmeta Resolver
//!
//! Turns raw class declarations into resolved [`ClassDescriptor`]s.
//!
//! ## Architecture
//!
//! - **Import Table**: per-class alias to fully-qualified identifier mapping
//! - **Type Registry**: known classes and interfaces with a precomputed subtype relation
//! - **Resolution Scope**: rewrites the class names of a parsed declaration
//! - **Class Descriptor**: resolved property and virtual method declarations of one class
//! - **Metadata Factory**: builds descriptors from a [`DeclarationSource`] and caches them

pub mod analyzers;
pub mod annotations;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod imports;
pub mod registry;
pub mod resolver;
pub mod source;
pub mod types;

// Re-export public API
pub use analyzers::{AnalysisContext, AnalyzerRegistry, FeatureAnalyzer, ObjectProperties};
pub use annotations::{Annotation, Annotations, MethodAnnotation, ParameterAnnotation};
pub use descriptor::{ClassDescriptor, PropertyDescriptor, VirtualMethodDescriptor};
pub use error::{ConstructionError, MetadataError, NotAnObjectError, RegistryError};
pub use factory::MetadataFactory;
pub use imports::ImportTable;
pub use registry::{TypeDefinition, TypeKind, TypeRegistry, TypeRegistryBuilder};
pub use resolver::ResolutionScope;
pub use source::{ClassDeclaration, DeclarationSource, JsonDeclarationSource, PropertyDeclaration};
pub use types::{namespace_of, EmptyDeclarationError, TypeDeclaration, TypeTerm};

pub use docmeta_parser::{ParseError, PrimitiveKind};

#[cfg(test)]
mod tests;
