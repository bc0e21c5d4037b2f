// Docmeta AST
// Syntax trees for type declarations and import statements

use miette::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the segments of a qualified type name (`Vendor\Package\Name`)
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Byte range within the parsed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_source_span(self) -> SourceSpan {
        SourceSpan::new(self.start.into(), self.len())
    }
}

/// Built-in scalar and pseudo types understood by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
    Null,
    True,
    False,
    Void,
    Mixed,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 11] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Int,
        PrimitiveKind::Float,
        PrimitiveKind::String,
        PrimitiveKind::Array,
        PrimitiveKind::Object,
        PrimitiveKind::Null,
        PrimitiveKind::True,
        PrimitiveKind::False,
        PrimitiveKind::Void,
        PrimitiveKind::Mixed,
    ];

    /// The keyword used for this kind in a declaration
    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Float => "float",
            PrimitiveKind::String => "string",
            PrimitiveKind::Array => "array",
            PrimitiveKind::Object => "object",
            PrimitiveKind::Null => "null",
            PrimitiveKind::True => "true",
            PrimitiveKind::False => "false",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Mixed => "mixed",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// What a single union member names, before resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Primitive(PrimitiveKind),
    /// `self`
    SelfType,
    /// `$this`
    This,
    /// Recognised keyword that the validator deliberately does not support
    Unhandled(String),
    /// A class or interface name; `fully_qualified` is set when written with a
    /// leading separator and the separator has already been stripped from `name`.
    Class { name: String, fully_qualified: bool },
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Primitive(kind) => write!(f, "{kind}"),
            TypeName::SelfType => f.write_str("self"),
            TypeName::This => f.write_str("$this"),
            TypeName::Unhandled(name) => f.write_str(name),
            TypeName::Class {
                name,
                fully_qualified: true,
            } => write!(f, "{NAMESPACE_SEPARATOR}{name}"),
            TypeName::Class { name, .. } => f.write_str(name),
        }
    }
}

/// One alternative of a union declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTermSyntax {
    pub name: TypeName,
    /// Written with the `[]` suffix
    pub is_array: bool,
    pub span: Span,
}

impl fmt::Display for TypeTermSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_array {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

/// A parsed declaration: the union members in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclarationSyntax {
    pub source: String,
    pub terms: Vec<TypeTermSyntax>,
}

impl TypeDeclarationSyntax {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_union(&self) -> bool {
        self.terms.len() > 1
    }
}

/// `Vendor\Package\Name` or `Vendor\Package\Name as Alias`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// Imported identifier, without a leading separator
    pub path: String,
    pub explicit_alias: Option<String>,
    pub span: Span,
}

impl ImportStatement {
    /// The short name the import is visible under: the explicit alias if
    /// present, else the last path segment.
    pub fn alias(&self) -> &str {
        match &self.explicit_alias {
            Some(alias) => alias,
            None => self
                .path
                .rsplit(NAMESPACE_SEPARATOR)
                .next()
                .unwrap_or(&self.path),
        }
    }
}
