//! Declaration sources
//!
//! A [`DeclarationSource`] hands out the raw, unresolved shape of a class: its
//! import statements, class-level annotations and properties.

use crate::annotations::Annotations;
use crate::error::{MetadataError, RegistryError};
use crate::registry::{TypeDefinition, TypeRegistry, TypeRegistryBuilder};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Raw declaration of one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    pub name: String,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub properties: Vec<PropertyDeclaration>,
}

impl ClassDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            annotations: Annotations::new(),
            properties: Vec::new(),
        }
    }

    pub fn import(mut self, statement: impl Into<String>) -> Self {
        self.imports.push(statement.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<crate::Annotation>) -> Self {
        self.annotations.add(annotation);
        self
    }

    pub fn property(mut self, property: PropertyDeclaration) -> Self {
        self.properties.push(property);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    pub name: String,
    #[serde(default)]
    pub annotations: Annotations,
}

impl PropertyDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Annotations::new(),
        }
    }

    /// Property with a single `var` annotation
    pub fn typed(name: impl Into<String>, data_type: &str) -> Self {
        Self::new(name).annotation(crate::Annotation::var(data_type))
    }

    pub fn annotation(mut self, annotation: impl Into<crate::Annotation>) -> Self {
        self.annotations.add(annotation);
        self
    }
}

/// Where class declarations come from
pub trait DeclarationSource {
    fn declaration(&self, class_name: &str) -> Option<ClassDeclaration>;

    fn contains(&self, class_name: &str) -> bool {
        self.declaration(class_name).is_some()
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    types: Vec<TypeDefinition>,
    #[serde(default)]
    classes: Vec<ClassDeclaration>,
}

/// In-memory source loaded from a JSON manifest:
///
/// ```json
/// {
///   "types": [{ "name": "Vendor\\Base", "kind": "class" }],
///   "classes": [{ "name": "Vendor\\Child", "imports": ["Vendor\\Base"], "properties": [] }]
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonDeclarationSource {
    types: Vec<TypeDefinition>,
    classes: IndexMap<String, ClassDeclaration>,
}

impl JsonDeclarationSource {
    pub fn new(
        types: Vec<TypeDefinition>,
        classes: Vec<ClassDeclaration>,
    ) -> Result<Self, RegistryError> {
        let mut indexed = IndexMap::with_capacity(classes.len());
        for class in classes {
            if indexed.contains_key(&class.name) {
                return Err(RegistryError::DuplicateType {
                    type_name: class.name,
                });
            }
            indexed.insert(class.name.clone(), class);
        }

        Ok(Self {
            types,
            classes: indexed,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let manifest: Manifest = serde_json::from_str(json)?;
        Ok(Self::new(manifest.types, manifest.classes)?)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Registry of the manifest's types. Declared classes missing from
    /// `types` are registered as classes without parents.
    pub fn registry(&self) -> Result<TypeRegistry, RegistryError> {
        let mut builder = TypeRegistryBuilder::new();
        for definition in &self.types {
            builder.add(definition.clone());
        }
        for name in self.classes.keys() {
            if !builder.contains(name) {
                builder.add(TypeDefinition::class(name.as_str(), &[]));
            }
        }
        builder.build()
    }
}

impl DeclarationSource for JsonDeclarationSource {
    fn declaration(&self, class_name: &str) -> Option<ClassDeclaration> {
        self.classes.get(class_name).cloned()
    }

    fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }
}
