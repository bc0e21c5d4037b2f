//! Class descriptors
//!
//! A [`ClassDescriptor`] is the resolved, immutable metadata of one class:
//! namespace, import table, the resolved declaration of every property and of
//! every declared (virtual) method, plus whatever the registered feature
//! analyzers extracted. It round-trips losslessly through JSON.

use crate::analyzers::{AnalysisContext, AnalyzerRegistry};
use crate::annotations::{Annotations, MethodAnnotation};
use crate::error::{ConstructionError, MetadataError, NotAnObjectError};
use crate::imports::ImportTable;
use crate::registry::TypeRegistry;
use crate::resolver::ResolutionScope;
use crate::source::{ClassDeclaration, PropertyDeclaration};
use crate::types::{namespace_of, TypeDeclaration};
use docmeta_parser::ParseError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub class: String,
    pub name: String,
    #[serde(default)]
    pub annotations: Annotations,
    /// `None` when the property carries no `var` annotation
    pub declaration: Option<TypeDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMethodDescriptor {
    pub class: String,
    pub name: String,
    pub parameters: IndexMap<String, Option<TypeDeclaration>>,
    pub return_type: Option<TypeDeclaration>,
    pub is_static: bool,
}

impl VirtualMethodDescriptor {
    /// `Some(None)` means the parameter exists but is untyped
    pub fn parameter(&self, name: &str) -> Option<Option<&TypeDeclaration>> {
        self.parameters.get(name).map(Option::as_ref)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    name: String,
    namespace: String,
    imports: ImportTable,
    #[serde(default)]
    annotations: Annotations,
    #[serde(default)]
    properties: IndexMap<String, PropertyDescriptor>,
    #[serde(default)]
    virtual_methods: IndexMap<String, VirtualMethodDescriptor>,
    #[serde(default)]
    features: IndexMap<String, serde_json::Value>,
}

impl ClassDescriptor {
    /// Build the descriptor and run every registered feature analyzer on it
    pub fn build(
        declaration: &ClassDeclaration,
        registry: &TypeRegistry,
        analyzers: &AnalyzerRegistry,
    ) -> Result<Self, ConstructionError> {
        let mut descriptor = Self::from_declaration(declaration, registry)?;

        let context = AnalysisContext {
            descriptor: &descriptor,
            declaration,
            registry,
        };
        let features = analyzers.extract_all(&context)?;
        descriptor.features = features;

        debug!(
            class = %descriptor.name,
            properties = descriptor.properties.len(),
            virtual_methods = descriptor.virtual_methods.len(),
            features = descriptor.features.len(),
            "built class descriptor"
        );

        Ok(descriptor)
    }

    /// Build the descriptor without feature analysis
    pub fn from_declaration(
        declaration: &ClassDeclaration,
        registry: &TypeRegistry,
    ) -> Result<Self, ConstructionError> {
        let name = declaration.name.clone();
        let namespace = namespace_of(&name).to_string();
        let imports = ImportTable::from_statements(&name, &declaration.imports)?;
        let scope = ResolutionScope::new(&name, &namespace, &imports, registry);

        let mut properties = IndexMap::with_capacity(declaration.properties.len());
        for property in &declaration.properties {
            properties.insert(property.name.clone(), build_property(&scope, property)?);
        }

        let mut virtual_methods = IndexMap::new();
        for method in declaration.annotations.methods() {
            if virtual_methods.contains_key(&method.name) {
                return Err(ConstructionError::DuplicateVirtualMethod {
                    class: name.clone(),
                    method: method.name.clone(),
                });
            }
            virtual_methods.insert(method.name.clone(), build_virtual_method(&scope, method)?);
        }

        Ok(Self {
            name,
            namespace,
            imports,
            annotations: declaration.annotations.clone(),
            properties,
            virtual_methods,
            features: IndexMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.values()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    pub fn virtual_methods(&self) -> impl Iterator<Item = &VirtualMethodDescriptor> {
        self.virtual_methods.values()
    }

    pub fn virtual_method(&self, name: &str) -> Option<&VirtualMethodDescriptor> {
        self.virtual_methods.get(name)
    }

    pub fn features(&self) -> &IndexMap<String, serde_json::Value> {
        &self.features
    }

    pub fn feature(&self, analyzer: &str) -> Option<&serde_json::Value> {
        self.features.get(analyzer)
    }

    /// Resolution scope of this class against `registry`
    pub fn scope<'a>(&'a self, registry: &'a TypeRegistry) -> ResolutionScope<'a> {
        ResolutionScope::new(&self.name, &self.namespace, &self.imports, registry)
    }

    /// Resolve a raw declaration written inside this class. No input, no declaration.
    pub fn resolve(
        &self,
        raw: Option<&str>,
        registry: &TypeRegistry,
    ) -> Result<Option<TypeDeclaration>, ParseError> {
        raw.map(|raw| self.scope(registry).resolve(raw)).transpose()
    }

    /// False for a missing or malformed declaration
    pub fn is_object_type(&self, raw: Option<&str>, registry: &TypeRegistry) -> bool {
        matches!(
            self.resolve(raw, registry),
            Ok(Some(declaration)) if declaration.is_object_type(registry)
        )
    }

    pub fn class_identifier_of(
        &self,
        raw: &str,
        registry: &TypeRegistry,
    ) -> Result<String, NotAnObjectError> {
        let not_an_object = || NotAnObjectError {
            specification: raw.to_string(),
        };

        let scope = self.scope(registry);
        let declaration = scope.resolve(raw).map_err(|_| not_an_object())?;
        scope
            .class_identifier_of_declaration(&declaration)
            .map_err(|_| not_an_object())
    }

    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn resolve_member(
    scope: &ResolutionScope<'_>,
    member: String,
    raw: Option<&str>,
) -> Result<Option<TypeDeclaration>, ConstructionError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    scope
        .resolve(raw)
        .map(Some)
        .map_err(|source| ConstructionError::InvalidDeclaration {
            class: scope.class_name().to_string(),
            member,
            source,
        })
}

fn build_property(
    scope: &ResolutionScope<'_>,
    property: &PropertyDeclaration,
) -> Result<PropertyDescriptor, ConstructionError> {
    let vars: Vec<&str> = property.annotations.vars().collect();
    if vars.len() > 1 {
        return Err(ConstructionError::MultipleTypeAnnotations {
            class: scope.class_name().to_string(),
            property: property.name.clone(),
            count: vars.len(),
        });
    }

    let declaration = resolve_member(
        scope,
        format!("${}", property.name),
        vars.first().copied(),
    )?;

    Ok(PropertyDescriptor {
        class: scope.class_name().to_string(),
        name: property.name.clone(),
        annotations: property.annotations.clone(),
        declaration,
    })
}

fn build_virtual_method(
    scope: &ResolutionScope<'_>,
    method: &MethodAnnotation,
) -> Result<VirtualMethodDescriptor, ConstructionError> {
    let mut parameters = IndexMap::with_capacity(method.parameters.len());
    for (parameter, annotation) in &method.parameters {
        if annotation.has_default_value {
            return Err(ConstructionError::DefaultValueNotSupported {
                class: scope.class_name().to_string(),
                method: method.name.clone(),
                parameter: parameter.clone(),
            });
        }

        let declaration = resolve_member(
            scope,
            format!("{}(${parameter})", method.name),
            annotation.data_type.as_deref(),
        )?;
        parameters.insert(parameter.clone(), declaration);
    }

    let return_type = resolve_member(
        scope,
        format!("{}()", method.name),
        method.return_type.as_deref(),
    )?;

    Ok(VirtualMethodDescriptor {
        class: scope.class_name().to_string(),
        name: method.name.clone(),
        parameters,
        return_type,
        is_static: method.is_static,
    })
}
