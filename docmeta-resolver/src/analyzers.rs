//! Feature analyzers
//!
//! Strategy objects that extract additional metadata from a freshly built
//! [`ClassDescriptor`]. Each analyzer's output is stored as JSON under its name,
//! so descriptors stay serializable whatever the analyzer produces.

use crate::descriptor::ClassDescriptor;
use crate::error::ConstructionError;
use crate::registry::TypeRegistry;
use crate::source::ClassDeclaration;
use crate::types::TypeTerm;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

/// What an analyzer gets to look at
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    /// The descriptor as built so far, without features
    pub descriptor: &'a ClassDescriptor,
    pub declaration: &'a ClassDeclaration,
    pub registry: &'a TypeRegistry,
}

pub trait FeatureAnalyzer: Send + Sync {
    /// Key of the extracted data in [`ClassDescriptor::features`]
    fn name(&self) -> &str;

    /// Must not depend on the output of other analyzers
    fn extract(&self, context: &AnalysisContext<'_>) -> Result<Value, ConstructionError>;
}

/// Ordered set of analyzers run on every descriptor a factory builds
#[derive(Clone, Default)]
pub struct AnalyzerRegistry {
    analyzers: Vec<Arc<dyn FeatureAnalyzer>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, analyzer: Arc<dyn FeatureAnalyzer>) {
        self.analyzers.push(analyzer);
    }

    pub fn with(mut self, analyzer: impl FeatureAnalyzer + 'static) -> Self {
        self.register(Arc::new(analyzer));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.analyzers.iter().map(|analyzer| analyzer.name())
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Run every analyzer in registration order. The first failure aborts.
    pub fn extract_all(
        &self,
        context: &AnalysisContext<'_>,
    ) -> Result<IndexMap<String, Value>, ConstructionError> {
        let mut features = IndexMap::with_capacity(self.analyzers.len());

        for analyzer in &self.analyzers {
            let name = analyzer.name();
            let value = analyzer.extract(context)?;
            trace!(analyzer = name, class = context.descriptor.name(), "extracted feature");

            if features.insert(name.to_string(), value).is_some() {
                warn!(analyzer = name, "analyzer registered twice, keeping the last result");
            }
        }

        Ok(features)
    }
}

impl fmt::Debug for AnalyzerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Maps every property declared as an object type (or an array of one) to the
/// class it holds:
///
/// ```json
/// { "createdAt": { "class": "DateTime", "is_array": false } }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectProperties;

impl ObjectProperties {
    pub const NAME: &'static str = "object_properties";
}

impl FeatureAnalyzer for ObjectProperties {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn extract(&self, context: &AnalysisContext<'_>) -> Result<Value, ConstructionError> {
        let scope = context.descriptor.scope(context.registry);
        let mut properties = Map::new();

        for property in context.descriptor.properties() {
            let Some(declaration) = &property.declaration else {
                continue;
            };
            if !declaration.is_object_type(context.registry) {
                continue;
            }
            let Some(term) = declaration.single_term() else {
                continue;
            };

            let (element, is_array) = match term {
                TypeTerm::ArrayOf(inner) => (inner.as_ref(), true),
                other => (other, false),
            };

            let class = scope.class_identifier_of(element).map_err(|error| {
                ConstructionError::AnalyzerFailed {
                    analyzer: Self::NAME.to_string(),
                    class: context.descriptor.name().to_string(),
                    message: error.to_string(),
                }
            })?;

            properties.insert(
                property.name.clone(),
                json!({ "class": class, "is_array": is_array }),
            );
        }

        Ok(Value::Object(properties))
    }
}
