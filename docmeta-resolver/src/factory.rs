//! Metadata factory with a read-through descriptor cache

use crate::analyzers::AnalyzerRegistry;
use crate::descriptor::ClassDescriptor;
use crate::error::MetadataError;
use crate::registry::TypeRegistry;
use crate::source::DeclarationSource;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Builds class descriptors on first request and serves them from a cache
/// afterwards. Safe to share between threads when the source is.
pub struct MetadataFactory<S> {
    source: S,
    registry: TypeRegistry,
    analyzers: AnalyzerRegistry,
    cache: RwLock<HashMap<String, Arc<ClassDescriptor>>>,
}

impl<S: DeclarationSource> MetadataFactory<S> {
    pub fn new(source: S, registry: TypeRegistry, analyzers: AnalyzerRegistry) -> Self {
        Self {
            source,
            registry,
            analyzers,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn analyzers(&self) -> &AnalyzerRegistry {
        &self.analyzers
    }

    pub fn metadata_for_class(&self, class_name: &str) -> Result<Arc<ClassDescriptor>, MetadataError> {
        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class_name)
            .cloned();
        if let Some(descriptor) = cached {
            debug!(class = class_name, "class descriptor served from cache");
            return Ok(descriptor);
        }

        let declaration =
            self.source
                .declaration(class_name)
                .ok_or_else(|| MetadataError::ClassNotFound {
                    class: class_name.to_string(),
                })?;
        let descriptor = Arc::new(ClassDescriptor::build(
            &declaration,
            &self.registry,
            &self.analyzers,
        )?);

        // Another thread may have built the same class meanwhile; keep the first.
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let entry = cache
            .entry(class_name.to_string())
            .or_insert_with(|| Arc::clone(&descriptor));
        Ok(Arc::clone(entry))
    }

    /// Descriptors of `class_name` and of every ancestor class the source
    /// declares, root first
    pub fn hierarchy_for_class(
        &self,
        class_name: &str,
    ) -> Result<Vec<Arc<ClassDescriptor>>, MetadataError> {
        if !self.source.contains(class_name) {
            return Err(MetadataError::ClassNotFound {
                class: class_name.to_string(),
            });
        }

        let mut chain = vec![class_name];
        let mut current = class_name;
        while let Some(parent) = self.registry.parent_class(current) {
            chain.push(parent);
            current = parent;
        }

        chain
            .into_iter()
            .rev()
            .filter(|name| self.source.contains(name))
            .map(|name| self.metadata_for_class(name))
            .collect()
    }

    pub fn is_cached(&self, class_name: &str) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(class_name)
    }

    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
