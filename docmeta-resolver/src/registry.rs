//! Registry of known type identifiers
//!
//! Answers "does this identifier denote a type" during resolution and
//! "is this type a subtype of that one" during validation. The subtype relation
//! is computed once, when the registry is built, from an inheritance graph.

use crate::error::RegistryError;
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use petgraph::algo;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
}

/// A known type and the types it directly extends or implements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub parents: Vec<String>,
}

impl TypeDefinition {
    pub fn class(name: impl Into<String>, parents: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            parents: parents.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn interface(name: impl Into<String>, parents: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Interface,
            parents: parents.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Collects type definitions; [`TypeRegistryBuilder::build`] validates them
#[derive(Debug, Clone, Default)]
pub struct TypeRegistryBuilder {
    definitions: IndexMap<String, TypeDefinition>,
    duplicates: Vec<String>,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(self, name: &str, parents: &[&str]) -> Self {
        self.define(TypeDefinition::class(name, parents))
    }

    pub fn interface(self, name: &str, parents: &[&str]) -> Self {
        self.define(TypeDefinition::interface(name, parents))
    }

    pub fn define(mut self, definition: TypeDefinition) -> Self {
        self.add(definition);
        self
    }

    pub fn add(&mut self, definition: TypeDefinition) {
        if self.definitions.contains_key(&definition.name) {
            self.duplicates.push(definition.name);
            return;
        }
        self.definitions.insert(definition.name.clone(), definition);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn build(self) -> Result<TypeRegistry, RegistryError> {
        if let Some(type_name) = self.duplicates.into_iter().next() {
            return Err(RegistryError::DuplicateType { type_name });
        }

        // Edges point from a type to the types it extends or implements
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let nodes: HashMap<String, NodeIndex> = self
            .definitions
            .keys()
            .map(|name| (name.clone(), graph.add_node(name.clone())))
            .collect();

        for definition in self.definitions.values() {
            let child = nodes[&definition.name];
            for parent in &definition.parents {
                let Some(&parent_node) = nodes.get(parent) else {
                    return Err(RegistryError::UnknownParentType {
                        type_name: definition.name.clone(),
                        parent: parent.clone(),
                    });
                };
                graph.add_edge(child, parent_node, ());
            }
        }

        if let Err(cycle) = algo::toposort(&graph, None) {
            return Err(RegistryError::InheritanceCycle {
                type_name: graph[cycle.node_id()].clone(),
            });
        }

        let mut ancestors = HashMap::with_capacity(nodes.len());
        for (name, &node) in &nodes {
            let mut reachable = HashSet::new();
            let mut dfs = Dfs::new(&graph, node);
            while let Some(visited) = dfs.next(&graph) {
                if visited != node {
                    reachable.insert(graph[visited].clone());
                }
            }
            ancestors.insert(name.clone(), reachable);
        }

        tracing::debug!(
            types = nodes.len(),
            edges = graph.edge_count(),
            "built type registry"
        );

        Ok(TypeRegistry {
            definitions: self.definitions,
            ancestors,
        })
    }
}

/// Immutable set of known types with a precomputed ancestor table
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    definitions: IndexMap<String, TypeDefinition>,
    ancestors: HashMap<String, HashSet<String>>,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// A registry that knows no types at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.definitions.get(name)
    }

    pub fn kind(&self, name: &str) -> Option<TypeKind> {
        self.definitions.get(name).map(|definition| definition.kind)
    }

    pub fn is_class(&self, name: &str) -> bool {
        self.kind(name) == Some(TypeKind::Class)
    }

    pub fn is_interface(&self, name: &str) -> bool {
        self.kind(name) == Some(TypeKind::Interface)
    }

    /// `child` is `ancestor`, extends it, or implements it (transitively).
    /// Unregistered names are only subtypes of themselves.
    pub fn is_subtype(&self, child: &str, ancestor: &str) -> bool {
        child == ancestor
            || self
                .ancestors
                .get(child)
                .is_some_and(|ancestors| ancestors.contains(ancestor))
    }

    /// All transitive supertypes of `name`
    pub fn ancestors(&self, name: &str) -> impl Iterator<Item = &str> {
        self.ancestors
            .get(name)
            .into_iter()
            .flat_map(|ancestors| ancestors.iter().map(String::as_str))
    }

    /// The first direct parent of `name` that is a class
    pub fn parent_class(&self, name: &str) -> Option<&str> {
        self.definitions.get(name).and_then(|definition| {
            definition
                .parents
                .iter()
                .map(String::as_str)
                .find(|parent| self.is_class(parent))
        })
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
