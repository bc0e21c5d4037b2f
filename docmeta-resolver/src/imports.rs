//! Per-class import table (alias → fully-qualified identifier)

use crate::error::ConstructionError;
use docmeta_parser::parse_import_statement;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportTable {
    entries: IndexMap<String, String>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from raw import statements of `class_name`, in order
    pub fn from_statements<I, S>(class_name: &str, statements: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();

        for statement in statements {
            let statement = statement.as_ref();
            let import = parse_import_statement(statement).map_err(|source| {
                ConstructionError::InvalidImportStatement {
                    statement: statement.to_string(),
                    class: class_name.to_string(),
                    source,
                }
            })?;

            let alias = import.alias().to_string();
            if let Some(first) = table.entries.get(&alias) {
                return Err(ConstructionError::DuplicateImportAlias {
                    alias,
                    class: class_name.to_string(),
                    first: first.clone(),
                    second: import.path,
                });
            }

            table.entries.insert(alias, import.path);
        }

        Ok(table)
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    pub fn contains_alias(&self, alias: &str) -> bool {
        self.entries.contains_key(alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, identifier)| (alias.as_str(), identifier.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
