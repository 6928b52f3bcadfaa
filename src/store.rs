//! In-memory relation store.
//!
//! The store maps relation names to relations. Query evaluation only reads
//! it; the mutating API below serves the outer layer (CLI, fixtures, seed
//! files). Every stored relation keeps a column list so that an empty
//! relation still knows which attributes its tuples must carry.

use crate::relation::{Relation, Tuple};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised by store mutations and seed parsing
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Relation not found: {name}")]
    NotFound { name: String },

    #[error("Relation already exists: {name}")]
    AlreadyExists { name: String },

    #[error("Invalid relation name: {name:?}")]
    InvalidName { name: String },

    #[error("Relation {name} needs at least one column")]
    NoColumns { name: String },

    #[error("Invalid column name {column:?} in relation {name}")]
    InvalidColumn { name: String, column: String },

    #[error("Duplicate column {column} in relation {name}")]
    DuplicateColumn { name: String, column: String },

    #[error(
        "Tuple does not match relation {name}: expected ({}), found ({})",
        .expected.join(", "),
        .found.join(", ")
    )]
    ColumnMismatch {
        name: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Tuple index {index} out of range for relation {name} ({len} tuples)")]
    IndexOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },

    #[error("Unknown sample relation: {name}")]
    UnknownSample { name: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Default)]
struct StoredRelation {
    columns: Vec<String>,
    relation: Relation,
}

impl StoredRelation {
    /// Check a tuple against the column list and return it in column order.
    /// A relation without columns adopts the first tuple's attributes.
    fn conform(&mut self, name: &str, tuple: Tuple) -> StoreResult<Tuple> {
        if self.columns.is_empty() {
            self.columns = tuple.names().map(str::to_string).collect();
            return Ok(tuple);
        }

        let matches = tuple.len() == self.columns.len()
            && self.columns.iter().all(|column| tuple.contains(column));
        if !matches {
            return Err(StoreError::ColumnMismatch {
                name: name.to_string(),
                expected: self.columns.clone(),
                found: tuple.names().map(str::to_string).collect(),
            });
        }

        Ok(tuple.project(&self.columns))
    }

    fn check_index(&self, name: &str, index: usize) -> StoreResult<()> {
        if index >= self.relation.len() {
            return Err(StoreError::IndexOutOfRange {
                name: name.to_string(),
                index,
                len: self.relation.len(),
            });
        }
        Ok(())
    }
}

/// Mapping from relation name to relation
#[derive(Debug, Clone, Default)]
pub struct RelationStore {
    relations: BTreeMap<String, StoredRelation>,
}

impl RelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a stored relation by name
    pub fn get(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name).map(|stored| &stored.relation)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    /// Column list of a stored relation
    pub fn columns(&self, name: &str) -> Option<&[String]> {
        self.relations
            .get(name)
            .map(|stored| stored.columns.as_slice())
    }

    /// Relation names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.relations.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Relation)> {
        self.relations
            .iter()
            .map(|(name, stored)| (name.as_str(), &stored.relation))
    }

    /// Create an empty relation with the given columns
    pub fn create_relation<I, S>(&mut self, name: &str, columns: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = self.check_new_name(name)?;

        let mut checked: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into().trim().to_string();
            if column.is_empty() {
                return Err(StoreError::InvalidColumn { name, column });
            }
            if checked.contains(&column) {
                return Err(StoreError::DuplicateColumn { name, column });
            }
            checked.push(column);
        }
        if checked.is_empty() {
            return Err(StoreError::NoColumns { name });
        }

        log::debug!("creating relation {} ({})", name, checked.join(", "));
        self.relations.insert(
            name,
            StoredRelation {
                columns: checked,
                relation: Relation::empty(),
            },
        );
        Ok(())
    }

    /// Remove a relation, returning its tuples
    pub fn drop_relation(&mut self, name: &str) -> StoreResult<Relation> {
        self.relations
            .remove(name)
            .map(|stored| stored.relation)
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }

    /// Store a whole relation under a new name.
    ///
    /// Columns come from the first tuple; every tuple must carry the same
    /// attribute set.
    pub fn insert_relation(&mut self, name: &str, relation: Relation) -> StoreResult<()> {
        let name = self.check_new_name(name)?;

        let mut stored = StoredRelation {
            columns: relation.schema().unwrap_or_default(),
            relation: Relation::empty(),
        };
        for tuple in relation {
            let tuple = stored.conform(&name, tuple)?;
            stored.relation.push(tuple);
        }

        log::debug!("storing relation {} with {} tuples", name, stored.relation.len());
        self.relations.insert(name, stored);
        Ok(())
    }

    /// Append a tuple to a relation
    pub fn insert_tuple(&mut self, name: &str, tuple: Tuple) -> StoreResult<()> {
        let stored = self.stored_mut(name)?;
        let tuple = stored.conform(name, tuple)?;
        stored.relation.push(tuple);
        Ok(())
    }

    /// Replace the tuple at `index`, returning the old one
    pub fn update_tuple(&mut self, name: &str, index: usize, tuple: Tuple) -> StoreResult<Tuple> {
        let stored = self.stored_mut(name)?;
        stored.check_index(name, index)?;
        let tuple = stored.conform(name, tuple)?;
        stored
            .relation
            .replace(index, tuple)
            .ok_or_else(|| StoreError::IndexOutOfRange {
                name: name.to_string(),
                index,
                len: stored.relation.len(),
            })
    }

    /// Remove the tuple at `index`
    pub fn delete_tuple(&mut self, name: &str, index: usize) -> StoreResult<Tuple> {
        let stored = self.stored_mut(name)?;
        stored.check_index(name, index)?;
        stored
            .relation
            .remove(index)
            .ok_or_else(|| StoreError::IndexOutOfRange {
                name: name.to_string(),
                index,
                len: stored.relation.len(),
            })
    }

    /// Parse a store from `{ "NAME": [ {attr: value, ...}, ... ], ... }`
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let relations: BTreeMap<String, Relation> = serde_json::from_str(json)?;
        let mut store = RelationStore::new();
        for (name, relation) in relations {
            store.insert_relation(&name, relation)?;
        }
        Ok(store)
    }

    /// Load a store from a JSON seed file
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read store file {}", path.display()))?;
        let store = Self::from_json_str(&json)
            .with_context(|| format!("Failed to load store file {}", path.display()))?;
        log::info!("loaded {} relations from {}", store.len(), path.display());
        Ok(store)
    }

    /// Dump the store in the seed file format
    pub fn to_json_string(&self) -> StoreResult<String> {
        let relations: BTreeMap<&str, &Relation> = self.iter().collect();
        Ok(serde_json::to_string_pretty(&relations)?)
    }

    fn check_new_name(&self, name: &str) -> StoreResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidName {
                name: name.to_string(),
            });
        }
        if self.contains(name) {
            return Err(StoreError::AlreadyExists {
                name: name.to_string(),
            });
        }
        Ok(name.to_string())
    }

    fn stored_mut(&mut self, name: &str) -> StoreResult<&mut StoredRelation> {
        self.relations
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }
}
