//! Relation model: values, tuples, and relations.
//!
//! A relation is an ordered sequence of tuples that share one attribute set.
//! The attribute order of the first tuple is the canonical display order; an
//! empty relation has no schema at all.

pub mod tuple;
pub mod value;

pub use tuple::{Tuple, TupleKey};
pub use value::Value;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered sequence of tuples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relation {
    tuples: Vec<Tuple>,
}

impl Relation {
    pub fn new(tuples: Vec<Tuple>) -> Self {
        Self { tuples }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tuple> {
        self.tuples.iter()
    }

    pub fn push(&mut self, tuple: Tuple) {
        self.tuples.push(tuple);
    }

    /// Replace the tuple at `index`, returning the old one
    pub fn replace(&mut self, index: usize, tuple: Tuple) -> Option<Tuple> {
        self.tuples
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, tuple))
    }

    /// Remove the tuple at `index`, shifting later tuples down
    pub fn remove(&mut self, index: usize) -> Option<Tuple> {
        (index < self.tuples.len()).then(|| self.tuples.remove(index))
    }

    /// Canonical attribute names, taken from the first tuple.
    /// `None` for an empty relation.
    pub fn schema(&self) -> Option<Vec<String>> {
        self.tuples
            .first()
            .map(|first| first.names().map(str::to_string).collect())
    }

    /// Number of attributes in the schema, or zero when empty
    pub fn arity(&self) -> usize {
        self.tuples.first().map_or(0, Tuple::len)
    }

    /// True when some tuple has exactly this content
    pub fn contains(&self, tuple: &Tuple) -> bool {
        self.tuples.iter().any(|t| t == tuple)
    }

    /// Distinct tuple contents, ignoring order and multiplicity
    pub fn content_set(&self) -> HashSet<TupleKey> {
        self.tuples.iter().map(Tuple::key).collect()
    }
}

impl From<Vec<Tuple>> for Relation {
    fn from(tuples: Vec<Tuple>) -> Self {
        Relation::new(tuples)
    }
}

impl FromIterator<Tuple> for Relation {
    fn from_iter<I: IntoIterator<Item = Tuple>>(iter: I) -> Self {
        Relation::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Relation {
    type Item = Tuple;
    type IntoIter = std::vec::IntoIter<Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.tuples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Relation {
    type Item = &'a Tuple;
    type IntoIter = std::slice::Iter<'a, Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.tuples.iter()
    }
}
