//! Query history.

use crate::relation::Relation;
use std::collections::VecDeque;
use std::time::SystemTime;

/// One successfully evaluated query
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub query: String,
    pub result_count: usize,
    pub executed_at: SystemTime,
    /// Result kept so it can be shown again without re-evaluating
    pub relation: Relation,
}

/// Bounded list of past queries, newest first
#[derive(Debug, Clone)]
pub struct QueryHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl QueryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a query and its result, dropping the oldest entry when full
    pub fn record(&mut self, query: &str, relation: &Relation) {
        if self.capacity == 0 {
            return;
        }

        self.entries.push_front(HistoryEntry {
            query: query.to_string(),
            result_count: relation.len(),
            executed_at: SystemTime::now(),
            relation: relation.clone(),
        });
        self.entries.truncate(self.capacity);
    }

    /// Entry by position, 0 being the most recent
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryHistory {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_CAPACITY)
    }
}
