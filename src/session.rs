//! Session management for interactive query evaluation.

use crate::algebra::evaluate_with_config;
use crate::config::EngineConfig;
use crate::error::{AlgebraError, AlgebraResult};
use crate::history::QueryHistory;
use crate::relation::Relation;
use crate::store::RelationStore;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of one query
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub relation: Relation,
    pub elapsed: Duration,
}

/// Represents a user session over a shared relation store.
pub struct Session {
    /// The relation store, shared with whoever edits it.
    store: Arc<RwLock<RelationStore>>,
    /// Engine limits.
    config: EngineConfig,
    /// Successful queries, newest first.
    history: QueryHistory,
}

impl Session {
    /// Creates a new session owning the given store.
    pub fn new(store: RelationStore, config: EngineConfig) -> Self {
        Self::with_shared_store(Arc::new(RwLock::new(store)), config)
    }

    /// Creates a session over a store shared with other owners.
    pub fn with_shared_store(store: Arc<RwLock<RelationStore>>, config: EngineConfig) -> Self {
        Session {
            store,
            config,
            history: QueryHistory::new(config.history_capacity),
        }
    }

    /// Evaluates a query and records it in the history.
    ///
    /// The store's read lock is held for the whole evaluation, so edits made
    /// through `store()` wait until the query finishes.
    pub fn execute(&mut self, query: &str) -> AlgebraResult<QueryOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AlgebraError::parse("empty query", query));
        }

        log::debug!("executing query: {}", query);
        let start = Instant::now();
        let relation = {
            let store = self.store.read();
            evaluate_with_config(query, &store, &self.config)?
        };
        let elapsed = start.elapsed();

        log::info!(
            "{} tuple(s) in {:.2} ms",
            relation.len(),
            elapsed.as_secs_f64() * 1000.0
        );
        self.history.record(query, &relation);

        Ok(QueryOutcome { relation, elapsed })
    }

    /// Handle to the shared store.
    pub fn store(&self) -> Arc<RwLock<RelationStore>> {
        Arc::clone(&self.store)
    }

    /// Names of the stored relations, sorted.
    pub fn relation_names(&self) -> Vec<String> {
        self.store.read().names()
    }

    pub fn history(&self) -> &QueryHistory {
        &self.history
    }
}
