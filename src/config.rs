//! Engine configuration.

/// Default maximum expression nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default number of queries kept in history
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Limits applied by the engine and session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deepest expression nesting the parser accepts
    pub max_depth: usize,
    /// Entries kept by the query history
    pub history_capacity: usize,
}

impl EngineConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}
