pub mod algebra;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod export;
pub mod history;
pub mod predicate;
pub mod relation;
pub mod samples;
pub mod schema;
pub mod session;
pub mod store;

pub use algebra::{evaluate, evaluate_with_config, parse_expression, Expression};
pub use config::EngineConfig;
pub use error::{AlgebraError, AlgebraResult};
pub use relation::{Relation, Tuple, Value};
pub use session::{QueryOutcome, Session};
pub use store::{RelationStore, StoreError, StoreResult};
