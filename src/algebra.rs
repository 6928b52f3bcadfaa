//! Relational algebra expressions.
//!
//! This module provides:
//! - A structural scanner that finds operators at the top nesting level
//! - A parser producing an `Expression` tree
//! - An evaluator computing a relation from that tree and a store
//!
//! Binary operators have no precedence among themselves: the leftmost
//! top-level operator splits the expression, so `A ∪ B - C` reads as
//! `A ∪ (B - C)`. Use parentheses to group otherwise.

pub mod ast;
pub mod evaluate;
pub mod parser;
pub mod scanner;

pub use ast::{Expression, UnaryOperator};
pub use evaluate::Evaluator;
pub use parser::Parser;

use crate::config::EngineConfig;
use crate::error::AlgebraResult;
use crate::relation::Relation;
use crate::store::RelationStore;

/// Parse query text with the given limits
pub fn parse_expression(text: &str, config: &EngineConfig) -> AlgebraResult<Expression> {
    Parser::new(config).parse(text)
}

/// Evaluate query text against a store with default limits
pub fn evaluate(text: &str, store: &RelationStore) -> AlgebraResult<Relation> {
    evaluate_with_config(text, store, &EngineConfig::default())
}

/// Evaluate query text against a store.
///
/// Text that exactly names a stored relation returns a copy of it, even when
/// the name would not parse as an expression.
pub fn evaluate_with_config(
    text: &str,
    store: &RelationStore,
    config: &EngineConfig,
) -> AlgebraResult<Relation> {
    if let Some(relation) = store.get(text.trim()) {
        return Ok(relation.clone());
    }

    let expr = parse_expression(text, config)?;
    log::debug!("evaluating {}", expr);
    Evaluator::new(store).evaluate(&expr)
}
