//! Selection conditions.
//!
//! This module provides:
//! - A tokenizer for condition text
//! - A recursive-descent parser producing a `Predicate` tree
//! - A tree-walking evaluator against one tuple
//!
//! Conditions are never compiled into executable code; the tree is the only
//! representation that is ever evaluated.

pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{ComparisonOperator, Operand, Predicate};
pub use error::{PredicateError, PredicateResult};
pub use eval::{evaluate_predicate, PredicateEvaluator};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::Token;

use crate::relation::Tuple;

/// Parse condition text into a predicate tree
pub fn parse_predicate(condition: &str) -> PredicateResult<Predicate> {
    Parser::new(condition)?.parse()
}

/// Parse condition text, rejecting parentheses nested deeper than `max_depth`
pub fn parse_predicate_with_depth(
    condition: &str,
    max_depth: usize,
) -> PredicateResult<Predicate> {
    Parser::new(condition)?.with_max_depth(max_depth).parse()
}

/// A parsed condition together with the text it came from, so errors can
/// quote what the user typed rather than a normalized rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub text: String,
    pub predicate: Predicate,
}

impl Condition {
    pub fn parse(text: &str) -> PredicateResult<Self> {
        Self::parse_with_depth(text, crate::config::DEFAULT_MAX_DEPTH)
    }

    pub fn parse_with_depth(text: &str, max_depth: usize) -> PredicateResult<Self> {
        let text = text.trim();
        Ok(Self {
            text: text.to_string(),
            predicate: parse_predicate_with_depth(text, max_depth)?,
        })
    }

    pub fn matches(&self, tuple: &Tuple) -> PredicateResult<bool> {
        evaluate_predicate(&self.predicate, tuple)
    }
}

impl std::str::FromStr for Predicate {
    type Err = PredicateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_predicate(s)
    }
}
