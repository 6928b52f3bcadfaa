//! Error types for condition parsing and evaluation.

use thiserror::Error;

/// Errors raised while reading or evaluating a selection condition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredicateError {
    /// The condition is blank
    #[error("empty condition")]
    Empty,

    /// A character that starts no token
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// A quoted string without its closing quote
    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    /// The parser found a token it cannot use here
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// A number literal that does not parse
    #[error("invalid number: {literal}")]
    InvalidNumber { literal: String },

    /// Parentheses nested deeper than the configured limit
    #[error("condition nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    /// The condition names an attribute the tuple does not have
    #[error("unknown attribute: {name}")]
    UnknownAttribute { name: String },
}

impl PredicateError {
    /// True for errors found while evaluating against a tuple, as opposed
    /// to malformed condition text.
    pub fn is_runtime(&self) -> bool {
        matches!(self, PredicateError::UnknownAttribute { .. })
    }
}

/// Result type for condition operations
pub type PredicateResult<T> = Result<T, PredicateError>;
