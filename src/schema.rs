//! Schema compatibility checks run before an operator executes.

use crate::relation::Relation;
use std::fmt;
use thiserror::Error;

/// Binary operators that need a compatibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    Union,
    Difference,
    Join,
}

impl BinaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryKind::Union => "union",
            BinaryKind::Difference => "difference",
            BinaryKind::Join => "join",
        }
    }
}

impl fmt::Display for BinaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which operand of a binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Reasons two relations (or a relation and an attribute list) do not fit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("the {side} relation of the {kind} is empty")]
    EmptyOperand { kind: BinaryKind, side: Side },

    #[error("{kind} needs the same number of attributes: {left} vs {right}")]
    ArityMismatch {
        kind: BinaryKind,
        left: usize,
        right: usize,
    },

    #[error("no common attributes for join")]
    NoCommonAttributes,

    #[error(
        "invalid attributes: {}. Available attributes: {}",
        .invalid.join(", "),
        .available.join(", ")
    )]
    InvalidAttributes {
        invalid: Vec<String>,
        available: Vec<String>,
    },
}

/// Check that `left` and `right` may be combined by `kind`.
///
/// Union and difference only compare attribute counts, not names. For a join
/// the returned list holds the shared attribute names in the left schema's
/// order; it is empty for union and difference.
pub fn validate_binary(
    kind: BinaryKind,
    left: &Relation,
    right: &Relation,
) -> Result<Vec<String>, SchemaError> {
    let left_schema = left.schema().ok_or(SchemaError::EmptyOperand {
        kind,
        side: Side::Left,
    })?;
    let right_schema = right.schema().ok_or(SchemaError::EmptyOperand {
        kind,
        side: Side::Right,
    })?;

    match kind {
        BinaryKind::Union | BinaryKind::Difference => {
            if left_schema.len() != right_schema.len() {
                return Err(SchemaError::ArityMismatch {
                    kind,
                    left: left_schema.len(),
                    right: right_schema.len(),
                });
            }
            Ok(Vec::new())
        }
        BinaryKind::Join => {
            let common: Vec<String> = left_schema
                .into_iter()
                .filter(|name| right_schema.contains(name))
                .collect();
            if common.is_empty() {
                return Err(SchemaError::NoCommonAttributes);
            }
            Ok(common)
        }
    }
}

/// Check that every projected attribute exists in the relation's schema.
/// An empty relation accepts any attribute list.
pub fn validate_projection(attributes: &[String], relation: &Relation) -> Result<(), SchemaError> {
    let Some(available) = relation.schema() else {
        return Ok(());
    };

    let invalid: Vec<String> = attributes
        .iter()
        .filter(|name| !available.contains(name))
        .cloned()
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::InvalidAttributes { invalid, available })
    }
}
