//! Engine error types.

use crate::predicate::PredicateError;
use crate::schema::SchemaError;
use thiserror::Error;

/// Errors that abort an expression evaluation.
///
/// Every variant carries enough context to be shown to the user as is; no
/// evaluation ever returns a partial relation alongside one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgebraError {
    /// Malformed operator syntax
    #[error("Parse error: {message}: `{fragment}`")]
    Parse { message: String, fragment: String },

    /// Leaf name not found in the store
    #[error("Unknown relation: {name}")]
    UnknownRelation { name: String },

    /// Operands incompatible with the operator
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Malformed or unresolvable selection condition
    #[error("Invalid condition `{condition}`: {source}")]
    Predicate {
        condition: String,
        #[source]
        source: PredicateError,
    },

    /// Expression nested deeper than the configured limit
    #[error("Expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl AlgebraError {
    pub fn parse(message: impl Into<String>, fragment: impl Into<String>) -> Self {
        AlgebraError::Parse {
            message: message.into(),
            fragment: fragment.into(),
        }
    }

    pub fn predicate(condition: impl Into<String>, source: PredicateError) -> Self {
        AlgebraError::Predicate {
            condition: condition.into(),
            source,
        }
    }
}

/// Result type for engine operations
pub type AlgebraResult<T> = Result<T, AlgebraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AlgebraError::parse("missing '(' after ']'", "σ[Age > 3]ETUDIANT");
        assert_eq!(
            err.to_string(),
            "Parse error: missing '(' after ']': `σ[Age > 3]ETUDIANT`"
        );

        let err = AlgebraError::UnknownRelation {
            name: "ETUDIANTS".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown relation: ETUDIANTS");

        let err = AlgebraError::predicate(
            "Vile = 'Fès'",
            PredicateError::UnknownAttribute {
                name: "Vile".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Invalid condition `Vile = 'Fès'`: unknown attribute: Vile"
        );

        let err = AlgebraError::NestingTooDeep { limit: 100 };
        assert_eq!(err.to_string(), "Expression nested deeper than 100 levels");
    }

    #[test]
    fn test_schema_error_conversion() {
        let err: AlgebraError = SchemaError::NoCommonAttributes.into();
        assert_eq!(
            err.to_string(),
            "Schema error: no common attributes for join"
        );
    }
}
