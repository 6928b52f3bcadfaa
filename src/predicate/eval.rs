//! Condition evaluation against a single tuple.

use super::ast::{Operand, Predicate};
use super::error::{PredicateError, PredicateResult};
use crate::relation::{Tuple, Value};

/// Evaluator for conditions
pub struct PredicateEvaluator<'a> {
    /// The tuple to evaluate against
    tuple: &'a Tuple,
}

impl<'a> PredicateEvaluator<'a> {
    /// Create a new evaluator for a tuple
    pub fn new(tuple: &'a Tuple) -> Self {
        Self { tuple }
    }

    /// Evaluate a condition and return its truth value.
    ///
    /// Both sides of AND/OR are always evaluated, so an unknown attribute is
    /// reported even when the other side alone would decide the result.
    pub fn evaluate(&self, predicate: &Predicate) -> PredicateResult<bool> {
        match predicate {
            Predicate::Constant(b) => Ok(*b),

            Predicate::Comparison { op, left, right } => {
                let left_val = self.resolve(left)?;
                let right_val = self.resolve(right)?;
                Ok(op.holds(left_val.compare(right_val)))
            }

            Predicate::And(terms) => {
                let values = self.evaluate_terms(terms)?;
                Ok(values.iter().all(|v| *v))
            }

            Predicate::Or(terms) => {
                let values = self.evaluate_terms(terms)?;
                Ok(values.iter().any(|v| *v))
            }
        }
    }

    fn evaluate_terms(&self, terms: &[Predicate]) -> PredicateResult<Vec<bool>> {
        terms.iter().map(|term| self.evaluate(term)).collect()
    }

    /// Resolve an operand to a value
    fn resolve<'b>(&self, operand: &'b Operand) -> PredicateResult<&'b Value>
    where
        'a: 'b,
    {
        match operand {
            Operand::Literal(value) => Ok(value),
            Operand::Attribute(name) => {
                self.tuple
                    .get(name)
                    .ok_or_else(|| PredicateError::UnknownAttribute { name: name.clone() })
            }
        }
    }
}

/// Convenience function to evaluate a condition against a tuple
pub fn evaluate_predicate(predicate: &Predicate, tuple: &Tuple) -> PredicateResult<bool> {
    PredicateEvaluator::new(tuple).evaluate(predicate)
}
