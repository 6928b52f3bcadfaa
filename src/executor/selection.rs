//! Selection executor implementation.
//!
//! This executor filters tuples from a child executor based on a condition.
//! It produces, one at a time and in the child's order, the tuples for which
//! the condition holds.

use crate::error::{AlgebraError, AlgebraResult};
use crate::executor::Executor;
use crate::predicate::Condition;
use crate::relation::Tuple;

/// Executor that filters tuples based on a condition
pub struct SelectionExecutor {
    /// Child executor that produces tuples
    child: Box<dyn Executor>,
    /// Condition every output tuple satisfies
    condition: Condition,
    /// Whether the executor has been initialized
    initialized: bool,
}

impl SelectionExecutor {
    /// Create a new selection executor
    ///
    /// # Arguments
    /// * `child` - The child executor that produces tuples
    /// * `condition` - The parsed condition
    pub fn new(child: Box<dyn Executor>, condition: Condition) -> Self {
        Self {
            child,
            condition,
            initialized: false,
        }
    }
}

impl Executor for SelectionExecutor {
    fn init(&mut self) -> AlgebraResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.child.init()?;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> AlgebraResult<Option<Tuple>> {
        if !self.initialized {
            return Ok(None);
        }

        // Keep pulling from the child until a tuple matches
        while let Some(tuple) = self.child.next()? {
            // An unknown attribute aborts the whole selection
            let matched = self
                .condition
                .matches(&tuple)
                .map_err(|e| AlgebraError::predicate(self.condition.text.clone(), e))?;

            if matched {
                return Ok(Some(tuple));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::test_util::students;
    use crate::executor::{collect, RelationScan};
    use crate::predicate::PredicateError;
    use crate::relation::Relation;

    fn run(condition: &str, input: Relation) -> AlgebraResult<Relation> {
        let condition = Condition::parse(condition).unwrap();
        let mut executor = SelectionExecutor::new(Box::new(RelationScan::new(input)), condition);
        collect(&mut executor)
    }

    fn ids(relation: &Relation) -> Vec<String> {
        relation
            .iter()
            .map(|t| t.get("NumEtudiant").unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_selection_basic() -> AlgebraResult<()> {
        let result = run("Ville = 'Fès'", students())?;
        assert_eq!(ids(&result), vec!["E001", "E003"]);
        Ok(())
    }

    #[test]
    fn test_selection_preserves_order() -> AlgebraResult<()> {
        let result = run("Age <= 21 OR Nom = 'Chakir'", students())?;
        assert_eq!(ids(&result), vec!["E002", "E003", "E004"]);
        Ok(())
    }

    #[test]
    fn test_selection_no_match() -> AlgebraResult<()> {
        let result = run("Ville = 'Fès' AND Age < 22", students())?;
        assert!(result.is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_attribute_aborts() {
        let err = run("Vile = 'Fès'", students()).unwrap_err();
        assert_eq!(
            err,
            AlgebraError::Predicate {
                condition: "Vile = 'Fès'".to_string(),
                source: PredicateError::UnknownAttribute {
                    name: "Vile".to_string()
                },
            }
        );
    }

    #[test]
    fn test_unknown_attribute_on_empty_input() -> AlgebraResult<()> {
        // nothing to evaluate against, so nothing to report
        let result = run("Vile = 'Fès'", Relation::empty())?;
        assert!(result.is_empty());
        Ok(())
    }
}
