//! Tree-walking evaluation of parsed expressions.

use super::ast::Expression;
use crate::error::{AlgebraError, AlgebraResult};
use crate::executor;
use crate::relation::Relation;
use crate::schema::{validate_binary, validate_projection, BinaryKind};
use crate::store::RelationStore;

/// Evaluates expressions against a relation store
///
/// The store is only read. Each node produces a fresh relation, so no
/// evaluation can alter what is stored.
pub struct Evaluator<'a> {
    store: &'a RelationStore,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a RelationStore) -> Self {
        Self { store }
    }

    /// Evaluate an expression to a relation
    pub fn evaluate(&self, expr: &Expression) -> AlgebraResult<Relation> {
        match expr {
            Expression::Relation(name) => self.lookup(name),
            Expression::Selection { condition, input } => {
                let relation = self.evaluate(input)?;
                executor::select(&relation, condition)
            }
            Expression::Projection { attributes, input } => {
                let relation = self.evaluate(input)?;
                validate_projection(attributes, &relation)?;
                executor::project(&relation, attributes)
            }
            Expression::Rename { new_name, input } => {
                let relation = self.evaluate(input)?;
                executor::rename(&relation, new_name)
            }
            Expression::Union(left, right) => self.evaluate_binary(BinaryKind::Union, left, right),
            Expression::Difference(left, right) => {
                self.evaluate_binary(BinaryKind::Difference, left, right)
            }
            Expression::Join(left, right) => self.evaluate_binary(BinaryKind::Join, left, right),
        }
    }

    fn lookup(&self, name: &str) -> AlgebraResult<Relation> {
        self.store
            .get(name)
            .cloned()
            .ok_or_else(|| AlgebraError::UnknownRelation {
                name: name.to_string(),
            })
    }

    fn evaluate_binary(
        &self,
        kind: BinaryKind,
        left: &Expression,
        right: &Expression,
    ) -> AlgebraResult<Relation> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;
        let common = validate_binary(kind, &left, &right)?;

        match kind {
            BinaryKind::Union => executor::union(&left, &right),
            BinaryKind::Difference => executor::difference(&left, &right),
            BinaryKind::Join => {
                log::debug!("joining on {}", common.join(", "));
                executor::natural_join(&left, &right, &common)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Parser;
    use crate::config::EngineConfig;
    use crate::executor::test_util::{courses, students};
    use crate::schema::SchemaError;

    fn store() -> RelationStore {
        let mut store = RelationStore::new();
        store.insert_relation("ETUDIANT", students()).unwrap();
        store.insert_relation("COURS", courses()).unwrap();
        store
    }

    fn run(text: &str) -> AlgebraResult<Relation> {
        let store = store();
        let expr = Parser::new(&EngineConfig::default()).parse(text)?;
        Evaluator::new(&store).evaluate(&expr)
    }

    #[test]
    fn test_relation_is_a_copy() -> AlgebraResult<()> {
        let store = store();
        let mut copy = Evaluator::new(&store).evaluate(&Expression::relation("ETUDIANT"))?;
        copy.push(copy.tuples()[0].clone());
        assert_eq!(store.get("ETUDIANT").map(Relation::len), Some(4));
        Ok(())
    }

    #[test]
    fn test_unknown_relation() {
        assert_eq!(
            run("σ[Age > 1](ETUDIANTS)"),
            Err(AlgebraError::UnknownRelation {
                name: "ETUDIANTS".to_string()
            })
        );
    }

    #[test]
    fn test_projection_checks_attributes() {
        let err = run("π[Nom, Telephone](ETUDIANT)").unwrap_err();
        assert!(matches!(
            err,
            AlgebraError::Schema(SchemaError::InvalidAttributes { ref invalid, .. })
                if invalid == &vec!["Telephone".to_string()]
        ));
    }

    #[test]
    fn test_projection_of_empty_relation() -> AlgebraResult<()> {
        assert!(run("π[Anything](σ[Age > 100](ETUDIANT))")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_binary_validation() {
        assert_eq!(
            run("ETUDIANT ∪ COURS"),
            Err(AlgebraError::Schema(SchemaError::ArityMismatch {
                kind: BinaryKind::Union,
                left: 4,
                right: 2
            }))
        );
        assert_eq!(
            run("π[Nom](ETUDIANT) ⨝ π[CodeCours](COURS)"),
            Err(AlgebraError::Schema(SchemaError::NoCommonAttributes))
        );
        assert!(matches!(
            run("σ[Age > 100](ETUDIANT) - ETUDIANT"),
            Err(AlgebraError::Schema(SchemaError::EmptyOperand { .. }))
        ));
    }

    #[test]
    fn test_join_then_project() -> AlgebraResult<()> {
        let result = run("π[Nom](ETUDIANT ⨝ COURS)")?;
        let names: Vec<String> = result
            .iter()
            .map(|t| t.get("Nom").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Alami", "Benna", "Chakir"]);
        Ok(())
    }

    #[test]
    fn test_students_without_course() -> AlgebraResult<()> {
        let result = run("π[NumEtudiant](ETUDIANT) - π[NumEtudiant](COURS)")?;
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.tuples()[0].get("NumEtudiant").map(|v| v.to_string()),
            Some("E004".to_string())
        );
        Ok(())
    }
}
