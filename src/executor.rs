//! Executor layer for relational operators.
//!
//! Operators follow the Volcano-style iterator model: each executor produces
//! tuples one at a time via `next()`, pulling from its children. Leaves scan
//! an owned, already materialized relation, so executors never touch the
//! relation store and never mutate their inputs.
//!
//! The free functions at the bottom wrap the executors into the pure
//! relation-in, relation-out form used by the expression evaluator.

use crate::error::AlgebraResult;
use crate::predicate::Condition;
use crate::relation::{Relation, Tuple};

pub mod difference;
pub mod natural_join;
pub mod projection;
pub mod rename;
pub mod scan;
pub mod selection;
pub mod union;

pub use difference::DifferenceExecutor;
pub use natural_join::NaturalJoinExecutor;
pub use projection::ProjectionExecutor;
pub use rename::RenameExecutor;
pub use scan::RelationScan;
pub use selection::SelectionExecutor;
pub use union::UnionExecutor;

/// Trait for all operator executors
pub trait Executor: Send {
    /// Initialize the executor. This must be called before `next()`.
    fn init(&mut self) -> AlgebraResult<()>;

    /// Get the next tuple from the executor.
    /// Returns None when there are no more tuples.
    fn next(&mut self) -> AlgebraResult<Option<Tuple>>;
}

/// Initialize an executor and drain it into a relation
pub fn collect(executor: &mut dyn Executor) -> AlgebraResult<Relation> {
    executor.init()?;
    let mut relation = Relation::empty();
    while let Some(tuple) = executor.next()? {
        relation.push(tuple);
    }
    Ok(relation)
}

fn scan(relation: &Relation) -> Box<dyn Executor> {
    Box::new(RelationScan::new(relation.clone()))
}

/// σ: tuples of `relation` that satisfy `condition`, in order
pub fn select(relation: &Relation, condition: &Condition) -> AlgebraResult<Relation> {
    collect(&mut SelectionExecutor::new(scan(relation), condition.clone()))
}

/// π: the listed attributes of every tuple, duplicates removed
pub fn project(relation: &Relation, attributes: &[String]) -> AlgebraResult<Relation> {
    collect(&mut ProjectionExecutor::new(scan(relation), attributes.to_vec()))
}

/// ⨝: pairs of tuples agreeing on every attribute of `common`, merged
pub fn natural_join(
    left: &Relation,
    right: &Relation,
    common: &[String],
) -> AlgebraResult<Relation> {
    collect(&mut NaturalJoinExecutor::new(
        scan(left),
        scan(right),
        common.to_vec(),
    ))
}

/// ∪: `left` then `right`, duplicates removed
pub fn union(left: &Relation, right: &Relation) -> AlgebraResult<Relation> {
    collect(&mut UnionExecutor::new(scan(left), scan(right)))
}

/// −: tuples of `left` that appear nowhere in `right`
pub fn difference(left: &Relation, right: &Relation) -> AlgebraResult<Relation> {
    collect(&mut DifferenceExecutor::new(scan(left), scan(right)))
}

/// ρ: returns the relation unchanged
pub fn rename(relation: &Relation, new_name: &str) -> AlgebraResult<Relation> {
    collect(&mut RenameExecutor::new(scan(relation), new_name))
}

#[cfg(test)]
pub(crate) mod test_util {
    use crate::relation::{Relation, Tuple, Value};

    /// Build a relation from a header and rows of values
    pub fn relation<const N: usize>(header: [&str; N], rows: Vec<[Value; N]>) -> Relation {
        rows.into_iter()
            .map(|row| Tuple::from_pairs(header.iter().copied().zip(row)))
            .collect()
    }

    pub fn students() -> Relation {
        relation(
            ["NumEtudiant", "Nom", "Age", "Ville"],
            vec![
                ["E001".into(), "Alami".into(), 22.into(), "Fès".into()],
                ["E002".into(), "Benna".into(), 21.into(), "Casablanca".into()],
                ["E003".into(), "Chakir".into(), 23.into(), "Fès".into()],
                ["E004".into(), "Darif".into(), 20.into(), "Rabat".into()],
            ],
        )
    }

    pub fn courses() -> Relation {
        relation(
            ["CodeCours", "NumEtudiant"],
            vec![
                ["C101".into(), "E001".into()],
                ["C102".into(), "E001".into()],
                ["C103".into(), "E002".into()],
                ["C104".into(), "E003".into()],
            ],
        )
    }
}
