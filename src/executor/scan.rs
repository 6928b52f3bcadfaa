//! Relation scan executor.
//!
//! Leaf executor that hands out the tuples of an owned relation in order.

use crate::error::AlgebraResult;
use crate::executor::Executor;
use crate::relation::{Relation, Tuple};

/// Executor that produces the tuples of a materialized relation
pub struct RelationScan {
    relation: Option<Relation>,
    tuples: std::vec::IntoIter<Tuple>,
    initialized: bool,
}

impl RelationScan {
    pub fn new(relation: Relation) -> Self {
        Self {
            relation: Some(relation),
            tuples: Vec::new().into_iter(),
            initialized: false,
        }
    }
}

impl Executor for RelationScan {
    fn init(&mut self) -> AlgebraResult<()> {
        if self.initialized {
            return Ok(());
        }

        if let Some(relation) = self.relation.take() {
            self.tuples = relation.into_iter();
        }

        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> AlgebraResult<Option<Tuple>> {
        if !self.initialized {
            return Ok(None);
        }
        Ok(self.tuples.next())
    }
}
