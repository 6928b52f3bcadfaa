//! Difference executor implementation.
//!
//! Materializes the contents of the right child during `init()`, then
//! streams the left child and drops every tuple found there. Left order and
//! multiplicity are otherwise kept.

use crate::error::AlgebraResult;
use crate::executor::Executor;
use crate::relation::{Tuple, TupleKey};
use std::collections::HashSet;

/// Executor that produces `left − right`
pub struct DifferenceExecutor {
    left_child: Box<dyn Executor>,
    right_child: Box<dyn Executor>,
    /// Contents of the right child
    excluded: HashSet<TupleKey>,
    initialized: bool,
}

impl DifferenceExecutor {
    pub fn new(left_child: Box<dyn Executor>, right_child: Box<dyn Executor>) -> Self {
        Self {
            left_child,
            right_child,
            excluded: HashSet::new(),
            initialized: false,
        }
    }
}

impl Executor for DifferenceExecutor {
    fn init(&mut self) -> AlgebraResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.left_child.init()?;
        self.right_child.init()?;

        self.excluded.clear();
        while let Some(tuple) = self.right_child.next()? {
            self.excluded.insert(tuple.key());
        }

        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> AlgebraResult<Option<Tuple>> {
        if !self.initialized {
            return Ok(None);
        }

        while let Some(tuple) = self.left_child.next()? {
            if !self.excluded.contains(&tuple.key()) {
                return Ok(Some(tuple));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::test_util::relation;
    use crate::executor::{collect, RelationScan};
    use crate::relation::Relation;

    fn run(left: Relation, right: Relation) -> AlgebraResult<Relation> {
        let mut executor = DifferenceExecutor::new(
            Box::new(RelationScan::new(left)),
            Box::new(RelationScan::new(right)),
        );
        collect(&mut executor)
    }

    #[test]
    fn test_difference_basic() -> AlgebraResult<()> {
        let left = relation(["n"], vec![[1.into()], [2.into()], [3.into()]]);
        let right = relation(["n"], vec![[2.into()], [4.into()]]);
        let result = run(left, right)?;
        assert_eq!(result, relation(["n"], vec![[1.into()], [3.into()]]));
        Ok(())
    }

    #[test]
    fn test_difference_keeps_left_multiplicity() -> AlgebraResult<()> {
        let left = relation(["n"], vec![[1.into()], [1.into()], [2.into()]]);
        let right = relation(["n"], vec![[2.into()]]);
        assert_eq!(run(left, right)?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_difference_matches_full_content_only() -> AlgebraResult<()> {
        // same arity, different names: nothing is removed
        let left = relation(["a"], vec![[1.into()]]);
        let right = relation(["b"], vec![[1.into()]]);
        assert_eq!(run(left.clone(), right)?, left);
        Ok(())
    }
}
