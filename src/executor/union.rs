//! Union executor implementation.
//!
//! Streams the left child, then the right child, skipping any tuple whose
//! content was already produced.

use crate::error::AlgebraResult;
use crate::executor::Executor;
use crate::relation::{Tuple, TupleKey};
use std::collections::HashSet;

/// Executor that produces the set union of two children
pub struct UnionExecutor {
    left_child: Box<dyn Executor>,
    right_child: Box<dyn Executor>,
    /// Contents already emitted
    seen: HashSet<TupleKey>,
    left_exhausted: bool,
    initialized: bool,
}

impl UnionExecutor {
    pub fn new(left_child: Box<dyn Executor>, right_child: Box<dyn Executor>) -> Self {
        Self {
            left_child,
            right_child,
            seen: HashSet::new(),
            left_exhausted: false,
            initialized: false,
        }
    }

    fn pull(&mut self) -> AlgebraResult<Option<Tuple>> {
        if !self.left_exhausted {
            match self.left_child.next()? {
                Some(tuple) => return Ok(Some(tuple)),
                None => self.left_exhausted = true,
            }
        }
        self.right_child.next()
    }
}

impl Executor for UnionExecutor {
    fn init(&mut self) -> AlgebraResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.left_child.init()?;
        self.right_child.init()?;
        self.seen.clear();
        self.left_exhausted = false;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> AlgebraResult<Option<Tuple>> {
        if !self.initialized {
            return Ok(None);
        }

        while let Some(tuple) = self.pull()? {
            if self.seen.insert(tuple.key()) {
                return Ok(Some(tuple));
            }
        }

        Ok(None)
    }
}
