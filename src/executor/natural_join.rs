//! Natural join executor implementation.
//!
//! This executor performs a nested loop equi-join between two child
//! executors. The right child is materialized during `init()`; then for each
//! tuple from the left child it scans all right tuples and outputs the merged
//! tuple whenever the two agree on every common attribute. Output order is
//! left-major, right-minor.

use crate::error::AlgebraResult;
use crate::executor::Executor;
use crate::relation::Tuple;

/// Executor that performs a natural join
pub struct NaturalJoinExecutor {
    /// Left child executor (outer loop)
    left_child: Box<dyn Executor>,
    /// Right child executor (inner loop, materialized)
    right_child: Box<dyn Executor>,
    /// Attributes both sides must agree on
    common_attributes: Vec<String>,
    /// Tuples of the right child
    right_tuples: Vec<Tuple>,
    /// Current left tuple (if any)
    current_left_tuple: Option<Tuple>,
    /// Next position to try in `right_tuples`
    right_position: usize,
    /// Whether the executor has been initialized
    initialized: bool,
}

impl NaturalJoinExecutor {
    /// Create a new natural join executor
    ///
    /// # Arguments
    /// * `left_child` - The left child executor
    /// * `right_child` - The right child executor
    /// * `common_attributes` - Attribute names shared by both schemas
    pub fn new(
        left_child: Box<dyn Executor>,
        right_child: Box<dyn Executor>,
        common_attributes: Vec<String>,
    ) -> Self {
        Self {
            left_child,
            right_child,
            common_attributes,
            right_tuples: Vec::new(),
            current_left_tuple: None,
            right_position: 0,
            initialized: false,
        }
    }
}

impl Executor for NaturalJoinExecutor {
    fn init(&mut self) -> AlgebraResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.left_child.init()?;
        self.right_child.init()?;

        self.right_tuples.clear();
        while let Some(tuple) = self.right_child.next()? {
            self.right_tuples.push(tuple);
        }

        self.current_left_tuple = None;
        self.right_position = 0;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> AlgebraResult<Option<Tuple>> {
        if !self.initialized || self.right_tuples.is_empty() {
            return Ok(None);
        }

        loop {
            if self.current_left_tuple.is_none() {
                match self.left_child.next()? {
                    Some(tuple) => {
                        self.current_left_tuple = Some(tuple);
                        self.right_position = 0;
                    }
                    None => return Ok(None),
                }
            }

            let Some(left) = self.current_left_tuple.as_ref() else {
                return Ok(None);
            };

            while self.right_position < self.right_tuples.len() {
                let right = &self.right_tuples[self.right_position];
                self.right_position += 1;

                if left.agrees_on(right, &self.common_attributes) {
                    return Ok(Some(left.merge(right)));
                }
            }

            // Right side exhausted for this left tuple
            self.current_left_tuple = None;
        }
    }
}
