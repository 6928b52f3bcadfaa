//! Projection executor implementation.
//!
//! This executor keeps the listed attributes of each child tuple, in listed
//! order, and drops any output tuple whose content was already produced.
//! Attribute names are checked against the schema before the executor runs.

use crate::error::AlgebraResult;
use crate::executor::Executor;
use crate::relation::{Tuple, TupleKey};
use std::collections::HashSet;

/// Executor that projects specific attributes from child tuples
pub struct ProjectionExecutor {
    /// Child executor that produces tuples
    child: Box<dyn Executor>,
    /// Attributes to keep, in output order
    attributes: Vec<String>,
    /// Contents already emitted
    seen: HashSet<TupleKey>,
    /// Whether the executor has been initialized
    initialized: bool,
}

impl ProjectionExecutor {
    /// Create a new projection executor
    ///
    /// # Example
    /// ```ignore
    /// // If child produces attributes [NumEtudiant, Nom, Ville]
    /// // attributes [Ville, Nom] would produce [Ville, Nom]
    /// ```
    pub fn new(child: Box<dyn Executor>, attributes: Vec<String>) -> Self {
        Self {
            child,
            attributes,
            seen: HashSet::new(),
            initialized: false,
        }
    }
}

impl Executor for ProjectionExecutor {
    fn init(&mut self) -> AlgebraResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.child.init()?;
        self.seen.clear();
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> AlgebraResult<Option<Tuple>> {
        if !self.initialized {
            return Ok(None);
        }

        while let Some(tuple) = self.child.next()? {
            let projected = tuple.project(&self.attributes);
            if self.seen.insert(projected.key()) {
                return Ok(Some(projected));
            }
        }

        Ok(None)
    }
}
