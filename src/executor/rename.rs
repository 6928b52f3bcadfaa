//! Rename executor.
//!
//! ρ is accepted by the expression language but renames nothing: tuples pass
//! through untouched and the requested name is only logged.

use crate::error::AlgebraResult;
use crate::executor::Executor;
use crate::relation::Tuple;

pub struct RenameExecutor {
    child: Box<dyn Executor>,
    new_name: String,
    initialized: bool,
}

impl RenameExecutor {
    pub fn new(child: Box<dyn Executor>, new_name: impl Into<String>) -> Self {
        Self {
            child,
            new_name: new_name.into(),
            initialized: false,
        }
    }
}

impl Executor for RenameExecutor {
    fn init(&mut self) -> AlgebraResult<()> {
        if self.initialized {
            return Ok(());
        }

        log::debug!("rename to '{}' leaves the relation unchanged", self.new_name);
        self.child.init()?;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> AlgebraResult<Option<Tuple>> {
        if !self.initialized {
            return Ok(None);
        }
        self.child.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::test_util::students;
    use crate::executor::{collect, RelationScan};

    #[test]
    fn test_rename_passes_tuples_through() -> AlgebraResult<()> {
        let mut executor = RenameExecutor::new(Box::new(RelationScan::new(students())), "S");
        assert_eq!(collect(&mut executor)?, students());
        Ok(())
    }
}
