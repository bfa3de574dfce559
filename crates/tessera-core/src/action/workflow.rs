use tracing::debug;

use super::{ExecutableAction, ExecutionContext};
use crate::error::Result;
use crate::types::Classification;

/// A compiled rule definition: actions run in order over one accumulator.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    actions: Vec<ExecutableAction>,
}

impl Workflow {
    #[must_use]
    pub fn new(actions: Vec<ExecutableAction>) -> Self {
        Self { actions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Runs every action in order, each seeing the result of the last.
    ///
    /// An action that declines ends the run; what was accumulated up to
    /// that point is the result.
    ///
    /// # Errors
    ///
    /// Any error other than [`TesseraError::Unmatched`](crate::TesseraError::Unmatched).
    pub async fn run(&self, mut ctx: ExecutionContext) -> Result<Classification> {
        for (step, action) in self.actions.iter().enumerate() {
            match action.run(ctx.clone()).await {
                Ok(result) => ctx.result = result,
                Err(e) if e.is_unmatched() => {
                    debug!(info_hash = %ctx.torrent.info_hash, step, "workflow stopped: unmatched");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(ctx.result)
    }
}
