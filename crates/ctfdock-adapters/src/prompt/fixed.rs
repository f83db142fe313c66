//! Non-interactive overwrite decision.

use std::path::Path;

use ctfdock_core::{
    application::{OverwriteDecider, OverwriteDecision},
    error::CtfdockResult,
};

/// Always answers with the same decision. Backs `--yes`.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub OverwriteDecision);

impl OverwriteDecider for FixedDecision {
    fn decide(&mut self, existing: &Path) -> CtfdockResult<OverwriteDecision> {
        tracing::info!(decision = ?self.0, path = %existing.display(), "Overwrite decided without prompting");
        Ok(self.0)
    }
}
