//! Lifecycle of one code action.
//!
//! `Idle -> DiagnosticReceived -> EditComputed -> SolutionReturned`, or
//! `Failed` from any step. Both end states are terminal: a failed fix is
//! surfaced to the caller and never retried.

use tsg_ir::WorkspaceEdit;

use crate::{CodeAction, CodeFix, FixContext, FixError};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FixState {
    Idle,
    DiagnosticReceived,
    EditComputed,
    SolutionReturned,
    Failed,
}

impl FixState {
    pub fn is_terminal(self) -> bool {
        matches!(self, FixState::SolutionReturned | FixState::Failed)
    }
}

/// Drives one code action through its states.
#[derive(Debug)]
pub struct FixRun {
    state: FixState,
}

impl Default for FixRun {
    fn default() -> Self {
        Self::new()
    }
}

impl FixRun {
    pub fn new() -> Self {
        FixRun {
            state: FixState::Idle,
        }
    }

    pub fn state(&self) -> FixState {
        self.state
    }

    fn advance(&mut self, next: FixState) {
        tracing::trace!(from = ?self.state, to = ?next, "fix state");
        self.state = next;
    }

    /// Compute `action` with `fix`. A run executes at most once.
    pub fn execute(
        &mut self,
        fix: &dyn CodeFix,
        ctx: &FixContext<'_>,
        action: &CodeAction,
    ) -> Result<WorkspaceEdit, FixError> {
        if self.state != FixState::Idle {
            return Err(FixError::AlreadyRun(self.state));
        }
        self.advance(FixState::DiagnosticReceived);

        let edit = match ctx.cancel.check().map_err(FixError::from).and_then(|()| fix.compute(ctx, action)) {
            Ok(edit) => edit,
            Err(err) => {
                self.advance(FixState::Failed);
                tracing::debug!(key = action.equivalence_key, %err, "fix failed");
                return Err(err);
            }
        };
        self.advance(FixState::EditComputed);

        tracing::debug!(
            key = action.equivalence_key,
            files = edit.files().count(),
            edits = edit.edit_count(),
            "fix computed"
        );
        self.advance(FixState::SolutionReturned);
        Ok(edit)
    }
}
