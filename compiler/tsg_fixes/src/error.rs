use tsg_diagnostic::RuleCode;
use tsg_ir::host::RenameError;
use tsg_ir::{Cancelled, FileId};

use crate::FixState;

/// Why a code fix produced no edit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FixError {
    #[error("no type parameter is declared at the diagnostic location")]
    SymbolNotFound,
    #[error("no self-type argument at the diagnostic location")]
    ArgumentNotFound,
    #[error("marker attribute `{0}` does not resolve to a unique type")]
    AttributeNotResolved(String),
    #[error("document {0:?} is not part of the workspace")]
    DocumentNotFound(FileId),
    #[error("`{key}` does not fix {code}")]
    NotApplicable { key: String, code: RuleCode },
    #[error("fix already finished in state {0:?}")]
    AlreadyRun(FixState),
    #[error("rename failed: {0}")]
    Rename(#[from] RenameError),
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

impl FixError {
    /// Whether the failure came from cancellation, directly or through the
    /// host.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            FixError::Cancelled(_) | FixError::Rename(RenameError::Cancelled(_))
        )
    }
}
