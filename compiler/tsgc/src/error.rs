//! Driver errors.

use std::path::PathBuf;

use tsg_diagnostic::UnknownRuleCode;
use tsg_ir::{Cancelled, EditConflict};
use tsg_syntax::EditorConfigError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0}")]
    Usage(String),
    #[error("no C# sources found")]
    NoSources,
    #[error(transparent)]
    EditorConfig(#[from] EditorConfigError),
    #[error(transparent)]
    UnknownRule(#[from] UnknownRuleCode),
    #[error("no fix with equivalence key `{0}`")]
    UnknownFix(String),
    #[error("no documentation for {0}")]
    MissingDocs(String),
    #[error("fixes for {} could not be applied: {source}", .path.display())]
    Conflict {
        path: PathBuf,
        source: EditConflict,
    },
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}
