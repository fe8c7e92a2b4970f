//! Code fixes for the self-type rule.
//!
//! - [`RenameFix`] (`TSG2`): rename the parameter to the configured self name
//! - [`AttributeFix`] (`TSG2`): tag the parameter with the marker attribute
//! - [`SelfArgumentFix`] (`TSG1`): pass the declaring type instead
//!
//! Fixes never mutate the host. Each returns a [`WorkspaceEdit`] computed
//! against the current snapshot; [`fix_all`] merges many of them.

mod attribute;
mod context;
mod error;
pub mod fix_all;
mod registry;
mod rename;
mod run;
mod self_argument;

use tsg_diagnostic::RuleCode;
use tsg_ir::WorkspaceEdit;

pub use attribute::{short_attribute_name, AttributeFix, ATTRIBUTE_FIX_KEY};
pub use context::{CodeAction, FixContext};
pub use error::FixError;
pub use fix_all::{fix_all, FixAllOutcome, FixConflict, FixFailure};
pub use registry::FixRegistry;
pub use rename::{RenameFix, RENAME_FIX_KEY};
pub use run::{FixRun, FixState};
pub use self_argument::{SelfArgumentFix, SELF_ARGUMENT_FIX_KEY};

/// A fix provider for one or more rule codes.
pub trait CodeFix: Send + Sync {
    /// Identifies this fix kind across diagnostics.
    fn equivalence_key(&self) -> &'static str;

    fn fixable_codes(&self) -> &'static [RuleCode];

    /// Actions this fix offers for the context's diagnostic; empty when it
    /// does not apply.
    fn register_fixes(&self, ctx: &FixContext<'_>) -> Vec<CodeAction>;

    /// Compute the edit for an action returned by `register_fixes`.
    fn compute(&self, ctx: &FixContext<'_>, action: &CodeAction) -> Result<WorkspaceEdit, FixError>;
}
