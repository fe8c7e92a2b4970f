//! `TSG2` fix: rename the offending parameter to the configured self name.

use tsg_diagnostic::RuleCode;
use tsg_ir::WorkspaceEdit;

use crate::{CodeAction, CodeFix, FixContext, FixError};

pub const RENAME_FIX_KEY: &str = "TSelfNestedFixProviderName";

/// Renames the type parameter across the whole workspace through the
/// host's rename service.
#[derive(Copy, Clone, Debug, Default)]
pub struct RenameFix;

impl CodeFix for RenameFix {
    fn equivalence_key(&self) -> &'static str {
        RENAME_FIX_KEY
    }

    fn fixable_codes(&self) -> &'static [RuleCode] {
        &[RuleCode::TSG2]
    }

    fn register_fixes(&self, ctx: &FixContext<'_>) -> Vec<CodeAction> {
        if !ctx.config.param_name_enable {
            return Vec::new();
        }
        vec![CodeAction::new(
            format!("Rename to '{}'", ctx.config.param_name),
            RENAME_FIX_KEY,
            ctx.diagnostic,
        )]
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = %ctx.config.param_name))]
    fn compute(&self, ctx: &FixContext<'_>, _action: &CodeAction) -> Result<WorkspaceEdit, FixError> {
        let target = ctx
            .host
            .declared_type_param(ctx.file(), ctx.span())
            .ok_or(FixError::SymbolNotFound)?;
        Ok(ctx
            .host
            .rename_type_param(target, &ctx.config.param_name, ctx.cancel)?)
    }
}
