//! `TSG1` fix: pass the declaring type as the self-type argument.

use tsg_diagnostic::RuleCode;
use tsg_ir::ast::TypeDecl;
use tsg_ir::{Span, TextEdit, WorkspaceEdit};

use crate::{CodeAction, CodeFix, FixContext, FixError};

pub const SELF_ARGUMENT_FIX_KEY: &str = "CodeFixTSelfSelf";

/// Replaces the offending argument with the enclosing declaration, written
/// with its own type parameters (`Node<TKey, TValue>`).
#[derive(Copy, Clone, Debug, Default)]
pub struct SelfArgumentFix;

impl CodeFix for SelfArgumentFix {
    fn equivalence_key(&self) -> &'static str {
        SELF_ARGUMENT_FIX_KEY
    }

    fn fixable_codes(&self) -> &'static [RuleCode] {
        &[RuleCode::TSG1]
    }

    fn register_fixes(&self, ctx: &FixContext<'_>) -> Vec<CodeAction> {
        let Ok(decl) = target_declaration(ctx) else {
            return Vec::new();
        };
        vec![CodeAction::new(
            format!("Use '{}' as the self-type argument", decl.self_type_text()),
            SELF_ARGUMENT_FIX_KEY,
            ctx.diagnostic,
        )]
    }

    fn compute(&self, ctx: &FixContext<'_>, _action: &CodeAction) -> Result<WorkspaceEdit, FixError> {
        let decl = target_declaration(ctx)?;
        Ok(WorkspaceEdit::single(
            ctx.file(),
            vec![TextEdit::replace(ctx.span(), decl.self_type_text())],
        ))
    }
}

/// The declaration whose base list holds the reported argument.
fn target_declaration<'a>(ctx: &FixContext<'a>) -> Result<&'a TypeDecl, FixError> {
    let span = ctx.span();
    let decl = ctx
        .tree()?
        .enclosing_type_decl(span)
        .ok_or(FixError::ArgumentNotFound)?;
    let in_base_list = decl
        .base_list
        .iter()
        .any(|base| base.span == span || contains_argument(base.type_args(), span));
    if in_base_list {
        Ok(decl)
    } else {
        Err(FixError::ArgumentNotFound)
    }
}

fn contains_argument(args: &[tsg_ir::ast::TypeExpr], span: Span) -> bool {
    args.iter().any(|arg| arg.span == span)
}
