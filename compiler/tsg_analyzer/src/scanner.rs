//! Base-list scan for self-slot violations.
//!
//! Every base type of a declaration that names a generic definition is
//! paired position by position with that definition's formal parameters.
//! Formals that qualify as self parameters form self slots, and the
//! argument in each slot must be either the declaring type itself or an
//! open type parameter that is itself a self parameter. The first violation
//! ends the scan of the declaration.

use std::ops::ControlFlow;

use tsg_ir::ast::{SyntaxTree, TypeDecl, TypeExpr};
use tsg_ir::host::SemanticModel;
use tsg_ir::sema::{TypeParamSymbol, TypeRef};
use tsg_ir::{CancellationToken, Cancelled, FileId, Span, TypeParamId};

use crate::config::Config;
use crate::matcher::is_self_parameter;

/// A formal self parameter of a base type and the argument supplied for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelfSlot {
    pub index: usize,
    pub formal: TypeParamId,
    pub argument: TypeRef,
    /// Span of the argument as written, or of the whole base type when the
    /// argument has no syntax of its own.
    pub argument_span: Span,
}

/// The first violation found in a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    /// A concrete argument other than the declaring type.
    SelfViolation {
        span: Span,
        /// Simple name of the declaring type.
        type_name: String,
    },
    /// An open type parameter that is not itself a self parameter.
    NestedViolation {
        /// Name span of the parameter declaration in the scanned file.
        span: Span,
        param: TypeParamId,
        param_name: String,
    },
}

impl Finding {
    pub fn span(&self) -> Span {
        match self {
            Finding::SelfViolation { span, .. } | Finding::NestedViolation { span, .. } => *span,
        }
    }
}

/// Scan every type declaration of a document, nested ones included.
#[tracing::instrument(level = "debug", skip_all, fields(file = ?tree.file))]
pub fn scan_document<M: SemanticModel + ?Sized>(
    model: &M,
    tree: &SyntaxTree,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<Vec<Finding>, Cancelled> {
    let mut findings = Vec::new();
    for decl in tree.type_decls() {
        if let Some(finding) = scan_declaration(model, tree.file, decl, config, cancel)? {
            findings.push(finding);
        }
    }
    Ok(findings)
}

/// Scan one declaration's base list. Nested declarations are not visited.
pub fn scan_declaration<M: SemanticModel + ?Sized>(
    model: &M,
    file: FileId,
    decl: &TypeDecl,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<Option<Finding>, Cancelled> {
    if decl.base_list.is_empty() || !config.any_strategy_enabled() {
        return Ok(None);
    }
    let Some(own_type) = model
        .declared_type(file, decl)
        .and_then(|id| model.type_symbol(id))
        .map(tsg_ir::sema::TypeSymbol::self_type)
    else {
        tracing::trace!(name = %decl.name, "declaration has no symbol");
        return Ok(None);
    };

    let flow = decl.base_list.iter().try_for_each(|base| {
        if let Err(cancelled) = cancel.check() {
            return ControlFlow::Break(Err(cancelled));
        }
        self_slots(model, file, decl, base, config)
            .into_iter()
            .try_for_each(|slot| match classify(model, file, decl, &own_type, &slot, config) {
                Some(finding) => ControlFlow::Break(Ok(finding)),
                None => ControlFlow::Continue(()),
            })
    });

    match flow {
        ControlFlow::Continue(()) => Ok(None),
        ControlFlow::Break(Ok(finding)) => {
            tracing::debug!(name = %decl.name, ?finding, "self-slot violation");
            Ok(Some(finding))
        }
        ControlFlow::Break(Err(cancelled)) => Err(cancelled),
    }
}

/// Self slots of one base-list entry, in argument order.
///
/// Only the common prefix of formals and arguments is considered.
pub fn self_slots<M: SemanticModel + ?Sized>(
    model: &M,
    file: FileId,
    decl: &TypeDecl,
    base: &TypeExpr,
    config: &Config,
) -> Vec<SelfSlot> {
    let Some(constructed) = model.resolve_base_type(file, decl, base) else {
        return Vec::new();
    };
    let syntax_args = base.type_args();
    constructed
        .formals
        .iter()
        .zip(&constructed.args)
        .enumerate()
        .filter(|(_, (formal, _))| {
            model
                .type_param(**formal)
                .is_some_and(|param| is_self_parameter(param, config))
        })
        .map(|(index, (formal, argument))| SelfSlot {
            index,
            formal: *formal,
            argument: argument.clone(),
            argument_span: syntax_args.get(index).map_or(base.span, |arg| arg.span),
        })
        .collect()
}

fn classify<M: SemanticModel + ?Sized>(
    model: &M,
    file: FileId,
    decl: &TypeDecl,
    own_type: &TypeRef,
    slot: &SelfSlot,
    config: &Config,
) -> Option<Finding> {
    match &slot.argument {
        TypeRef::Param(id) => {
            let param = model.type_param(*id)?;
            if is_self_parameter(param, config) {
                return None;
            }
            nested_violation(param, file, decl.span)
        }
        // Unresolved arguments are treated as concrete and never equal the
        // declaring type.
        argument @ (TypeRef::Named { .. } | TypeRef::Error) => {
            (argument != own_type).then(|| Finding::SelfViolation {
                span: slot.argument_span,
                type_name: decl.name.clone(),
            })
        }
    }
}

/// Reported at the parameter's declaration in the scanned file, preferring
/// the part being scanned. A parameter declared only in other files has
/// nowhere to report, so the slot is skipped.
fn nested_violation(param: &TypeParamSymbol, file: FileId, decl_span: Span) -> Option<Finding> {
    let in_file = || param.locations.iter().filter(|location| location.is_in(file));
    let location = in_file()
        .find(|location| decl_span.contains_span(location.span))
        .or_else(|| in_file().next())?;
    Some(Finding::NestedViolation {
        span: location.span,
        param: param.id,
        param_name: param.name.clone(),
    })
}
