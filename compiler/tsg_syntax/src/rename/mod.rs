//! Type parameter rename for the reference host.
//!
//! A type parameter is only visible inside its declaring type, so a rename
//! rewrites every identifier token spelled like the parameter in each part
//! of the owning declaration. Nested declarations that redeclare a parameter
//! of the same name shadow it and are left alone.

use tsg_ir::ast::TypeDecl;
use tsg_ir::host::{DocumentStore, RenameError, RenameService, SemanticModel};
use tsg_ir::{CancellationToken, Location, Span, TextEdit, TypeParamId, WorkspaceEdit};

use crate::lexer::is_valid_identifier;
use crate::workspace::Workspace;

impl RenameService for Workspace {
    #[tracing::instrument(level = "debug", skip(self, cancel))]
    fn rename_type_param(
        &self,
        target: TypeParamId,
        new_name: &str,
        cancel: &CancellationToken,
    ) -> Result<WorkspaceEdit, RenameError> {
        cancel.check()?;
        let param = self
            .type_param(target)
            .ok_or(RenameError::UnknownSymbol(target))?;
        if !is_valid_identifier(new_name) {
            return Err(RenameError::InvalidIdentifier(new_name.to_string()));
        }
        if param.name == new_name {
            return Ok(WorkspaceEdit::new());
        }

        let owner = self
            .type_symbol(param.owner)
            .ok_or(RenameError::UnknownSymbol(target))?;
        if owner.name == new_name {
            return Err(conflict(new_name, owner.locations.first().copied()));
        }
        for &sibling in &owner.type_params {
            let Some(sibling) = self.type_param(sibling) else {
                continue;
            };
            if sibling.id != target && sibling.name == new_name {
                return Err(conflict(new_name, sibling.locations.first().copied()));
            }
        }

        let mut edit = WorkspaceEdit::new();
        for location in &owner.locations {
            cancel.check()?;
            let Some(decl) = self
                .syntax_tree(location.file)
                .and_then(|tree| {
                    tree.type_decls()
                        .into_iter()
                        .find(|decl| decl.name_span == location.span)
                })
            else {
                continue;
            };

            if let Some(existing) = find_capture(decl, new_name) {
                return Err(conflict(new_name, Some(Location::new(location.file, existing))));
            }

            let mut references = Vec::new();
            collect_references(decl, &param.name, &mut references);
            for span in references {
                edit.push(location.file, TextEdit::replace(span, new_name));
            }
        }

        tracing::debug!(edits = edit.edit_count(), "renamed type parameter");
        Ok(edit)
    }
}

fn conflict(name: &str, existing: Option<Location>) -> RenameError {
    RenameError::Conflict {
        name: name.to_string(),
        existing,
    }
}

fn collect_references(decl: &TypeDecl, name: &str, out: &mut Vec<Span>) {
    out.extend(
        decl.idents
            .iter()
            .filter(|ident| ident.name == name)
            .map(|ident| ident.span),
    );
    for nested in &decl.nested {
        if nested.type_params.iter().any(|param| param.name == name) {
            continue;
        }
        collect_references(nested, name, out);
    }
}

/// An identifier already spelled `new_name` inside the declaration would be
/// captured by the renamed parameter.
///
/// Attribute names on type parameters live in a different namespace and are
/// ignored.
fn find_capture(decl: &TypeDecl, new_name: &str) -> Option<Span> {
    let attribute_spans: Vec<Span> = decl
        .type_params
        .iter()
        .flat_map(|param| &param.attributes)
        .map(|list| list.span)
        .collect();
    let own = decl.idents.iter().find(|ident| {
        ident.name == new_name && !attribute_spans.iter().any(|span| span.contains_span(ident.span))
    });
    if let Some(ident) = own {
        return Some(ident.span);
    }
    decl.nested
        .iter()
        .find_map(|nested| find_capture(nested, new_name))
}
