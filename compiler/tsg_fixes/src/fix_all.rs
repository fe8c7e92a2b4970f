//! Batch application of one fix kind.
//!
//! Each diagnostic's edit is computed against the same snapshot and merged
//! into one [`WorkspaceEdit`]. Identical edits are kept once, so several
//! attribute fixes in one file share a single `using` insertion. An action
//! whose edits overlap edits already merged is dropped as a whole.

use tsg_diagnostic::Diagnostic;
use tsg_ir::host::Host;
use tsg_ir::{CancellationToken, Cancelled, EditConflict, FileId, TextEdit, WorkspaceEdit};

use crate::{FixContext, FixError, FixRegistry};

/// A diagnostic whose fix could not be computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixFailure {
    pub diagnostic: Diagnostic,
    pub error: FixError,
}

/// A diagnostic whose edit overlapped one merged earlier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixConflict {
    pub diagnostic: Diagnostic,
    pub file: FileId,
    pub conflict: EditConflict,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixAllOutcome {
    pub edit: WorkspaceEdit,
    /// Diagnostics whose edits were merged.
    pub applied: usize,
    /// Diagnostics with no matching action.
    pub not_offered: usize,
    pub conflicts: Vec<FixConflict>,
    pub failures: Vec<FixFailure>,
}

/// Fix every diagnostic in `diagnostics`.
///
/// With `equivalence_key` set only that fix kind is applied, otherwise the
/// first action offered for each diagnostic.
#[tracing::instrument(level = "debug", skip_all, fields(diagnostics = diagnostics.len(), key = equivalence_key))]
pub fn fix_all(
    registry: &FixRegistry,
    host: &dyn Host,
    diagnostics: &[Diagnostic],
    equivalence_key: Option<&str>,
    cancel: &CancellationToken,
) -> Result<FixAllOutcome, Cancelled> {
    let mut outcome = FixAllOutcome::default();
    for diagnostic in diagnostics {
        cancel.check()?;
        let ctx = FixContext::new(host, diagnostic, cancel);
        let action = registry
            .actions(&ctx)
            .into_iter()
            .find(|action| equivalence_key.is_none_or(|key| action.equivalence_key == key));
        let Some(action) = action else {
            outcome.not_offered += 1;
            continue;
        };

        let edit = match registry.apply(&ctx, &action) {
            Ok(edit) => edit,
            Err(err) if err.is_cancelled() => return Err(Cancelled),
            Err(error) => {
                outcome.failures.push(FixFailure {
                    diagnostic: diagnostic.clone(),
                    error,
                });
                continue;
            }
        };

        match merge(&mut outcome.edit, &edit) {
            Ok(()) => outcome.applied += 1,
            Err((file, conflict)) => {
                tracing::debug!(%conflict, "dropping overlapping fix");
                outcome.conflicts.push(FixConflict {
                    diagnostic: diagnostic.clone(),
                    file,
                    conflict,
                });
            }
        }
    }
    tracing::debug!(
        applied = outcome.applied,
        conflicts = outcome.conflicts.len(),
        failures = outcome.failures.len(),
        "fix-all finished"
    );
    Ok(outcome)
}

/// Merge `edit` into `merged`, all or nothing.
fn merge(merged: &mut WorkspaceEdit, edit: &WorkspaceEdit) -> Result<(), (FileId, EditConflict)> {
    let mut pending: Vec<(FileId, &TextEdit)> = Vec::new();
    for (file, edits) in edit.iter() {
        let existing = merged.edits_for(file);
        for new in edits {
            if existing.contains(new) || pending.iter().any(|(f, e)| *f == file && *e == new) {
                continue;
            }
            if let Some(old) = existing.iter().find(|old| old.overlaps(new)) {
                return Err((
                    file,
                    EditConflict {
                        edit1: old.clone(),
                        edit2: new.clone(),
                    },
                ));
            }
            pending.push((file, new));
        }
    }
    for (file, new) in pending {
        merged.push(file, new.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tsg_ir::Span;

    use super::*;

    #[test]
    fn test_merge_deduplicates_identical_edits() {
        let file = FileId::new(0);
        let mut merged = WorkspaceEdit::single(file, vec![TextEdit::insert(0, "using Self;\n")]);
        let next = WorkspaceEdit::single(
            file,
            vec![
                TextEdit::insert(0, "using Self;\n"),
                TextEdit::insert(20, "[TSelf] "),
            ],
        );
        assert_eq!(merge(&mut merged, &next), Ok(()));
        assert_eq!(merged.edit_count(), 2);
    }

    #[test]
    fn test_merge_rejects_overlap_atomically() {
        let file = FileId::new(0);
        let mut merged = WorkspaceEdit::single(file, vec![TextEdit::replace(Span::new(10, 15), "A")]);
        let next = WorkspaceEdit::single(
            file,
            vec![
                TextEdit::replace(Span::new(0, 2), "B"),
                TextEdit::replace(Span::new(12, 18), "C"),
            ],
        );
        let Err((conflict_file, conflict)) = merge(&mut merged, &next) else {
            panic!("expected a conflict");
        };
        assert_eq!(conflict_file, file);
        assert_eq!(conflict.edit2.new_text, "C");
        assert_eq!(merged.edit_count(), 1);
    }

    #[test]
    fn test_merge_other_files_are_independent() {
        let mut merged = WorkspaceEdit::single(FileId::new(0), vec![TextEdit::replace(Span::new(0, 5), "A")]);
        let next = WorkspaceEdit::single(FileId::new(1), vec![TextEdit::replace(Span::new(0, 5), "B")]);
        assert_eq!(merge(&mut merged, &next), Ok(()));
        assert_eq!(merged.files().count(), 2);
    }
}
