//! Text edits and workspace-wide edit sets.
//!
//! Fixes never mutate syntax trees. They describe the change as text edits
//! against an immutable snapshot; the host applies them.
//!
//! Edits of one document are applied from the end of the text to the start,
//! so an edit never shifts the offsets of an edit still to be applied.
//! Insertions at the same offset keep the order they were pushed in.

use std::collections::BTreeMap;

use crate::{FileId, Span};

/// Replace `span` with `new_text`; an empty span inserts.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn replace(span: Span, new_text: impl Into<String>) -> Self {
        TextEdit {
            span,
            new_text: new_text.into(),
        }
    }

    pub fn insert(at: u32, text: impl Into<String>) -> Self {
        TextEdit {
            span: Span::point(at),
            new_text: text.into(),
        }
    }

    pub fn is_insert(&self) -> bool {
        self.span.is_empty()
    }

    /// Whether two edits touch overlapping text.
    ///
    /// Insertions never overlap each other. An insertion overlaps a
    /// replacement only strictly inside it.
    pub fn overlaps(&self, other: &TextEdit) -> bool {
        if self.is_insert() && other.is_insert() {
            return false;
        }
        let (first, second) = if self.span <= other.span {
            (self, other)
        } else {
            (other, self)
        };
        first.span.end > second.span.start
    }
}

/// Two edits of one document that cannot both be applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("edits overlap: {:?} and {:?}", .edit1.span, .edit2.span)]
pub struct EditConflict {
    pub edit1: TextEdit,
    pub edit2: TextEdit,
}

/// Edits across several documents, as returned to the host by a fix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkspaceEdit {
    changes: BTreeMap<FileId, Vec<TextEdit>>,
}

impl WorkspaceEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// An edit touching a single document.
    pub fn single(file: FileId, edits: Vec<TextEdit>) -> Self {
        let mut edit = Self::new();
        for e in edits {
            edit.push(file, e);
        }
        edit
    }

    pub fn push(&mut self, file: FileId, edit: TextEdit) {
        self.changes.entry(file).or_default().push(edit);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.values().all(Vec::is_empty)
    }

    /// Documents touched by this edit, in id order.
    pub fn files(&self) -> impl Iterator<Item = FileId> + '_ {
        self.changes
            .iter()
            .filter(|(_, edits)| !edits.is_empty())
            .map(|(file, _)| *file)
    }

    pub fn edits_for(&self, file: FileId) -> &[TextEdit] {
        self.changes.get(&file).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &[TextEdit])> + '_ {
        self.changes
            .iter()
            .map(|(file, edits)| (*file, edits.as_slice()))
    }

    pub fn edit_count(&self) -> usize {
        self.changes.values().map(Vec::len).sum()
    }

    /// `source` with this edit's changes for `file` applied.
    ///
    /// Fails without applying anything when two of them overlap. Spans past
    /// the end of `source` are clamped to it.
    pub fn apply_to(&self, file: FileId, source: &str) -> Result<String, EditConflict> {
        let edits = self.edits_for(file);
        if let Some(conflict) = first_conflict(edits) {
            return Err(conflict);
        }
        Ok(apply_edits(source, edits))
    }
}

fn first_conflict(edits: &[TextEdit]) -> Option<EditConflict> {
    edits.iter().enumerate().find_map(|(i, e1)| {
        edits[i + 1..]
            .iter()
            .find(|e2| e1.overlaps(e2))
            .map(|e2| EditConflict {
                edit1: e1.clone(),
                edit2: e2.clone(),
            })
    })
}

/// Apply non-overlapping edits from the end of `source` backwards.
fn apply_edits(source: &str, edits: &[TextEdit]) -> String {
    let mut order: Vec<(usize, &TextEdit)> = edits.iter().enumerate().collect();
    order.sort_by(|(ia, a), (ib, b)| {
        b.span
            .start
            .cmp(&a.span.start)
            .then(b.span.end.cmp(&a.span.end))
            .then(ib.cmp(ia))
    });

    let mut result = source.to_string();
    for (_, edit) in order {
        let start = (edit.span.start as usize).min(result.len());
        let end = (edit.span.end as usize).min(result.len()).max(start);
        result.replace_range(start..end, &edit.new_text);
    }
    result
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
