//! Diagnostic queue for collecting, deduplicating and ordering findings
//! across documents.
//!
//! Documents are analyzed in parallel, so findings arrive in no particular
//! order. The queue restores a stable report order: by document, then by
//! position, then by rule code.

use rustc_hash::FxHashSet;
use tsg_ir::FileId;

use crate::{Diagnostic, Severity};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct QueueConfig {
    /// Maximum number of diagnostics kept (0 = unlimited).
    pub limit: usize,
    /// Drop diagnostics identical to one already queued.
    pub deduplicate: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        QueueConfig {
            limit: 0,
            deduplicate: true,
        }
    }
}

/// Queue for collecting and sorting diagnostics.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<Diagnostic>,
    error_count: usize,
    warning_count: usize,
    config: QueueConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: QueueConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Add a diagnostic.
    ///
    /// Returns `true` if the diagnostic was added, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        if self.limit_reached() {
            return false;
        }
        if self.config.deduplicate && !self.seen.insert(diag.clone()) {
            return false;
        }
        match diag.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Note | Severity::Help => {}
        }
        self.diagnostics.push(diag);
        true
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.add(diag);
        }
    }

    pub fn limit_reached(&self) -> bool {
        self.config.limit > 0 && self.diagnostics.len() >= self.config.limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort diagnostics by document and position and return them.
    ///
    /// Clears the queue.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(sort_key);
        self.seen.clear();
        self.error_count = 0;
        self.warning_count = 0;
        std::mem::take(&mut self.diagnostics)
    }
}

fn sort_key(diag: &Diagnostic) -> (FileId, u32, u32, crate::RuleCode) {
    (
        diag.location.file,
        diag.location.span.start,
        diag.location.span.end,
        diag.code,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tsg_ir::{Location, Span};

    use super::*;
    use crate::RuleCode;

    fn diag(file: u32, start: u32, code: RuleCode) -> Diagnostic {
        Diagnostic::new(
            code,
            Location::new(FileId::new(file), Span::new(start, start + 1)),
            vec!["X".to_string()],
        )
    }

    #[test]
    fn test_flush_orders_by_file_then_position() {
        let mut queue = DiagnosticQueue::new();
        queue.add(diag(1, 5, RuleCode::TSG1));
        queue.add(diag(0, 9, RuleCode::TSG2));
        queue.add(diag(0, 2, RuleCode::TSG1));

        let order: Vec<_> = queue
            .flush()
            .iter()
            .map(|d| (d.location.file.raw(), d.location.span.start))
            .collect();
        assert_eq!(order, vec![(0, 2), (0, 9), (1, 5)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let mut queue = DiagnosticQueue::new();
        assert!(queue.add(diag(0, 2, RuleCode::TSG1)));
        assert!(!queue.add(diag(0, 2, RuleCode::TSG1)));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.warning_count(), 1);
    }

    #[test]
    fn test_limit() {
        let mut queue = DiagnosticQueue::with_config(QueueConfig {
            limit: 1,
            deduplicate: false,
        });
        queue.extend([diag(0, 1, RuleCode::TSG1), diag(0, 2, RuleCode::TSG1)]);
        assert!(queue.limit_reached());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_counts_by_severity() {
        let mut queue = DiagnosticQueue::new();
        queue.add(diag(0, 1, RuleCode::TSG1).with_severity(Severity::Error));
        queue.add(diag(0, 2, RuleCode::TSG2));
        queue.add(diag(0, 3, RuleCode::TSG2).with_severity(Severity::Note));
        assert_eq!((queue.error_count(), queue.warning_count()), (1, 1));
    }
}
