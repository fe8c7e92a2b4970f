//! Diagnostic Emitters
//!
//! Provides different output formats for diagnostics:
//! - Terminal: Colored, human-readable output with a source snippet
//! - JSON: Machine-readable output for tooling
//! - SARIF: Static Analysis Results Interchange Format for CI/CD integration

mod json;
mod sarif;
mod terminal;

pub use json::JsonEmitter;
pub use sarif::SarifEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use tsg_ir::Span;

use crate::span_utils::LineOffsetTable;
use crate::Diagnostic;

/// The document a diagnostic points into, with its line table.
#[derive(Clone, Debug)]
pub struct SourceDocument<'a> {
    pub path: &'a str,
    pub text: &'a str,
    lines: LineOffsetTable,
}

impl<'a> SourceDocument<'a> {
    pub fn new(path: &'a str, text: &'a str) -> Self {
        SourceDocument {
            path,
            text,
            lines: LineOffsetTable::build(text),
        }
    }

    /// 1-based (line, column) of a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        self.lines.offset_to_line_col(self.text, offset)
    }

    pub fn range(&self, span: Span) -> ((u32, u32), (u32, u32)) {
        self.lines.span_to_range(self.text, span)
    }

    pub fn line_text(&self, line: u32) -> Option<&'a str> {
        self.lines.line_text(self.text, line)
    }
}

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic found in `doc`.
    fn emit(&mut self, doc: &SourceDocument<'_>, diagnostic: &Diagnostic);

    /// Emit several diagnostics of the same document.
    fn emit_all(&mut self, doc: &SourceDocument<'_>, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(doc, diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
