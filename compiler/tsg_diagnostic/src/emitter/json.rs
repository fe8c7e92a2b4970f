//! JSON Emitter
//!
//! Machine-readable diagnostic output: one JSON array holding every
//! diagnostic, written by [`JsonEmitter::finish`].

use std::io::Write;

use serde::Serialize;

use crate::Diagnostic;

use super::{DiagnosticEmitter, SourceDocument};

#[derive(Serialize)]
struct JsonPosition {
    line: u32,
    column: u32,
}

#[derive(Serialize)]
struct JsonLabel {
    start: u32,
    end: u32,
    message: String,
    primary: bool,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    code: &'static str,
    severity: &'static str,
    category: &'static str,
    message: String,
    arguments: Vec<String>,
    file: String,
    start: JsonPosition,
    end: JsonPosition,
    labels: Vec<JsonLabel>,
    notes: Vec<String>,
}

/// JSON emitter for machine-readable output.
pub struct JsonEmitter<W: Write> {
    writer: W,
    entries: Vec<JsonDiagnostic>,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            entries: Vec::new(),
        }
    }

    /// Write the collected diagnostics as a JSON array.
    pub fn finish(&mut self) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.entries)?;
        writeln!(self.writer)?;
        self.entries.clear();
        self.writer.flush()
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, doc: &SourceDocument<'_>, diagnostic: &Diagnostic) {
        let ((line, column), (end_line, end_column)) = doc.range(diagnostic.primary_span());
        self.entries.push(JsonDiagnostic {
            code: diagnostic.code.as_str(),
            severity: diagnostic.severity.as_str(),
            category: diagnostic.category(),
            message: diagnostic.message.clone(),
            arguments: diagnostic.arguments.clone(),
            file: doc.path.to_string(),
            start: JsonPosition { line, column },
            end: JsonPosition {
                line: end_line,
                column: end_column,
            },
            labels: diagnostic
                .labels
                .iter()
                .map(|label| JsonLabel {
                    start: label.span.start,
                    end: label.span.end,
                    message: label.message.clone(),
                    primary: label.is_primary,
                })
                .collect(),
            notes: diagnostic.notes.clone(),
        });
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // The array is the whole report.
    }
}
