//! SARIF Emitter
//!
//! Static Analysis Results Interchange Format (SARIF 2.1.0) output for
//! CI/CD integration (GitHub Code Scanning, VS Code SARIF Viewer, ...).
//!
//! See: <https://sarifweb.azurewebsites.net>/

use std::collections::BTreeSet;
use std::io::Write;

use serde_json::{json, Value};

use crate::{Diagnostic, RuleCode, Severity};

use super::{DiagnosticEmitter, SourceDocument};

const SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

/// SARIF emitter. Results are buffered until [`SarifEmitter::finish`].
pub struct SarifEmitter<W: Write> {
    writer: W,
    tool_name: String,
    tool_version: String,
    results: Vec<Value>,
    rules: BTreeSet<RuleCode>,
}

impl<W: Write> SarifEmitter<W> {
    pub fn new(writer: W, tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        SarifEmitter {
            writer,
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
            results: Vec::new(),
            rules: BTreeSet::new(),
        }
    }

    fn severity_to_level(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note | Severity::Help => "note",
        }
    }

    fn location(doc: &SourceDocument<'_>, span: tsg_ir::Span, message: Option<&str>) -> Value {
        let ((start_line, start_column), (end_line, end_column)) = doc.range(span);
        let mut location = json!({
            "physicalLocation": {
                "artifactLocation": { "uri": doc.path },
                "region": {
                    "startLine": start_line,
                    "startColumn": start_column,
                    "endLine": end_line,
                    "endColumn": end_column,
                    "charOffset": span.start,
                    "charLength": span.len(),
                }
            }
        });
        if let Some(text) = message {
            location["message"] = json!({ "text": text });
        }
        location
    }

    /// The complete SARIF log for everything emitted so far.
    pub fn to_value(&self) -> Value {
        let rules: Vec<Value> = self
            .rules
            .iter()
            .map(|code| {
                json!({
                    "id": code.as_str(),
                    "name": code.title(),
                    "shortDescription": { "text": code.title() },
                    "defaultConfiguration": {
                        "level": Self::severity_to_level(code.default_severity())
                    },
                    "properties": { "category": code.category() },
                })
            })
            .collect();

        json!({
            "$schema": SCHEMA,
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": self.tool_name,
                        "version": self.tool_version,
                        "rules": rules,
                    }
                },
                "results": self.results,
            }]
        })
    }

    /// Write the SARIF document.
    pub fn finish(&mut self) -> std::io::Result<()> {
        let value = self.to_value();
        serde_json::to_writer_pretty(&mut self.writer, &value)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

impl<W: Write> DiagnosticEmitter for SarifEmitter<W> {
    fn emit(&mut self, doc: &SourceDocument<'_>, diagnostic: &Diagnostic) {
        self.rules.insert(diagnostic.code);

        let related: Vec<Value> = diagnostic
            .labels
            .iter()
            .filter(|label| !label.is_primary)
            .enumerate()
            .map(|(id, label)| {
                let mut loc = Self::location(doc, label.span, Some(&label.message));
                loc["id"] = json!(id);
                loc
            })
            .collect();

        let mut result = json!({
            "ruleId": diagnostic.code.as_str(),
            "level": Self::severity_to_level(diagnostic.severity),
            "message": { "text": diagnostic.message },
            "locations": [Self::location(doc, diagnostic.primary_span(), None)],
        });
        if !related.is_empty() {
            result["relatedLocations"] = Value::Array(related);
        }
        self.results.push(result);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // SARIF carries no summary.
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;
    use tsg_ir::{FileId, Location, Span};

    use super::*;

    #[test]
    fn test_sarif_document_shape() {
        let source = "class Bad : ISelf<Impl> { }";
        let diag = Diagnostic::new(
            RuleCode::TSG1,
            Location::new(FileId::new(0), Span::new(18, 22)),
            vec!["Bad".to_string()],
        )
        .with_secondary_label(Span::new(6, 9), "declared here");

        let mut output = Vec::new();
        let mut emitter = SarifEmitter::new(&mut output, "tsgc", "0.1.0");
        emitter.emit(&SourceDocument::new("src/Bad.cs", source), &diag);
        emitter.finish().unwrap();

        let log: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(log["version"], "2.1.0");
        let run = &log["runs"][0];
        assert_eq!(run["tool"]["driver"]["name"], "tsgc");
        assert_eq!(run["tool"]["driver"]["rules"][0]["id"], "TSG1");

        let result = &run["results"][0];
        assert_eq!(result["ruleId"], "TSG1");
        assert_eq!(result["level"], "warning");
        let region = &result["locations"][0]["physicalLocation"]["region"];
        assert_eq!(region["startLine"], 1);
        assert_eq!(region["startColumn"], 19);
        assert_eq!(region["endColumn"], 23);
        assert_eq!(
            result["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "src/Bad.cs"
        );
        assert_eq!(
            result["relatedLocations"][0]["message"]["text"],
            "declared here"
        );
    }

    #[test]
    fn test_finish_writes_the_built_document() {
        let mut emitter = SarifEmitter::new(Vec::new(), "tsgc", "0.1.0");
        let expected = emitter.to_value();
        emitter.finish().unwrap();

        let text = String::from_utf8(emitter.writer).unwrap();
        assert!(text.ends_with("}\n"));
        let written: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_no_results() {
        let emitter = SarifEmitter::new(Vec::new(), "tsgc", "0.1.0");
        let log = emitter.to_value();
        assert_eq!(log["runs"][0]["results"], json!([]));
        assert_eq!(log["runs"][0]["tool"]["driver"]["rules"], json!([]));
    }
}
