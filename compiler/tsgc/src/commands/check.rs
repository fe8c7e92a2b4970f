//! The `check` command: analyze sources and report findings.

use std::io::Write;
use std::path::PathBuf;

use tsg_analyzer::analyze_all;
use tsg_diagnostic::emitter::{
    ColorMode, DiagnosticEmitter, JsonEmitter, SarifEmitter, SourceDocument, TerminalEmitter,
};
use tsg_diagnostic::{Diagnostic, DiagnosticQueue};
use tsg_ir::CancellationToken;
use tsg_syntax::Workspace;

use super::{split_args, unknown_flag};
use crate::{load_workspace, DriverError};

/// Report format for `--format`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Sarif,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "terminal" | "text" => Some(OutputFormat::Terminal),
            "json" => Some(OutputFormat::Json),
            "sarif" => Some(OutputFormat::Sarif),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub format: OutputFormat,
    pub color: ColorMode,
}

/// Counts of what `check` reported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub documents: usize,
    pub errors: usize,
    pub warnings: usize,
    /// All reported diagnostics, including notes.
    pub reported: usize,
}

impl CheckSummary {
    pub fn has_findings(&self) -> bool {
        self.reported > 0
    }
}

/// Parse `check` arguments: `<paths..> [--format=..] [--color=..]`.
pub fn parse_check_args(args: &[String]) -> Result<(Vec<PathBuf>, CheckOptions), DriverError> {
    let (paths, flags) = split_args(args);
    let mut options = CheckOptions::default();
    for flag in flags {
        if let Some(value) = flag.strip_prefix("--format=") {
            options.format = OutputFormat::parse(value).ok_or_else(|| {
                DriverError::Usage(format!(
                    "invalid format `{value}` (expected terminal, json or sarif)"
                ))
            })?;
        } else if let Some(value) = flag.strip_prefix("--color=") {
            options.color = ColorMode::parse(value).ok_or_else(|| {
                DriverError::Usage(format!(
                    "invalid color mode `{value}` (expected auto, always or never)"
                ))
            })?;
        } else {
            return Err(unknown_flag(flag));
        }
    }
    Ok((paths, options))
}

/// Analyze every source under `paths` and write the report to `out`.
///
/// `is_tty` tells whether `out` is a terminal, for `--color=auto`.
#[tracing::instrument(level = "debug", skip(out))]
pub fn check_paths<W: Write>(
    paths: &[PathBuf],
    options: &CheckOptions,
    out: W,
    is_tty: bool,
) -> Result<CheckSummary, DriverError> {
    let workspace = load_workspace(paths)?;
    let diagnostics = analyze_all(&workspace, &CancellationToken::new())?;

    let mut queue = DiagnosticQueue::new();
    queue.extend(diagnostics);
    let errors = queue.error_count();
    let warnings = queue.warning_count();
    let diagnostics = queue.flush();
    let summary = CheckSummary {
        documents: workspace.documents().len(),
        errors,
        warnings,
        reported: diagnostics.len(),
    };

    match options.format {
        OutputFormat::Terminal => {
            let mut emitter = TerminalEmitter::with_color_mode(out, options.color, is_tty);
            report(&workspace, &diagnostics, &mut emitter);
            emitter.emit_summary(errors, warnings);
            emitter.flush();
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(out);
            report(&workspace, &diagnostics, &mut emitter);
            emitter.finish()?;
        }
        OutputFormat::Sarif => {
            let mut emitter = SarifEmitter::new(out, "tsgc", env!("CARGO_PKG_VERSION"));
            report(&workspace, &diagnostics, &mut emitter);
            emitter.finish()?;
        }
    }
    Ok(summary)
}

/// Emit `diagnostics`, sorted by document, against their source text.
fn report<E: DiagnosticEmitter>(workspace: &Workspace, diagnostics: &[Diagnostic], emitter: &mut E) {
    for group in diagnostics.chunk_by(|a, b| a.location.file == b.location.file) {
        let Some(doc) = workspace.document(group[0].location.file) else {
            tracing::error!(file = ?group[0].location.file, "diagnostic for unknown document");
            continue;
        };
        let path = doc.path.display().to_string();
        emitter.emit_all(&SourceDocument::new(&path, &doc.text), group);
    }
}
