//! Self-referencing generic constraint checker.
//!
//! A type parameter is a *self parameter* when its name matches the
//! configured name or it carries the configured marker attribute. Every base
//! type that fills a self parameter of its definition must pass either the
//! declaring type itself (`TSG1` otherwise) or an open parameter that is a
//! self parameter too (`TSG2` otherwise).
//!
//! The checker only talks to the host through `tsg_ir::host` traits.
//!
//! ```ignore
//! let diagnostics = analyze_all(&workspace, &CancellationToken::new())?;
//! ```

pub mod config;
pub mod matcher;
pub mod report;
pub mod scanner;

use rayon::prelude::*;
use tsg_diagnostic::Diagnostic;
use tsg_ir::host::{AnalyzerConfigOptions, DocumentStore, SemanticModel};
use tsg_ir::{CancellationToken, Cancelled, FileId};

pub use config::{Config, ReportLevel};
pub use scanner::{Finding, SelfSlot};

/// The configuration in effect for `file`.
pub fn config_for<H>(host: &H, file: FileId) -> Config
where
    H: DocumentStore + SemanticModel + ?Sized,
{
    match host.config_options(file) {
        Some(options) => Config::resolve(options, host),
        None => Config::resolve(&AnalyzerConfigOptions::new(), host),
    }
}

/// Diagnostics for one document, in declaration order.
#[tracing::instrument(level = "debug", skip(host, cancel))]
pub fn analyze_document<H>(
    host: &H,
    file: FileId,
    cancel: &CancellationToken,
) -> Result<Vec<Diagnostic>, Cancelled>
where
    H: DocumentStore + SemanticModel + ?Sized,
{
    let Some(tree) = host.syntax_tree(file) else {
        return Ok(Vec::new());
    };
    let config = config_for(host, file);
    if !config.any_strategy_enabled() {
        return Ok(Vec::new());
    }
    let findings = scanner::scan_document(host, tree, &config, cancel)?;
    Ok(findings
        .iter()
        .filter_map(|finding| report::to_diagnostic(finding, file, &config))
        .collect())
}

/// Diagnostics for every document, analyzed in parallel.
///
/// The result is ordered by document, then by position.
pub fn analyze_all<H>(host: &H, cancel: &CancellationToken) -> Result<Vec<Diagnostic>, Cancelled>
where
    H: DocumentStore + SemanticModel + Sync + ?Sized,
{
    let per_document: Vec<Vec<Diagnostic>> = host
        .document_ids()
        .into_par_iter()
        .map(|file| analyze_document(host, file, cancel))
        .collect::<Result<_, _>>()?;
    let mut diagnostics: Vec<Diagnostic> = per_document.into_iter().flatten().collect();
    diagnostics.sort_by_key(|d| (d.location.file, d.location.span.start, d.location.span.end));
    tracing::debug!(count = diagnostics.len(), "analysis finished");
    Ok(diagnostics)
}
