//! The `fix` command: apply one fix kind to every finding.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tsg_analyzer::analyze_all;
use tsg_fixes::{fix_all, FixRegistry};
use tsg_ir::CancellationToken;

use super::{split_args, unknown_flag};
use crate::{load_workspace, DriverError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixOptions {
    /// Equivalence key of the fix to apply; `None` takes the first fix
    /// offered for each diagnostic.
    pub key: Option<String>,
    /// Report what would change without writing files.
    pub dry_run: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixSummary {
    pub applied: usize,
    pub not_offered: usize,
    pub conflicts: usize,
    pub failures: usize,
    /// Files changed (or that would change with `--dry-run`).
    pub files: Vec<PathBuf>,
}

/// Parse `fix` arguments: `<paths..> [--fix=<key>] [--dry-run]`.
pub fn parse_fix_args(args: &[String]) -> Result<(Vec<PathBuf>, FixOptions), DriverError> {
    let (paths, flags) = split_args(args);
    let mut options = FixOptions::default();
    for flag in flags {
        if let Some(key) = flag.strip_prefix("--fix=") {
            options.key = Some(key.to_string());
        } else if flag == "--dry-run" {
            options.dry_run = true;
        } else {
            return Err(unknown_flag(flag));
        }
    }
    Ok((paths, options))
}

/// Fix every diagnostic under `paths` and rewrite the changed files.
///
/// Progress lines go to `out`. Fixes that fail or overlap an earlier fix
/// are reported and skipped; running the command again picks them up.
#[tracing::instrument(level = "debug", skip(out))]
pub fn fix_paths<W: Write>(
    paths: &[PathBuf],
    options: &FixOptions,
    mut out: W,
) -> Result<FixSummary, DriverError> {
    let registry = FixRegistry::with_builtin_fixes();
    if let Some(key) = &options.key {
        if registry.find(key).is_none() {
            return Err(DriverError::UnknownFix(key.clone()));
        }
    }

    let workspace = load_workspace(paths)?;
    let cancel = CancellationToken::new();
    let diagnostics = analyze_all(&workspace, &cancel)?;
    let outcome = fix_all(
        &registry,
        &workspace,
        &diagnostics,
        options.key.as_deref(),
        &cancel,
    )?;

    for failure in &outcome.failures {
        let location = workspace
            .document(failure.diagnostic.location.file)
            .map(|doc| doc.path.display().to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "warning: cannot fix {} in {location}: {}",
            failure.diagnostic.code, failure.error
        )?;
    }
    for conflict in &outcome.conflicts {
        tracing::debug!(conflict = %conflict.conflict, "overlapping fix skipped");
    }

    let mut files = Vec::new();
    for file in outcome.edit.files() {
        let Some(doc) = workspace.document(file) else {
            continue;
        };
        let fixed = outcome
            .edit
            .apply_to(file, &doc.text)
            .map_err(|source| DriverError::Conflict {
                path: doc.path.clone(),
                source,
            })?;
        if options.dry_run {
            writeln!(out, "would fix {}", doc.path.display())?;
        } else {
            fs::write(&doc.path, fixed).map_err(|source| DriverError::Write {
                path: doc.path.clone(),
                source,
            })?;
            writeln!(out, "fixed {}", doc.path.display())?;
        }
        files.push(doc.path.clone());
    }

    let summary = FixSummary {
        applied: outcome.applied,
        not_offered: outcome.not_offered,
        conflicts: outcome.conflicts.len(),
        failures: outcome.failures.len(),
        files,
    };
    writeln!(
        out,
        "{} fix{} in {} file{}",
        summary.applied,
        if summary.applied == 1 { "" } else { "es" },
        summary.files.len(),
        if summary.files.len() == 1 { "" } else { "s" },
    )?;
    if summary.conflicts > 0 {
        writeln!(
            out,
            "{} overlapping fix{} skipped; run again to apply",
            summary.conflicts,
            if summary.conflicts == 1 { "" } else { "es" },
        )?;
    }
    Ok(summary)
}
