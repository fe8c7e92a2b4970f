//! Command handlers for the `tsgc` CLI.
//!
//! Handlers take their output writer as a parameter and return a summary,
//! so the binary decides the exit code and tests can capture the output.

mod check;
mod explain;
mod fix;

pub use check::{check_paths, parse_check_args, CheckOptions, CheckSummary, OutputFormat};
pub use explain::explain_rule;
pub use fix::{fix_paths, parse_fix_args, FixOptions, FixSummary};

use std::path::PathBuf;

use crate::DriverError;

/// Split `args` into paths and `--flag[=value]` options.
///
/// Paths default to the current directory.
fn split_args(args: &[String]) -> (Vec<PathBuf>, Vec<&str>) {
    let mut paths = Vec::new();
    let mut flags = Vec::new();
    for arg in args {
        if arg.starts_with("--") {
            flags.push(arg.as_str());
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    if paths.is_empty() {
        paths.push(PathBuf::from("."));
    }
    (paths, flags)
}

fn unknown_flag(flag: &str) -> DriverError {
    DriverError::Usage(format!("unknown option `{flag}`"))
}
