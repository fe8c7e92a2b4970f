//! The `explain` command: print a rule's documentation page.

use std::io::Write;

use tsg_diagnostic::{RuleCode, RuleDocs};

use crate::DriverError;

/// Write the documentation for `code` (e.g. `TSG2`, case-insensitive).
pub fn explain_rule<W: Write>(code: &str, mut out: W) -> Result<(), DriverError> {
    let code: RuleCode = code.parse()?;
    let doc = RuleDocs::get(code).ok_or_else(|| DriverError::MissingDocs(code.to_string()))?;
    writeln!(out, "{doc}")?;
    Ok(())
}
