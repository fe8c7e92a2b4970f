//! Embedded rule documentation for `tsgc explain`.
//!
//! Each rule code has a markdown page describing the rule, showing failing
//! and passing declarations, and listing the available fixes.

use crate::RuleCode;

/// Registry of embedded rule documentation.
pub struct RuleDocs;

impl RuleDocs {
    /// The documentation page for `code`, if one is embedded.
    pub fn get(code: RuleCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    pub fn all_codes() -> impl Iterator<Item = RuleCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    pub fn has_docs(code: RuleCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(RuleCode, &str)] = &[
    (RuleCode::TSG1, include_str!("TSG1.md")),
    (RuleCode::TSG2, include_str!("TSG2.md")),
];

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
