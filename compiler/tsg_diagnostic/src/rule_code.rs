use std::fmt;
use std::str::FromStr;

use crate::Severity;

/// Diagnostic codes reported by the self-type rule.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum RuleCode {
    /// A self slot is filled with a concrete type other than the declaring type.
    TSG1,
    /// A self slot is filled with an open type parameter that is not itself a
    /// self parameter.
    TSG2,
}

impl RuleCode {
    /// Every code, in report order.
    pub const ALL: &'static [RuleCode] = &[RuleCode::TSG1, RuleCode::TSG2];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleCode::TSG1 => "TSG1",
            RuleCode::TSG2 => "TSG2",
        }
    }

    /// Short rule title, used by SARIF rule metadata and `--explain` headers.
    pub fn title(self) -> &'static str {
        match self {
            RuleCode::TSG1 => "Self-type argument must be the declaring type",
            RuleCode::TSG2 => "Type parameter passed to a self-type slot must be a self parameter",
        }
    }

    /// Message template; `{0}` is replaced by the first message argument.
    pub fn message_format(self) -> &'static str {
        match self {
            RuleCode::TSG1 => "The self-type argument should be '{0}'",
            RuleCode::TSG2 => "The type parameter should be declared as {0}",
        }
    }

    pub fn category(self) -> &'static str {
        "Usage"
    }

    pub fn default_severity(self) -> Severity {
        Severity::Warning
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown rule code string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownRuleCode(pub String);

impl fmt::Display for UnknownRuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rule code `{}`", self.0)
    }
}

impl std::error::Error for UnknownRuleCode {}

impl FromStr for RuleCode {
    type Err = UnknownRuleCode;

    /// Parse a code case-insensitively, e.g. `tsg1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RuleCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRuleCode(s.to_string()))
    }
}
