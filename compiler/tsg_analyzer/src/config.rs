//! Per-file rule configuration.
//!
//! Values come from the host's analyzer options. Malformed or missing values
//! fall back to defaults and never produce an error.

use tsg_diagnostic::{RuleCode, Severity};
use tsg_ir::host::{ConfigLookup, SemanticModel};
use tsg_ir::TypeId;

pub const PARAM_NAME_KEY: &str = "dotnet_tselfgeneric.tself_param_name";
pub const PARAM_NAME_ENABLE_KEY: &str = "dotnet_tselfgeneric.tself_param_name.enable";
pub const ATTRIBUTE_NAME_KEY: &str = "dotnet_tselfgeneric.tself_attribute_name";
pub const ATTRIBUTE_NAME_ENABLE_KEY: &str = "dotnet_tselfgeneric.tself_attribute_name.enable";

pub const DEFAULT_PARAM_NAME: &str = "TSelf";
pub const DEFAULT_ATTRIBUTE_NAME: &str = "TSelfAttribute";

/// How a rule is reported, from `dotnet_diagnostic.<code>.severity`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ReportLevel {
    /// The rule's default severity.
    #[default]
    Default,
    Report(Severity),
    Suppressed,
}

impl ReportLevel {
    /// Parse an option value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let level = if value.eq_ignore_ascii_case("default") {
            ReportLevel::Default
        } else if value.eq_ignore_ascii_case("error") {
            ReportLevel::Report(Severity::Error)
        } else if value.eq_ignore_ascii_case("warning") {
            ReportLevel::Report(Severity::Warning)
        } else if value.eq_ignore_ascii_case("suggestion") {
            ReportLevel::Report(Severity::Note)
        } else if value.eq_ignore_ascii_case("silent") || value.eq_ignore_ascii_case("none") {
            ReportLevel::Suppressed
        } else {
            return None;
        };
        Some(level)
    }

    /// Severity a diagnostic of `code` is reported with, `None` if suppressed.
    pub fn severity(self, code: RuleCode) -> Option<Severity> {
        match self {
            ReportLevel::Default => Some(code.default_severity()),
            ReportLevel::Report(severity) => Some(severity),
            ReportLevel::Suppressed => None,
        }
    }
}

/// Resolved rule configuration for one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub param_name_enable: bool,
    pub param_name: String,
    pub attribute_enable: bool,
    pub attribute_name: String,
    /// The attribute type `attribute_name` resolves to, if unique.
    pub attribute_symbol: Option<TypeId>,
    pub self_violation_level: ReportLevel,
    pub nested_violation_level: ReportLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            param_name_enable: true,
            param_name: DEFAULT_PARAM_NAME.to_string(),
            attribute_enable: false,
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_string(),
            attribute_symbol: None,
            self_violation_level: ReportLevel::Default,
            nested_violation_level: ReportLevel::Default,
        }
    }
}

impl Config {
    /// Resolve the configuration from `options`, looking the attribute type
    /// up in `model`.
    pub fn resolve<O, M>(options: &O, model: &M) -> Config
    where
        O: ConfigLookup + ?Sized,
        M: SemanticModel + ?Sized,
    {
        let param_name_enable = options
            .lookup(PARAM_NAME_ENABLE_KEY)
            .and_then(parse_bool)
            .unwrap_or(true);
        let param_name = options
            .lookup(PARAM_NAME_KEY)
            .unwrap_or(DEFAULT_PARAM_NAME)
            .to_string();
        let attribute_enable = options
            .lookup(ATTRIBUTE_NAME_ENABLE_KEY)
            .and_then(parse_bool)
            .unwrap_or(false);
        let attribute_name = options
            .lookup(ATTRIBUTE_NAME_KEY)
            .unwrap_or(DEFAULT_ATTRIBUTE_NAME)
            .to_string();
        let attribute_symbol = model.type_by_name(&attribute_name);

        let level = |code: RuleCode| {
            let key = format!("dotnet_diagnostic.{}.severity", code.as_str());
            options
                .lookup(&key)
                .and_then(ReportLevel::parse)
                .unwrap_or_default()
        };

        Config {
            param_name_enable,
            param_name,
            attribute_enable,
            attribute_name,
            attribute_symbol,
            self_violation_level: level(RuleCode::TSG1),
            nested_violation_level: level(RuleCode::TSG2),
        }
    }

    /// Whether any self-parameter matching strategy is on.
    pub fn any_strategy_enabled(&self) -> bool {
        self.param_name_enable || self.attribute_enable
    }

    pub fn report_level(&self, code: RuleCode) -> ReportLevel {
        match code {
            RuleCode::TSG1 => self.self_violation_level,
            RuleCode::TSG2 => self.nested_violation_level,
        }
    }
}

/// `true`/`false`, case-insensitive, surrounding whitespace ignored.
pub fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests;
