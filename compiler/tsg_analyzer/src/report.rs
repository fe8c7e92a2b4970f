//! Turning findings into diagnostics.

use tsg_diagnostic::{Diagnostic, RuleCode};
use tsg_ir::{FileId, Location};

use crate::config::Config;
use crate::scanner::Finding;

/// The accepted spellings of a self parameter, as shown in `TSG2` messages.
///
/// `None` when no strategy is enabled.
pub fn alternatives(config: &Config, param_name: &str) -> Option<String> {
    let by_name = format!("\"{}\"", config.param_name);
    let by_attribute = format!("\"[{}] {param_name}\"", config.attribute_name);
    match (config.param_name_enable, config.attribute_enable) {
        (true, true) => Some(format!("{by_name}|{by_attribute}")),
        (true, false) => Some(by_name),
        (false, true) => Some(by_attribute),
        (false, false) => None,
    }
}

/// The diagnostic for `finding`, or `None` when its rule is suppressed.
pub fn to_diagnostic(finding: &Finding, file: FileId, config: &Config) -> Option<Diagnostic> {
    let diagnostic = match finding {
        Finding::SelfViolation { span, type_name } => {
            Diagnostic::new(RuleCode::TSG1, Location::new(file, *span), vec![type_name.clone()])
                .with_label(format!("expected `{type_name}`"))
        }
        Finding::NestedViolation {
            span, param_name, ..
        } => {
            let Some(expected) = alternatives(config, param_name) else {
                debug_assert!(
                    config.any_strategy_enabled(),
                    "nested violation reported with every strategy disabled"
                );
                tracing::error!(%param_name, "nested violation without an enabled strategy");
                return None;
            };
            Diagnostic::new(RuleCode::TSG2, Location::new(file, *span), vec![expected])
                .with_label("passed to a self-type parameter")
        }
    };
    let severity = config.report_level(diagnostic.code).severity(diagnostic.code)?;
    Some(diagnostic.with_severity(severity))
}
