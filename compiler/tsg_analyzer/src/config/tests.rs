use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tsg_ir::host::{AnalyzerConfigOptions, SemanticModel};
use tsg_syntax::Workspace;

use super::*;

fn workspace(source: &str) -> Workspace {
    let mut builder = Workspace::builder();
    builder.add_document("Lib.cs", source);
    builder.build()
}

fn options(pairs: &[(&str, &str)]) -> AnalyzerConfigOptions {
    pairs.iter().copied().collect()
}

#[test]
fn test_defaults_when_absent() {
    let ws = workspace("class A { }");
    let config = Config::resolve(&AnalyzerConfigOptions::new(), &ws);
    assert_eq!(config, Config::default());
    assert!(config.any_strategy_enabled());
}

#[test]
fn test_explicit_values() {
    let ws = workspace("namespace Self { class MarkAttribute : System.Attribute { } }");
    let config = Config::resolve(
        &options(&[
            (PARAM_NAME_KEY, "TMe"),
            (PARAM_NAME_ENABLE_KEY, "FALSE"),
            (ATTRIBUTE_NAME_KEY, "Self.MarkAttribute"),
            (ATTRIBUTE_NAME_ENABLE_KEY, " True "),
        ]),
        &ws,
    );
    assert_eq!(config.param_name, "TMe");
    assert!(!config.param_name_enable);
    assert!(config.attribute_enable);
    assert_eq!(config.attribute_name, "Self.MarkAttribute");
    assert_eq!(config.attribute_symbol, ws.type_by_name("Self.MarkAttribute"));
    assert!(config.attribute_symbol.is_some());
}

#[test]
fn test_malformed_booleans_fall_back() {
    let ws = workspace("");
    let config = Config::resolve(
        &options(&[(PARAM_NAME_ENABLE_KEY, "nope"), (ATTRIBUTE_NAME_ENABLE_KEY, "1")]),
        &ws,
    );
    assert!(config.param_name_enable);
    assert!(!config.attribute_enable);
}

#[test]
fn test_empty_name_is_kept() {
    let ws = workspace("");
    let config = Config::resolve(&options(&[(PARAM_NAME_KEY, "")]), &ws);
    assert_eq!(config.param_name, "");
}

#[test]
fn test_default_attribute_resolves_by_simple_name() {
    let ws = workspace("namespace Self { class TSelfAttribute : System.Attribute { } }");
    let config = Config::resolve(&AnalyzerConfigOptions::new(), &ws);
    assert!(config.attribute_symbol.is_some());
}

#[test]
fn test_ambiguous_attribute_is_none() {
    let ws = workspace(
        "namespace A { class TSelfAttribute { } }\nnamespace B { class TSelfAttribute { } }",
    );
    let config = Config::resolve(&options(&[(ATTRIBUTE_NAME_ENABLE_KEY, "true")]), &ws);
    assert_eq!(config.attribute_symbol, None);
    assert!(config.any_strategy_enabled());
}

#[test]
fn test_both_disabled() {
    let ws = workspace("");
    let config = Config::resolve(&options(&[(PARAM_NAME_ENABLE_KEY, "false")]), &ws);
    assert!(!config.any_strategy_enabled());
}

#[test]
fn test_report_levels() {
    let ws = workspace("");
    let config = Config::resolve(
        &options(&[
            ("dotnet_diagnostic.TSG1.severity", "error"),
            ("dotnet_diagnostic.tsg2.severity", "none"),
        ]),
        &ws,
    );
    assert_eq!(config.report_level(RuleCode::TSG1), ReportLevel::Report(Severity::Error));
    assert_eq!(config.report_level(RuleCode::TSG2), ReportLevel::Suppressed);
    assert_eq!(ReportLevel::Suppressed.severity(RuleCode::TSG2), None);
    assert_eq!(
        ReportLevel::Default.severity(RuleCode::TSG1),
        Some(Severity::Warning)
    );
}

#[test]
fn test_report_level_parse() {
    assert_eq!(ReportLevel::parse("Suggestion"), Some(ReportLevel::Report(Severity::Note)));
    assert_eq!(ReportLevel::parse(" warning "), Some(ReportLevel::Report(Severity::Warning)));
    assert_eq!(ReportLevel::parse("silent"), Some(ReportLevel::Suppressed));
    assert_eq!(ReportLevel::parse("default"), Some(ReportLevel::Default));
    assert_eq!(ReportLevel::parse("loud"), None);
    assert_eq!(ReportLevel::parse("loud").unwrap_or_default(), ReportLevel::Default);
}

/// Flip the ASCII case of the characters selected by `mask`.
fn mix_case(word: &str, mask: &[bool]) -> String {
    word.chars()
        .zip(mask.iter().copied().chain(std::iter::repeat(false)))
        .map(|(c, flip)| if flip { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
        .collect()
}

proptest! {
    #[test]
    fn parse_bool_ignores_case_and_padding(
        value in any::<bool>(),
        mask in proptest::collection::vec(any::<bool>(), 5),
        left in "[ \t]{0,3}",
        right in "[ \t]{0,3}",
    ) {
        let word = mix_case(if value { "true" } else { "false" }, &mask);
        prop_assert_eq!(parse_bool(&format!("{left}{word}{right}")), Some(value));
    }

    #[test]
    fn parse_bool_rejects_other_words(word in "[a-z0-9]{0,8}") {
        prop_assume!(word != "true" && word != "false");
        prop_assert_eq!(parse_bool(&word), None);
    }
}
