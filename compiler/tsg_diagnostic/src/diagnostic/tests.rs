use pretty_assertions::assert_eq;
use tsg_ir::FileId;

use super::*;

fn loc(start: u32, end: u32) -> Location {
    Location::new(FileId::new(0), Span::new(start, end))
}

#[test]
fn test_new_renders_message() {
    let diag = Diagnostic::new(RuleCode::TSG1, loc(20, 34), vec!["Bad".to_string()]);
    assert_eq!(diag.message, "The self-type argument should be 'Bad'");
    assert_eq!(diag.severity, Severity::Warning);
    assert_eq!(diag.category(), "Usage");
    assert_eq!(diag.primary_span(), Span::new(20, 34));
}

#[test]
fn test_builder_labels_and_notes() {
    let diag = Diagnostic::new(RuleCode::TSG2, loc(10, 11), vec!["\"TSelf\"".to_string()])
        .with_severity(Severity::Error)
        .with_label("declared here")
        .with_secondary_label(Span::new(30, 31), "passed here")
        .with_note("rename it");

    assert!(diag.is_error());
    assert_eq!(
        diag.labels,
        vec![
            Label::primary(Span::new(10, 11), "declared here"),
            Label::secondary(Span::new(30, 31), "passed here"),
        ]
    );
    assert_eq!(diag.notes, vec!["rename it".to_string()]);
    assert_eq!(
        diag.to_string(),
        "error[TSG2]: The type parameter should be declared as \"TSelf\""
    );
}

#[test]
fn test_format_message_placeholders() {
    let args = vec!["a".to_string(), "b".to_string()];
    assert_eq!(format_message("{1} then {0}", &args), "b then a");
    assert_eq!(format_message("missing {2}", &args), "missing {2}");
    assert_eq!(format_message("not {x} a {", &args), "not {x} a {");
    assert_eq!(format_message("no placeholders", &[]), "no placeholders");
}
