use super::*;

#[test]
fn test_every_code_is_documented() {
    for code in RuleCode::ALL {
        assert!(RuleDocs::has_docs(*code), "{code} has no docs");
    }
    assert_eq!(RuleDocs::all_codes().count(), RuleCode::ALL.len());
}

#[test]
fn test_docs_start_with_code_heading() {
    let doc = RuleDocs::get(RuleCode::TSG1).unwrap();
    assert!(doc.starts_with("# TSG1"));
    let doc = RuleDocs::get(RuleCode::TSG2).unwrap();
    assert!(doc.starts_with("# TSG2"));
}
