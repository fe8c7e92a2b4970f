use pretty_assertions::assert_eq;

use super::*;

fn apply(source: &str, edits: Vec<TextEdit>) -> Result<String, EditConflict> {
    let file = FileId::new(0);
    WorkspaceEdit::single(file, edits).apply_to(file, source)
}

#[test]
fn test_replace() {
    let result = apply(
        "class Bad : ISelfRequest<T> { }",
        vec![TextEdit::replace(Span::new(25, 26), "TSelf")],
    );
    assert_eq!(result.as_deref(), Ok("class Bad : ISelfRequest<TSelf> { }"));
}

#[test]
fn test_using_and_attribute_insertions() {
    let result = apply(
        "class Bad<T> : ISelf<T> { }",
        vec![
            TextEdit::insert(0, "using Self;\n"),
            TextEdit::insert(10, "[TSelf] "),
        ],
    );
    assert_eq!(
        result.as_deref(),
        Ok("using Self;\nclass Bad<[TSelf] T> : ISelf<T> { }")
    );
}

#[test]
fn test_inserts_at_same_offset_keep_push_order() {
    let result = apply(
        "code",
        vec![TextEdit::insert(0, "// first\n"), TextEdit::insert(0, "// second\n")],
    );
    assert_eq!(result.as_deref(), Ok("// first\n// second\ncode"));
}

#[test]
fn test_rename_of_every_reference() {
    // Edits pushed out of order still land at their own offsets.
    let source = "class P<T> { T a; T b; }";
    let result = apply(
        source,
        vec![
            TextEdit::replace(Span::new(18, 19), "TSelf"),
            TextEdit::replace(Span::new(8, 9), "TSelf"),
            TextEdit::replace(Span::new(13, 14), "TSelf"),
        ],
    );
    assert_eq!(
        result.as_deref(),
        Ok("class P<TSelf> { TSelf a; TSelf b; }")
    );
}

#[test]
fn test_overlap_rejects_whole_edit() {
    let edits = vec![
        TextEdit::replace(Span::new(5, 15), "aaa"),
        TextEdit::replace(Span::new(10, 20), "bbb"),
    ];
    let err = apply("hello world testing", edits.clone()).unwrap_err();
    assert_eq!(
        err,
        EditConflict {
            edit1: edits[0].clone(),
            edit2: edits[1].clone(),
        }
    );
}

#[test]
fn test_overlap_rules() {
    let replace = TextEdit::replace(Span::new(5, 10), "x");
    assert!(!replace.overlaps(&TextEdit::replace(Span::new(10, 12), "y")));
    assert!(!replace.overlaps(&TextEdit::insert(5, "y")));
    assert!(!replace.overlaps(&TextEdit::insert(10, "y")));
    assert!(replace.overlaps(&TextEdit::insert(7, "y")));
    assert!(!TextEdit::insert(3, "a").overlaps(&TextEdit::insert(3, "b")));
}

#[test]
fn test_out_of_bounds_is_clamped() {
    let result = apply("short", vec![TextEdit::replace(Span::new(100, 200), "tail")]);
    assert_eq!(result.as_deref(), Ok("shorttail"));
}

#[test]
fn test_workspace_edit_groups_by_file() {
    let a = FileId::new(0);
    let b = FileId::new(1);
    let mut edit = WorkspaceEdit::new();
    assert!(edit.is_empty());

    edit.push(b, TextEdit::replace(Span::new(0, 1), "TSelf"));
    edit.push(a, TextEdit::replace(Span::new(4, 5), "TSelf"));
    edit.push(b, TextEdit::replace(Span::new(6, 7), "TSelf"));

    assert_eq!(edit.files().collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(edit.edits_for(b).len(), 2);
    assert_eq!(edit.edit_count(), 3);
    assert_eq!(edit.apply_to(a, "var T;"), Ok("var TSelf;".to_string()));
    assert!(edit.edits_for(FileId::new(9)).is_empty());
    assert_eq!(edit.apply_to(FileId::new(9), "same"), Ok("same".to_string()));
}
