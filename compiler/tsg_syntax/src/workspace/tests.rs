use pretty_assertions::assert_eq;
use tsg_ir::host::{ConfigLookup, DocumentStore, SemanticModel};
use tsg_ir::sema::TypeRef;

use super::*;

const LIBRARY: &str = r"
namespace Self
{
    public interface ISelf<TSelf> where TSelf : ISelf<TSelf> { }

    public interface IPair<TSelf, TOther> { }

    [System.AttributeUsage(System.AttributeTargets.GenericParameter)]
    public sealed class TSelfAttribute : System.Attribute { }
}
";

fn workspace(sources: &[&str]) -> Workspace {
    let mut builder = Workspace::builder();
    for (i, text) in sources.iter().enumerate() {
        builder.add_document(format!("File{i}.cs"), *text);
    }
    builder.build()
}

fn decl<'a>(ws: &'a Workspace, file: u32, name: &str) -> &'a TypeDecl {
    let tree = ws.syntax_tree(FileId::new(file)).unwrap();
    tree.type_decls()
        .into_iter()
        .find(|decl| decl.name == name)
        .unwrap()
}

fn resolve_first_base(ws: &Workspace, file: u32, name: &str) -> Option<ConstructedType> {
    let decl = decl(ws, file, name);
    ws.resolve_base_type(FileId::new(file), decl, &decl.base_list[0])
}

#[test]
fn test_documents_are_exposed_in_order() {
    let ws = workspace(&["class A { }", "class B { }"]);
    assert_eq!(ws.document_ids(), vec![FileId::new(0), FileId::new(1)]);
    assert_eq!(ws.source_text(FileId::new(1)), Some("class B { }"));
    assert_eq!(
        ws.document_path(FileId::new(0)),
        Some(Path::new("File0.cs"))
    );
    assert_eq!(ws.find_document(Path::new("File1.cs")), Some(FileId::new(1)));
    assert!(ws.syntax_tree(FileId::new(7)).is_none());
    assert!(ws.parse_errors(FileId::new(0)).is_empty());
}

#[test]
fn test_options_are_per_document() {
    let mut builder = Workspace::builder();
    let options: AnalyzerConfigOptions = [("dotnet_tselfgeneric.tself_param_name", "TMe")]
        .into_iter()
        .collect();
    let a = builder.add_document_with_options("A.cs", "class A { }", options);
    let b = builder.add_document("B.cs", "class B { }");
    let ws = builder.build();

    assert_eq!(
        ws.config_options(a)
            .unwrap()
            .lookup("dotnet_tselfgeneric.tself_param_name"),
        Some("TMe")
    );
    assert!(ws.config_options(b).unwrap().is_empty());
}

#[test]
fn test_resolves_base_through_using() {
    let ws = workspace(&[
        LIBRARY,
        "using Self;\nclass Good<TSelf> : ISelf<TSelf> where TSelf : Good<TSelf> { }",
    ]);
    let constructed = resolve_first_base(&ws, 1, "Good").unwrap();
    let iself = ws.type_by_name("Self.ISelf").unwrap();
    assert_eq!(constructed.def, iself);
    assert_eq!(constructed.formals.len(), 1);

    let good = ws.declared_type(FileId::new(1), decl(&ws, 1, "Good")).unwrap();
    let symbol = ws.type_symbol(good).unwrap();
    assert_eq!(constructed.args, vec![TypeRef::Param(symbol.type_params[0])]);
}

#[test]
fn test_resolves_self_type_argument() {
    let ws = workspace(&[LIBRARY, "namespace Self { class Good : ISelf<Good> { } }"]);
    let constructed = resolve_first_base(&ws, 1, "Good").unwrap();
    let good = ws.declared_type(FileId::new(1), decl(&ws, 1, "Good")).unwrap();
    assert_eq!(constructed.args, vec![ws.type_symbol(good).unwrap().self_type()]);
}

#[test]
fn test_resolves_qualified_and_global_names() {
    let ws = workspace(&[
        LIBRARY,
        "class A : Self.ISelf<A> { }\nclass B : global::Self.ISelf<B> { }",
    ]);
    let iself = ws.type_by_name("Self.ISelf");
    assert_eq!(resolve_first_base(&ws, 1, "A").map(|c| c.def), iself);
    assert_eq!(resolve_first_base(&ws, 1, "B").map(|c| c.def), iself);
}

#[test]
fn test_resolves_alias() {
    let ws = workspace(&[
        LIBRARY,
        "using S = Self;\nclass A : S.ISelf<A> { }\nclass B : S::ISelf<B> { }",
    ]);
    let iself = ws.type_by_name("Self.ISelf");
    assert_eq!(resolve_first_base(&ws, 1, "A").map(|c| c.def), iself);
    assert_eq!(resolve_first_base(&ws, 1, "B").map(|c| c.def), iself);
}

#[test]
fn test_global_using_from_other_file() {
    let ws = workspace(&[
        LIBRARY,
        "global using Self;",
        "class Good<TSelf> : ISelf<TSelf> { }",
    ]);
    assert!(resolve_first_base(&ws, 2, "Good").is_some());
}

#[test]
fn test_outer_namespace_is_visible() {
    let ws = workspace(&[LIBRARY, "namespace Self.Inner { class A : ISelf<A> { } }"]);
    assert!(resolve_first_base(&ws, 1, "A").is_some());
}

#[test]
fn test_unresolved_base_is_none() {
    let ws = workspace(&["class A : IMissing<A> { }"]);
    assert_eq!(resolve_first_base(&ws, 0, "A"), None);
}

#[test]
fn test_non_generic_base_is_none() {
    let ws = workspace(&["class Base { }\nclass A : Base { }"]);
    assert_eq!(resolve_first_base(&ws, 0, "A"), None);
}

#[test]
fn test_unresolved_argument_is_error() {
    let ws = workspace(&[LIBRARY, "using Self;\nclass A : ISelf<Missing> { }"]);
    let constructed = resolve_first_base(&ws, 1, "A").unwrap();
    assert_eq!(constructed.args, vec![TypeRef::Error]);
}

#[test]
fn test_predefined_argument_is_named() {
    let ws = workspace(&[LIBRARY, "using Self;\nclass A : ISelf<int> { }"]);
    let constructed = resolve_first_base(&ws, 1, "A").unwrap();
    let int32 = ws.type_by_name("System.Int32").unwrap();
    assert_eq!(
        constructed.args,
        vec![TypeRef::Named {
            def: int32,
            args: Vec::new()
        }]
    );
}

#[test]
fn test_ambiguous_usings_resolve_to_nothing() {
    let ws = workspace(&[
        "namespace A { interface I<T> { } }\nnamespace B { interface I<T> { } }",
        "using A;\nusing B;\nclass C : I<C> { }",
    ]);
    assert_eq!(resolve_first_base(&ws, 1, "C"), None);
}

#[test]
fn test_partial_parts_share_one_symbol() {
    let ws = workspace(&[
        "partial class P<T> { }",
        "partial class P<T> : System.IComparable<T> { }",
    ]);
    let first = ws.declared_type(FileId::new(0), decl(&ws, 0, "P")).unwrap();
    let second = ws.declared_type(FileId::new(1), decl(&ws, 1, "P")).unwrap();
    assert_eq!(first, second);

    let symbol = ws.type_symbol(first).unwrap();
    assert_eq!(symbol.locations.len(), 2);
    let param = ws.type_param(symbol.type_params[0]).unwrap();
    assert_eq!(param.locations.len(), 2);
    assert_eq!(param.ordinal, 0);

    let p1 = &decl(&ws, 1, "P").type_params[0];
    assert_eq!(
        ws.declared_type_param(FileId::new(1), p1.name_span),
        Some(param.id)
    );
}

#[test]
fn test_arity_distinguishes_types() {
    let ws = workspace(&["class Box { }\nclass Box<T> { }"]);
    let tree = ws.syntax_tree(FileId::new(0)).unwrap();
    let decls = tree.type_decls();
    let plain = ws.declared_type(FileId::new(0), decls[0]).unwrap();
    let generic = ws.declared_type(FileId::new(0), decls[1]).unwrap();
    assert_ne!(plain, generic);
    assert_eq!(ws.type_by_name("Box"), Some(plain));
}

#[test]
fn test_nested_types_and_qualified_names() {
    let ws = workspace(&[
        "namespace N { class Outer<T> { class Inner : System.IEquatable<Inner> { } } }",
    ]);
    let inner = ws.declared_type(FileId::new(0), decl(&ws, 0, "Inner")).unwrap();
    assert_eq!(ws.qualified_name(inner), Some("N.Outer.Inner"));
    assert_eq!(ws.type_by_name("N.Outer.Inner"), Some(inner));
    assert_eq!(ws.type_by_name("Inner"), Some(inner));
}

#[test]
fn test_type_by_name_requires_unique_simple_name() {
    let ws = workspace(&["namespace A { class X { } }\nnamespace B { class X { } }"]);
    assert_eq!(ws.type_by_name("X"), None);
    assert!(ws.type_by_name("A.X").is_some());
    assert_eq!(ws.type_by_name("A.Y"), None);
    assert_eq!(ws.type_by_name(""), None);
    // Memoized answers stay stable.
    assert_eq!(ws.type_by_name("X"), None);
    assert!(ws.type_by_name("B.X").is_some());
}

#[test]
fn test_attributes_resolve_with_suffix() {
    let ws = workspace(&[
        LIBRARY,
        "using Self;\nclass A<[TSelf] T, [TSelfAttribute] U, [Missing] V> { }",
    ]);
    let attribute = ws.type_by_name("Self.TSelfAttribute").unwrap();
    let a = ws.declared_type(FileId::new(1), decl(&ws, 1, "A")).unwrap();
    let params: Vec<_> = ws
        .type_symbol(a)
        .unwrap()
        .type_params
        .iter()
        .map(|&id| ws.type_param(id).unwrap().attributes.to_vec())
        .collect();
    assert_eq!(params, vec![vec![attribute], vec![attribute], vec![]]);
}

#[test]
fn test_with_edit_rebuilds() {
    let ws = workspace(&["class A<T> { }"]);
    let edit = WorkspaceEdit::single(
        FileId::new(0),
        vec![tsg_ir::TextEdit::replace(Span::new(8, 9), "TSelf")],
    );
    let next = ws.with_edit(&edit).unwrap();
    assert_eq!(next.source_text(FileId::new(0)), Some("class A<TSelf> { }"));
    assert_eq!(decl(&next, 0, "A").type_params[0].name, "TSelf");
}
