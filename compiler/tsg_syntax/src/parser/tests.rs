use pretty_assertions::assert_eq;
use tsg_ir::ast::{Member, TypeDecl, TypeExprKind, TypeKind, UsingKind, Variance};
use tsg_ir::{FileId, Span};

use super::*;

fn parse_ok(source: &str) -> SyntaxTree {
    let output = parse(FileId::new(0), source);
    assert_eq!(output.errors, vec![], "unexpected parse errors");
    output.tree
}

fn decl<'a>(tree: &'a SyntaxTree, name: &str) -> &'a TypeDecl {
    tree.type_decls()
        .into_iter()
        .find(|d| d.name == name)
        .unwrap()
}

fn slice(source: &str, span: Span) -> &str {
    &source[span.to_range()]
}

#[test]
fn test_generic_class_with_base_list() {
    let source = "public class Bad<T> : ISelfRequested<T>, IOther { }";
    let tree = parse_ok(source);
    let bad = decl(&tree, "Bad");

    assert_eq!(bad.kind, TypeKind::Class);
    assert_eq!(bad.modifiers, vec!["public".to_string()]);
    assert_eq!(slice(source, bad.name_span), "Bad");
    assert_eq!(bad.type_params.len(), 1);
    assert_eq!(slice(source, bad.type_params[0].name_span), "T");
    assert_eq!(bad.type_param_list_span.map(|s| slice(source, s)), Some("<T>"));
    assert_eq!(bad.base_list.len(), 2);
    assert!(bad.base_list[0].is_generic());
    assert!(!bad.base_list[1].is_generic());
    assert_eq!(slice(source, bad.base_list[0].type_args()[0].span), "T");
    assert_eq!(bad.span, Span::new(0, source.len() as u32));
}

#[test]
fn test_type_param_attributes_and_variance() {
    let source = "interface I<[TSelf] out T, in [A][B] U> { }";
    // Attributes must precede the variance keyword
    let output = parse(FileId::new(0), source);
    assert!(!output.errors.is_empty());

    let source = "interface I<[TSelf] out T, [A, B(1)] in U> { }";
    let tree = parse_ok(source);
    let i = decl(&tree, "I");
    let t = &i.type_params[0];
    assert_eq!(t.attributes.len(), 1);
    assert_eq!(t.variance.map(|(v, _)| v), Some(Variance::Out));
    assert_eq!(slice(source, t.span), "[TSelf] out T");
    assert_eq!(t.attribute_insert_offset(), 20);

    let u = &i.type_params[1];
    assert_eq!(u.attributes[0].attributes.len(), 2);
    assert_eq!(slice(source, u.attributes[0].attributes[1].span), "B(1)");
    assert_eq!(u.variance.map(|(v, _)| v), Some(Variance::In));
}

#[test]
fn test_namespaces_and_usings() {
    let source = "\
global using G;
using System;
using static System.Math;
using Alias = Self.Marker;
namespace Outer.Inner
{
    using Self;
    namespace Deep { class A { } }
}
";
    let tree = parse_ok(source);
    let usings = &tree.root.usings;
    assert_eq!(usings.len(), 4);
    assert!(usings[0].is_global);
    assert_eq!(usings[1].target, "System");
    assert_eq!(usings[2].kind, UsingKind::Static);
    assert_eq!(usings[3].kind, UsingKind::Alias);
    assert_eq!(usings[3].alias.as_deref(), Some("Alias"));
    assert_eq!(usings[3].target, "Self.Marker");

    let Member::Namespace(outer) = &tree.root.members[0] else {
        panic!("expected namespace");
    };
    assert_eq!(outer.name, "Outer.Inner");
    assert!(!outer.file_scoped);
    assert_eq!(outer.usings[0].target, "Self");
    assert_eq!(slice(source, Span::new(outer.body_start - 1, outer.body_start)), "{");

    let a = decl(&tree, "A");
    let chain: Vec<&str> = tree
        .enclosing_namespaces(a.span)
        .iter()
        .map(|ns| ns.name.as_str())
        .collect();
    assert_eq!(chain, vec!["Outer.Inner", "Deep"]);
}

#[test]
fn test_file_scoped_namespace() {
    let source = "namespace App;\n\nusing Self;\n\npublic class A { }\npublic class B { }\n";
    let tree = parse_ok(source);
    let Member::Namespace(ns) = &tree.root.members[0] else {
        panic!("expected namespace");
    };
    assert!(ns.file_scoped);
    assert_eq!(ns.usings.len(), 1);
    assert_eq!(ns.members.len(), 2);
    assert_eq!(ns.body_start, 14);
}

#[test]
fn test_records_and_structs() {
    let source = "\
public record Person(string Name) : Base<Person>(Name);
public record struct Point(int X, int Y);
public readonly struct S<T> : IEquatable<S<T>> { }
record class C;
";
    let tree = parse_ok(source);
    assert_eq!(decl(&tree, "Person").kind, TypeKind::Record);
    assert_eq!(decl(&tree, "Person").base_list.len(), 1);
    assert_eq!(decl(&tree, "Point").kind, TypeKind::RecordStruct);
    assert_eq!(decl(&tree, "C").kind, TypeKind::Record);

    let s = decl(&tree, "S");
    assert_eq!(s.kind, TypeKind::Struct);
    assert_eq!(s.modifiers, vec!["public".to_string(), "readonly".to_string()]);
    let arg = &s.base_list[0].type_args()[0];
    assert_eq!(slice(source, arg.span), "S<T>");
}

#[test]
fn test_member_bodies_are_skipped_and_nested_types_kept() {
    let source = r#"
public partial class Outer<T> where T : class, new()
{
    private readonly Dictionary<string, T> _map = new() { };
    public int Count { get; set; } = 0;
    public T Get(string key) { if (_map.TryGetValue(key, out var v)) { return v; } return default; }
    public event EventHandler Changed;
    public enum Kind { A, B }
    public delegate void D<U>(U u);
    [Obsolete("no")] protected class Inner<U> : IBase<U> { void M() => Console.WriteLine("}"); }
    public string Text => $"{Count}";
}
"#;
    let tree = parse_ok(source);
    let outer = decl(&tree, "Outer");
    assert!(outer.is_partial());
    assert_eq!(outer.nested.len(), 1);
    assert_eq!(outer.nested[0].name, "Inner");
    assert_eq!(outer.nested[0].attributes.len(), 1);

    // Identifiers of the outer body, not of Inner
    let t_refs = outer.idents.iter().filter(|i| i.name == "T").count();
    assert_eq!(t_refs, 4);
    assert!(outer.idents.iter().all(|i| i.name != "U"));
    assert!(outer.nested[0].idents.iter().any(|i| i.name == "U"));
}

#[test]
fn test_qualified_and_special_types() {
    let source = "class A : global::Self.ISelf<A>, Alias::IFoo<(int a, string b), int?[], List<int>.Enumerator> { }";
    let tree = parse_ok(source);
    let a = decl(&tree, "A");

    let TypeExprKind::Path { global, segments } = &a.base_list[0].kind else {
        panic!("expected path");
    };
    assert!(*global);
    assert_eq!(segments.len(), 2);
    assert_eq!(a.base_list[0].dotted_name().as_deref(), Some("Self.ISelf"));

    let args = a.base_list[1].type_args();
    assert_eq!(args.len(), 3);
    assert!(matches!(args[0].kind, TypeExprKind::Tuple(_)));
    assert!(matches!(args[1].kind, TypeExprKind::Array(_)));
    assert_eq!(slice(source, args[2].span), "List<int>.Enumerator");
}

#[test]
fn test_error_recovery_keeps_later_declarations() {
    let source = "class { int x; }\nclass Good : IFoo<Good> { }\n";
    let output = parse(FileId::new(0), source);
    assert_eq!(output.errors.len(), 1);
    assert!(matches!(
        output.errors[0],
        ParseError::Expected { expected: "a type name", .. }
    ));
    let names: Vec<_> = output.tree.type_decls().iter().map(|d| d.name.clone()).collect();
    assert_eq!(names, vec!["Good".to_string()]);
}

#[test]
fn test_unclosed_body_is_reported() {
    let source = "class A<T> : IFoo<T> {\n    void M() { }\n";
    let output = parse(FileId::new(0), source);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.tree.type_decls().len(), 1);
}

#[test]
fn test_assembly_attributes_and_enums_are_ignored() {
    let source = "[assembly: InternalsVisibleTo(\"Tests\")]\nenum E : byte { A = 1 }\nclass A { }";
    let tree = parse_ok(source);
    assert_eq!(tree.type_decls().len(), 1);
}
