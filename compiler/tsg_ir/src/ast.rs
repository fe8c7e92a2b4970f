//! Declaration-level syntax tree.
//!
//! Only the parts of a source file the rule and the fixes look at are
//! modeled: namespaces, using directives, type declarations with their
//! type parameters, attribute lists and base lists. Member bodies are kept
//! as identifier references so the host can implement rename.

use smallvec::SmallVec;

use crate::{FileId, Span};

/// A parsed document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxTree {
    pub file: FileId,
    pub root: CompilationUnit,
}

impl SyntaxTree {
    /// All type declarations in the document, outer declarations first.
    pub fn type_decls(&self) -> Vec<&TypeDecl> {
        let mut out = Vec::new();
        collect_members(&self.root.members, &mut out);
        out
    }

    /// Find the type parameter whose name token covers exactly `span`.
    pub fn find_type_param(&self, span: Span) -> Option<(&TypeDecl, &TypeParam)> {
        self.type_decls().into_iter().find_map(|decl| {
            decl.type_params
                .iter()
                .find(|param| param.name_span == span)
                .map(|param| (decl, param))
        })
    }

    /// Find the innermost type declaration whose span contains `span`.
    pub fn enclosing_type_decl(&self, span: Span) -> Option<&TypeDecl> {
        self.type_decls()
            .into_iter()
            .filter(|decl| decl.span.contains_span(span))
            .min_by_key(|decl| decl.span.len())
    }

    /// The chain of namespaces enclosing `span`, outermost first.
    pub fn enclosing_namespaces(&self, span: Span) -> Vec<&NamespaceDecl> {
        let mut chain = Vec::new();
        let mut members = &self.root.members;
        'descend: loop {
            for member in members {
                if let Member::Namespace(ns) = member {
                    if ns.span.contains_span(span) {
                        chain.push(ns);
                        members = &ns.members;
                        continue 'descend;
                    }
                }
            }
            break;
        }
        chain
    }
}

fn collect_members<'a>(members: &'a [Member], out: &mut Vec<&'a TypeDecl>) {
    for member in members {
        match member {
            Member::Namespace(ns) => collect_members(&ns.members, out),
            Member::Type(decl) => collect_type(decl, out),
        }
    }
}

fn collect_type<'a>(decl: &'a TypeDecl, out: &mut Vec<&'a TypeDecl>) {
    out.push(decl);
    for nested in &decl.nested {
        collect_type(nested, out);
    }
}

/// Top level of a document.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompilationUnit {
    pub usings: Vec<UsingDirective>,
    pub members: Vec<Member>,
}

/// A namespace-level member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

/// `namespace A.B { ... }` or the file-scoped `namespace A.B;`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// Dotted name as written.
    pub name: String,
    pub name_span: Span,
    pub file_scoped: bool,
    pub usings: Vec<UsingDirective>,
    pub members: Vec<Member>,
    /// Whole declaration, through the closing brace (or end of file when
    /// file-scoped).
    pub span: Span,
    /// Offset just after the opening brace or the `;` of a file-scoped
    /// declaration.
    pub body_start: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UsingKind {
    /// `using A.B;`
    Namespace,
    /// `using static A.B;`
    Static,
    /// `using X = A.B;`
    Alias,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsingDirective {
    pub kind: UsingKind,
    pub is_global: bool,
    /// Alias name for `UsingKind::Alias`.
    pub alias: Option<String>,
    /// Dotted target as written, without a `global::` qualifier.
    pub target: String,
    pub target_span: Span,
    /// Whole directive including the trailing `;`.
    pub span: Span,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Record => "record",
            TypeKind::RecordStruct => "record struct",
        }
    }
}

/// A class, struct, interface or record declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub attributes: Vec<AttributeList>,
    pub modifiers: Vec<String>,
    pub name: String,
    pub name_span: Span,
    pub type_params: Vec<TypeParam>,
    /// Span of `<...>` when the declaration is generic.
    pub type_param_list_span: Option<Span>,
    pub base_list: Vec<TypeExpr>,
    pub nested: Vec<TypeDecl>,
    /// Identifier tokens owned by this declaration (header, constraints,
    /// member bodies), excluding those of nested type declarations.
    pub idents: Vec<Ident>,
    pub span: Span,
}

impl TypeDecl {
    #[inline]
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    pub fn is_partial(&self) -> bool {
        self.modifiers.iter().any(|m| m == "partial")
    }

    /// Source form of the declared type as used from inside its own body,
    /// e.g. `Node<TKey, TValue>`.
    pub fn self_type_text(&self) -> String {
        if self.type_params.is_empty() {
            return self.name.clone();
        }
        let params: Vec<&str> = self.type_params.iter().map(|p| p.name.as_str()).collect();
        format!("{}<{}>", self.name, params.join(", "))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variance {
    In,
    Out,
}

/// A declared generic parameter, e.g. `[TSelf] out T`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParam {
    pub attributes: Vec<AttributeList>,
    pub variance: Option<(Variance, Span)>,
    pub name: String,
    pub name_span: Span,
    pub span: Span,
}

impl TypeParam {
    /// Where a new attribute list must be inserted: after existing attribute
    /// lists, before the variance keyword.
    pub fn attribute_insert_offset(&self) -> u32 {
        match self.variance {
            Some((_, span)) => span.start,
            None => self.name_span.start,
        }
    }
}

/// `[A, B(1)]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeList {
    /// `assembly:`, `return:` etc. when present.
    pub target: Option<String>,
    pub attributes: SmallVec<[Attribute; 1]>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: TypeExpr,
    pub span: Span,
}

/// An identifier token with its position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// One segment of a possibly qualified name: `List<int>` in `A.List<int>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameSegment {
    pub name: String,
    pub span: Span,
    pub args: Vec<TypeExpr>,
    pub arg_list_span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExprKind {
    /// Simple, generic or qualified name. `global` is set for `global::`.
    Path {
        global: bool,
        segments: Vec<NameSegment>,
    },
    /// Keyword types such as `int` or `string`.
    Predefined(String),
    Array(Box<TypeExpr>),
    Nullable(Box<TypeExpr>),
    Tuple(Vec<TypeExpr>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    /// The rightmost name segment, if this is a path.
    pub fn last_segment(&self) -> Option<&NameSegment> {
        match &self.kind {
            TypeExprKind::Path { segments, .. } => segments.last(),
            _ => None,
        }
    }

    /// Type arguments written on the rightmost segment.
    pub fn type_args(&self) -> &[TypeExpr] {
        self.last_segment().map_or(&[], |seg| seg.args.as_slice())
    }

    /// Whether the rightmost segment carries a type-argument list.
    pub fn is_generic(&self) -> bool {
        self.last_segment()
            .is_some_and(|seg| seg.arg_list_span.is_some())
    }

    /// Dotted name without type arguments, e.g. `System.Collections.List`.
    pub fn dotted_name(&self) -> Option<String> {
        match &self.kind {
            TypeExprKind::Path { segments, .. } => Some(
                segments
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join("."),
            ),
            _ => None,
        }
    }
}
