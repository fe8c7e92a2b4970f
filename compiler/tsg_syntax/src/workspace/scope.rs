//! Name lookup from inside a type declaration.
//!
//! Lookup order for a simple name:
//! 1. type parameters of the declaration and its containing types
//! 2. types nested in the declaration and its containing types
//! 3. each enclosing namespace from the innermost out, followed by the
//!    `using` directives declared at that level
//!
//! Two different types brought in by `using` directives at the same level
//! make the name ambiguous, which resolves to an error type.

use smallvec::SmallVec;
use tsg_ir::ast::{NameSegment, TypeDecl, TypeExpr, TypeExprKind, UsingDirective, UsingKind};
use tsg_ir::sema::TypeRef;
use tsg_ir::TypeId;

use super::binder::{Container, SymbolTable};
use super::Document;

struct Level<'a> {
    namespace: String,
    usings: Vec<&'a UsingDirective>,
}

pub(crate) struct Scope<'a> {
    table: &'a SymbolTable,
    /// The declaration and its containing types, innermost first.
    types: SmallVec<[TypeId; 2]>,
    /// Namespace levels, innermost first. The last level is the global
    /// namespace.
    levels: Vec<Level<'a>>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        table: &'a SymbolTable,
        doc: &'a Document,
        decl: &TypeDecl,
        owner: TypeId,
    ) -> Self {
        let mut types = SmallVec::new();
        let mut current = Some(owner);
        while let Some(id) = current {
            types.push(id);
            current = table.type_symbol(id).and_then(|symbol| symbol.containing_type);
        }

        let mut global_usings: Vec<&UsingDirective> = doc.tree.root.usings.iter().collect();
        global_usings.extend(
            table
                .global_usings()
                .iter()
                .filter(|(file, _)| *file != doc.id)
                .map(|(_, using)| using),
        );
        let mut levels = vec![Level {
            namespace: String::new(),
            usings: global_usings,
        }];

        let mut namespace = String::new();
        for ns in doc.tree.enclosing_namespaces(decl.span) {
            let parts: Vec<&str> = ns.name.split('.').collect();
            for (i, part) in parts.iter().enumerate() {
                if !namespace.is_empty() {
                    namespace.push('.');
                }
                namespace.push_str(part);
                // Usings of a dotted declaration apply to its innermost level.
                let usings = if i + 1 == parts.len() {
                    ns.usings.iter().collect()
                } else {
                    Vec::new()
                };
                levels.push(Level {
                    namespace: namespace.clone(),
                    usings,
                });
            }
        }
        levels.reverse();

        Scope {
            table,
            types,
            levels,
        }
    }

    /// Resolve a type expression appearing in this scope.
    pub(crate) fn resolve(&self, expr: &TypeExpr) -> TypeRef {
        match &expr.kind {
            TypeExprKind::Predefined(keyword) => self
                .table
                .predefined(keyword)
                .map_or(TypeRef::Error, |def| TypeRef::Named {
                    def,
                    args: Vec::new(),
                }),
            TypeExprKind::Path { global, segments } => self.resolve_path(*global, segments),
            TypeExprKind::Array(_) | TypeExprKind::Nullable(_) | TypeExprKind::Tuple(_) => {
                TypeRef::Error
            }
        }
    }

    /// Resolve an attribute name, trying the `Attribute` suffix first.
    pub(crate) fn resolve_attribute(&self, expr: &TypeExpr) -> Option<TypeId> {
        let TypeExprKind::Path { global, segments } = &expr.kind else {
            return None;
        };
        let (last, prefix) = segments.split_last()?;
        if !last.name.ends_with("Attribute") {
            let mut suffixed: Vec<NameSegment> = prefix.to_vec();
            suffixed.push(NameSegment {
                name: format!("{}Attribute", last.name),
                ..last.clone()
            });
            if let Some(found) = self.lookup(*global, &suffixed) {
                return Some(found);
            }
        }
        self.lookup(*global, segments)
    }

    fn resolve_path(&self, global: bool, segments: &[NameSegment]) -> TypeRef {
        if let [only] = segments {
            if !global && only.args.is_empty() {
                if let Some(param) = self.type_param(&only.name) {
                    return TypeRef::Param(param);
                }
            }
        }
        let Some(def) = self.lookup(global, segments) else {
            return TypeRef::Error;
        };
        let args = segments
            .last()
            .map(|segment| segment.args.iter().map(|arg| self.resolve(arg)).collect())
            .unwrap_or_default();
        TypeRef::Named { def, args }
    }

    fn type_param(&self, name: &str) -> Option<tsg_ir::TypeParamId> {
        self.types.iter().find_map(|&id| {
            let symbol = self.table.type_symbol(id)?;
            symbol.type_params.iter().copied().find(|&param| {
                self.table
                    .type_param(param)
                    .is_some_and(|param| param.name == name)
            })
        })
    }

    /// The definition a (possibly qualified) name refers to.
    fn lookup(&self, global: bool, segments: &[NameSegment]) -> Option<TypeId> {
        let (first, rest) = segments.split_first()?;
        if global {
            return self.lookup_in_namespace("", segments);
        }
        if rest.is_empty() {
            return self.lookup_simple(&first.name, first.args.len());
        }
        if let Some(outer) = self.lookup_simple(&first.name, first.args.len()) {
            return self.descend(outer, rest);
        }
        if let Some(found) = self.lookup_alias_qualified(first, rest) {
            return Some(found);
        }
        self.levels
            .iter()
            .find_map(|level| self.lookup_in_namespace(&level.namespace, segments))
    }

    fn lookup_simple(&self, name: &str, arity: usize) -> Option<TypeId> {
        if let Some(nested) = self
            .types
            .iter()
            .find_map(|&id| self.table.member(Container::Type(id), name, arity))
        {
            return Some(nested);
        }

        for level in &self.levels {
            let container = Container::Namespace(level.namespace.clone());
            if let Some(found) = self.table.member(container, name, arity) {
                return Some(found);
            }
            if arity == 0 {
                if let Some(found) = level
                    .usings
                    .iter()
                    .find(|using| using.kind == UsingKind::Alias && using.alias.as_deref() == Some(name))
                    .and_then(|using| self.lookup_dotted(&using.target))
                {
                    return Some(found);
                }
            }

            let mut candidates: SmallVec<[TypeId; 2]> = SmallVec::new();
            for using in &level.usings {
                let found = match using.kind {
                    UsingKind::Namespace => self.table.member(
                        Container::Namespace(using.target.clone()),
                        name,
                        arity,
                    ),
                    UsingKind::Static => self
                        .lookup_dotted(&using.target)
                        .and_then(|owner| self.table.member(Container::Type(owner), name, arity)),
                    UsingKind::Alias => None,
                };
                if let Some(found) = found {
                    if !candidates.contains(&found) {
                        candidates.push(found);
                    }
                }
            }
            match candidates.as_slice() {
                [] => {}
                [only] => return Some(*only),
                _ => {
                    tracing::trace!(name, "ambiguous reference between using directives");
                    return None;
                }
            }
        }
        None
    }

    /// `Alias.Rest` where `Alias` names a namespace or a type.
    fn lookup_alias_qualified(&self, first: &NameSegment, rest: &[NameSegment]) -> Option<TypeId> {
        if !first.args.is_empty() {
            return None;
        }
        let target = self.levels.iter().find_map(|level| {
            level.usings.iter().find(|using| {
                using.kind == UsingKind::Alias && using.alias.as_deref() == Some(&first.name)
            })
        })?;
        if self.table.is_namespace(&target.target) {
            return self.lookup_in_namespace(&target.target, rest);
        }
        let owner = self.lookup_dotted(&target.target)?;
        self.descend(owner, rest)
    }

    /// Resolve a dotted name relative to `base`: some leading segments name
    /// namespaces, the next names a type, the remainder nested types.
    fn lookup_in_namespace(&self, base: &str, segments: &[NameSegment]) -> Option<TypeId> {
        let mut namespace = base.to_string();
        for (i, segment) in segments.iter().enumerate() {
            let container = Container::Namespace(namespace.clone());
            if let Some(found) = self.table.member(container, &segment.name, segment.args.len()) {
                return self.descend(found, &segments[i + 1..]);
            }
            if !namespace.is_empty() {
                namespace.push('.');
            }
            namespace.push_str(&segment.name);
            if !self.table.is_namespace(&namespace) {
                return None;
            }
        }
        None
    }

    /// A non-generic dotted name from the global namespace, as written in
    /// `using` directives.
    fn lookup_dotted(&self, dotted: &str) -> Option<TypeId> {
        let segments: Vec<NameSegment> = dotted
            .split('.')
            .map(|name| NameSegment {
                name: name.trim().to_string(),
                span: tsg_ir::Span::DUMMY,
                args: Vec::new(),
                arg_list_span: None,
            })
            .collect();
        self.lookup_in_namespace("", &segments)
    }

    fn descend(&self, mut current: TypeId, rest: &[NameSegment]) -> Option<TypeId> {
        for segment in rest {
            current = self.table.member(
                Container::Type(current),
                &segment.name,
                segment.args.len(),
            )?;
        }
        Some(current)
    }
}
