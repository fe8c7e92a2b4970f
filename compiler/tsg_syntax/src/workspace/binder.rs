//! Declaration pass: assigns symbols to every type declaration.
//!
//! Types are keyed by container, name and arity, so the parts of a partial
//! type merge into one symbol while `Foo` and `Foo<T>` stay distinct.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tsg_ir::ast::{Member, TypeDecl, TypeKind, UsingDirective};
use tsg_ir::sema::{TypeParamSymbol, TypeSymbol};
use tsg_ir::{FileId, Location, Span, TypeId, TypeParamId};

use super::scope::Scope;
use super::Document;

/// Where a type is declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Container {
    Namespace(String),
    Type(TypeId),
}

/// Keyword types and the `System` structs they alias.
const PREDEFINED: &[(&str, &str)] = &[
    ("bool", "Boolean"),
    ("byte", "Byte"),
    ("sbyte", "SByte"),
    ("char", "Char"),
    ("short", "Int16"),
    ("ushort", "UInt16"),
    ("int", "Int32"),
    ("uint", "UInt32"),
    ("long", "Int64"),
    ("ulong", "UInt64"),
    ("nint", "IntPtr"),
    ("nuint", "UIntPtr"),
    ("float", "Single"),
    ("double", "Double"),
    ("decimal", "Decimal"),
    ("string", "String"),
    ("object", "Object"),
];

#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
    types: Vec<TypeSymbol>,
    full_names: Vec<String>,
    params: Vec<TypeParamSymbol>,
    members: FxHashMap<(Container, String, usize), TypeId>,
    namespaces: FxHashSet<String>,
    /// Declaring part, keyed by the name token of the declaration.
    decls: FxHashMap<(FileId, Span), TypeId>,
    param_decls: FxHashMap<(FileId, Span), TypeParamId>,
    predefined: FxHashMap<&'static str, TypeId>,
    /// `global using` directives of every document.
    global_usings: Vec<(FileId, UsingDirective)>,
}

impl SymbolTable {
    pub(crate) fn bind(documents: &[Document]) -> Self {
        let mut table = Self::default();
        table.namespaces.insert(String::new());
        table.declare_predefined();

        for doc in documents {
            table.declare_members(doc.id, &doc.tree.root.members, "");
            table.global_usings.extend(
                doc.tree
                    .root
                    .usings
                    .iter()
                    .filter(|using| using.is_global)
                    .map(|using| (doc.id, using.clone())),
            );
        }

        let attributes = table.resolve_attributes(documents);
        for (param, attribute) in attributes {
            if let Some(symbol) = table.params.get_mut(param.index()) {
                if !symbol.attributes.contains(&attribute) {
                    symbol.attributes.push(attribute);
                }
            }
        }

        tracing::debug!(
            types = table.types.len(),
            type_params = table.params.len(),
            namespaces = table.namespaces.len(),
            "bound workspace"
        );
        table
    }

    fn declare_predefined(&mut self) {
        self.namespaces.insert("System".to_string());
        for &(keyword, name) in PREDEFINED {
            let kind = if matches!(name, "String" | "Object") {
                TypeKind::Class
            } else {
                TypeKind::Struct
            };
            let Some(id) = TypeId::from_index(self.types.len()) else {
                return;
            };
            self.types.push(TypeSymbol {
                id,
                kind,
                name: name.to_string(),
                namespace: "System".to_string(),
                containing_type: None,
                type_params: Vec::new(),
                locations: Vec::new(),
            });
            self.full_names.push(format!("System.{name}"));
            self.members.insert(
                (Container::Namespace("System".to_string()), name.to_string(), 0),
                id,
            );
            self.predefined.insert(keyword, id);
        }
    }

    fn declare_members(&mut self, file: FileId, members: &[Member], namespace: &str) {
        for member in members {
            match member {
                Member::Namespace(ns) => {
                    let full = join(namespace, &ns.name);
                    self.declare_namespace(&full);
                    self.declare_members(file, &ns.members, &full);
                }
                Member::Type(decl) => {
                    let container = Container::Namespace(namespace.to_string());
                    self.declare_type(file, decl, container, namespace, None);
                }
            }
        }
    }

    /// Register `name` and every dotted prefix of it.
    fn declare_namespace(&mut self, name: &str) {
        let mut end = 0;
        for part in name.split('.') {
            end += part.len();
            self.namespaces.insert(name[..end].to_string());
            end += 1;
        }
    }

    fn declare_type(
        &mut self,
        file: FileId,
        decl: &TypeDecl,
        container: Container,
        namespace: &str,
        containing_type: Option<TypeId>,
    ) {
        let location = Location::new(file, decl.name_span);
        let key = (container, decl.name.clone(), decl.arity());
        let id = if let Some(&existing) = self.members.get(&key) {
            if let Some(symbol) = self.types.get_mut(existing.index()) {
                symbol.locations.push(location);
            }
            existing
        } else {
            let Some(id) = TypeId::from_index(self.types.len()) else {
                return;
            };
            let full_name = match containing_type.and_then(|outer| self.full_name(outer)) {
                Some(prefix) => format!("{prefix}.{}", decl.name),
                None => join(namespace, &decl.name),
            };
            let mut type_params = Vec::with_capacity(decl.arity());
            for (ordinal, param) in decl.type_params.iter().enumerate() {
                let Some(pid) = TypeParamId::from_index(self.params.len()) else {
                    break;
                };
                self.params.push(TypeParamSymbol {
                    id: pid,
                    owner: id,
                    ordinal,
                    name: param.name.clone(),
                    attributes: SmallVec::new(),
                    locations: Vec::new(),
                });
                type_params.push(pid);
            }
            self.types.push(TypeSymbol {
                id,
                kind: decl.kind,
                name: decl.name.clone(),
                namespace: namespace.to_string(),
                containing_type,
                type_params,
                locations: vec![location],
            });
            self.full_names.push(full_name);
            self.members.insert(key, id);
            id
        };

        self.decls.insert((file, decl.name_span), id);
        let formals = self
            .types
            .get(id.index())
            .map(|symbol| symbol.type_params.clone())
            .unwrap_or_default();
        for (param, pid) in decl.type_params.iter().zip(formals) {
            if let Some(symbol) = self.params.get_mut(pid.index()) {
                symbol.locations.push(Location::new(file, param.name_span));
            }
            self.param_decls.insert((file, param.name_span), pid);
        }

        for nested in &decl.nested {
            self.declare_type(file, nested, Container::Type(id), namespace, Some(id));
        }
    }

    /// Resolve the attribute lists on every type parameter declaration.
    fn resolve_attributes(&self, documents: &[Document]) -> Vec<(TypeParamId, TypeId)> {
        let mut resolved = Vec::new();
        for doc in documents {
            for decl in doc.tree.type_decls() {
                let Some(owner) = self.declared_type(doc.id, decl.name_span) else {
                    continue;
                };
                let scope = Scope::new(self, doc, decl, owner);
                for param in &decl.type_params {
                    let Some(pid) = self.declared_type_param(doc.id, param.name_span) else {
                        continue;
                    };
                    let found = param
                        .attributes
                        .iter()
                        .flat_map(|list| &list.attributes)
                        .filter_map(|attribute| scope.resolve_attribute(&attribute.name));
                    resolved.extend(found.map(|attribute| (pid, attribute)));
                }
            }
        }
        resolved
    }

    pub(crate) fn declared_type(&self, file: FileId, name_span: Span) -> Option<TypeId> {
        self.decls.get(&(file, name_span)).copied()
    }

    pub(crate) fn declared_type_param(&self, file: FileId, name_span: Span) -> Option<TypeParamId> {
        self.param_decls.get(&(file, name_span)).copied()
    }

    pub(crate) fn type_symbol(&self, id: TypeId) -> Option<&TypeSymbol> {
        self.types.get(id.index())
    }

    pub(crate) fn type_param(&self, id: TypeParamId) -> Option<&TypeParamSymbol> {
        self.params.get(id.index())
    }

    pub(crate) fn full_name(&self, id: TypeId) -> Option<&str> {
        self.full_names.get(id.index()).map(String::as_str)
    }

    pub(crate) fn member(&self, container: Container, name: &str, arity: usize) -> Option<TypeId> {
        self.members.get(&(container, name.to_string(), arity)).copied()
    }

    pub(crate) fn is_namespace(&self, name: &str) -> bool {
        self.namespaces.contains(name)
    }

    pub(crate) fn predefined(&self, keyword: &str) -> Option<TypeId> {
        self.predefined.get(keyword).copied()
    }

    pub(crate) fn global_usings(&self) -> &[(FileId, UsingDirective)] {
        &self.global_usings
    }

    /// A type by fully qualified name, or else by a unique simple name.
    ///
    /// When several arities share a qualified name the non-generic one wins.
    pub(crate) fn type_by_name(&self, name: &str) -> Option<TypeId> {
        let name = name.trim().trim_start_matches("global::");
        if name.is_empty() {
            return None;
        }

        let exact: Vec<&TypeSymbol> = self
            .full_names
            .iter()
            .zip(&self.types)
            .filter(|(full, _)| full.as_str() == name)
            .map(|(_, symbol)| symbol)
            .collect();
        match exact.as_slice() {
            [] => {}
            [only] => return Some(only.id),
            several => {
                return several
                    .iter()
                    .find(|symbol| symbol.type_params.is_empty())
                    .map(|symbol| symbol.id);
            }
        }

        if name.contains('.') {
            return None;
        }
        let mut simple = self.types.iter().filter(|symbol| symbol.name == name);
        match (simple.next(), simple.next()) {
            (Some(only), None) => Some(only.id),
            _ => None,
        }
    }
}

fn join(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}
