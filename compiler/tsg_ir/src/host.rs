//! Capability interfaces the host front-end provides.
//!
//! The analyzer and the fixes depend only on these traits. Any front-end
//! that can answer these queries (an embedded compiler, a language server, or
//! the reference host in `tsg_syntax`) can drive the rule.

use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::ast::{SyntaxTree, TypeDecl, TypeExpr};
use crate::sema::{ConstructedType, TypeParamSymbol, TypeSymbol};
use crate::{CancellationToken, Cancelled, FileId, Location, Span, TypeId, TypeParamId, WorkspaceEdit};

/// Per-file key/value analyzer configuration.
///
/// `None` means the key is not present, which is distinct from an empty
/// value.
pub trait ConfigLookup {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> ConfigLookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Resolved analyzer options for one document.
///
/// Keys are case-insensitive; values are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalyzerConfigOptions {
    values: FxHashMap<String, String>,
}

impl AnalyzerConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_ascii_lowercase(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for AnalyzerConfigOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.insert(key.as_ref(), value);
        }
        options
    }
}

impl ConfigLookup for AnalyzerConfigOptions {
    fn lookup(&self, key: &str) -> Option<&str> {
        let key = if key.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(key.to_ascii_lowercase())
        } else {
            Cow::Borrowed(key)
        };
        self.values.get(key.as_ref()).map(String::as_str)
    }
}

/// Access to the documents of the compilation.
pub trait DocumentStore {
    /// All documents, in a stable order.
    fn document_ids(&self) -> Vec<FileId>;

    fn syntax_tree(&self, file: FileId) -> Option<&SyntaxTree>;

    fn source_text(&self, file: FileId) -> Option<&str>;

    fn document_path(&self, file: FileId) -> Option<&Path>;

    /// Analyzer options that apply to `file`.
    fn config_options(&self, file: FileId) -> Option<&AnalyzerConfigOptions>;
}

/// Symbol queries answered by the host's binder.
pub trait SemanticModel {
    /// The symbol declared by `decl` in `file`.
    fn declared_type(&self, file: FileId, decl: &TypeDecl) -> Option<TypeId>;

    fn type_symbol(&self, id: TypeId) -> Option<&TypeSymbol>;

    fn type_param(&self, id: TypeParamId) -> Option<&TypeParamSymbol>;

    /// Resolve a base-list entry of `decl` to the generic definition it
    /// names and the arguments supplied there.
    ///
    /// Returns `None` when the entry does not name a generic type or does
    /// not resolve.
    fn resolve_base_type(
        &self,
        file: FileId,
        decl: &TypeDecl,
        base: &TypeExpr,
    ) -> Option<ConstructedType>;

    /// The type parameter declared by the name token at `name_span`.
    fn declared_type_param(&self, file: FileId, name_span: Span) -> Option<TypeParamId>;

    /// Look up a type by fully qualified or simple name.
    ///
    /// Returns `None` when no type or more than one type matches.
    fn type_by_name(&self, name: &str) -> Option<TypeId>;
}

/// Host failure while renaming a symbol.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenameError {
    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),
    #[error("renaming to `{name}` conflicts with an existing declaration")]
    Conflict {
        name: String,
        existing: Option<Location>,
    },
    #[error("rename target {0:?} does not exist")]
    UnknownSymbol(TypeParamId),
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

/// Whole-compilation symbol rename.
pub trait RenameService {
    /// Rename the type parameter and every reference to it.
    fn rename_type_param(
        &self,
        target: TypeParamId,
        new_name: &str,
        cancel: &CancellationToken,
    ) -> Result<WorkspaceEdit, RenameError>;
}

/// Everything the rule and the fixes need from a host.
pub trait Host: DocumentStore + SemanticModel + RenameService + Sync {}

impl<T: DocumentStore + SemanticModel + RenameService + Sync> Host for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_keys_are_case_insensitive() {
        let options: AnalyzerConfigOptions =
            [("Dotnet_TSelfGeneric.TSelf_Param_Name", "Me")].into_iter().collect();
        assert_eq!(
            options.lookup("dotnet_tselfgeneric.tself_param_name"),
            Some("Me")
        );
        assert_eq!(
            options.lookup("DOTNET_TSELFGENERIC.TSELF_PARAM_NAME"),
            Some("Me")
        );
        assert_eq!(options.lookup("missing"), None);
    }

    #[test]
    fn test_empty_value_is_distinct_from_missing() {
        let mut options = AnalyzerConfigOptions::new();
        options.insert("key", "");
        assert_eq!(options.lookup("key"), Some(""));
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn test_hash_map_lookup() {
        let mut map = HashMap::new();
        map.insert("k".to_string(), "v".to_string());
        assert_eq!(map.lookup("k"), Some("v"));
    }
}
