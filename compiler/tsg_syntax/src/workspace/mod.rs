//! The reference host: parsed documents plus their bound symbols.
//!
//! [`Workspace`] implements the host capability traits of `tsg_ir::host`
//! (`DocumentStore`, `SemanticModel`, `RenameService`). It is immutable once
//! built; applying a fix produces a new workspace through
//! [`Workspace::with_edit`].

mod binder;
mod scope;

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tsg_ir::ast::{SyntaxTree, TypeDecl, TypeExpr};
use tsg_ir::host::{AnalyzerConfigOptions, DocumentStore, SemanticModel};
use tsg_ir::sema::{ConstructedType, TypeParamSymbol, TypeRef, TypeSymbol};
use tsg_ir::{EditConflict, FileId, Span, TypeId, TypeParamId, WorkspaceEdit};

use crate::parser::{self, ParseError};

pub(crate) use binder::SymbolTable;
use scope::Scope;

/// One source document with its parse result and options.
#[derive(Clone, Debug)]
pub struct Document {
    pub id: FileId,
    pub path: PathBuf,
    pub text: String,
    pub tree: SyntaxTree,
    pub errors: Vec<ParseError>,
    pub options: AnalyzerConfigOptions,
}

/// Collects documents before parsing and binding them together.
#[derive(Clone, Debug, Default)]
pub struct WorkspaceBuilder {
    sources: Vec<(PathBuf, String, AnalyzerConfigOptions)>,
}

impl WorkspaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with no analyzer options.
    pub fn add_document(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> FileId {
        self.add_document_with_options(path, text, AnalyzerConfigOptions::new())
    }

    pub fn add_document_with_options(
        &mut self,
        path: impl Into<PathBuf>,
        text: impl Into<String>,
        options: AnalyzerConfigOptions,
    ) -> FileId {
        let id = FileId::from_index(self.sources.len()).unwrap_or(FileId::new(u32::MAX));
        self.sources.push((path.into(), text.into(), options));
        id
    }

    /// Replace the options of every document.
    #[must_use]
    pub fn with_options_for_all(mut self, options: &AnalyzerConfigOptions) -> Self {
        for (_, _, opts) in &mut self.sources {
            opts.clone_from(options);
        }
        self
    }

    /// Parse and bind all documents.
    #[tracing::instrument(level = "debug", skip(self), fields(documents = self.sources.len()))]
    pub fn build(self) -> Workspace {
        let documents: Vec<Document> = self
            .sources
            .into_iter()
            .enumerate()
            .filter_map(|(index, (path, text, options))| {
                let id = FileId::from_index(index)?;
                let output = parser::parse(id, &text);
                Some(Document {
                    id,
                    path,
                    text,
                    tree: output.tree,
                    errors: output.errors,
                    options,
                })
            })
            .collect();
        let symbols = SymbolTable::bind(&documents);
        Workspace {
            documents,
            symbols,
            name_cache: RwLock::new(FxHashMap::default()),
        }
    }
}

/// Parsed and bound documents.
#[derive(Debug)]
pub struct Workspace {
    documents: Vec<Document>,
    symbols: SymbolTable,
    /// `type_by_name` results; read-mostly and shared by parallel analysis.
    name_cache: RwLock<FxHashMap<String, Option<TypeId>>>,
}

impl Workspace {
    pub fn builder() -> WorkspaceBuilder {
        WorkspaceBuilder::new()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, file: FileId) -> Option<&Document> {
        self.documents.get(file.index())
    }

    pub fn find_document(&self, path: &Path) -> Option<FileId> {
        self.documents
            .iter()
            .find(|doc| doc.path == path)
            .map(|doc| doc.id)
    }

    pub fn parse_errors(&self, file: FileId) -> &[ParseError] {
        self.document(file).map_or(&[], |doc| doc.errors.as_slice())
    }

    /// Fully qualified name of a type, e.g. `Self.Outer.Inner`.
    pub fn qualified_name(&self, id: TypeId) -> Option<&str> {
        self.symbols.full_name(id)
    }

    /// A new workspace with `edit` applied to the document texts.
    ///
    /// Document ids, paths and options are preserved.
    pub fn with_edit(&self, edit: &WorkspaceEdit) -> Result<Workspace, EditConflict> {
        let mut builder = WorkspaceBuilder::new();
        for doc in &self.documents {
            let text = edit.apply_to(doc.id, &doc.text)?;
            builder.add_document_with_options(doc.path.clone(), text, doc.options.clone());
        }
        Ok(builder.build())
    }

    fn scope_for<'a>(&'a self, file: FileId, decl: &TypeDecl) -> Option<Scope<'a>> {
        let doc = self.document(file)?;
        let owner = self.symbols.declared_type(file, decl.name_span)?;
        Some(Scope::new(&self.symbols, doc, decl, owner))
    }
}

impl DocumentStore for Workspace {
    fn document_ids(&self) -> Vec<FileId> {
        self.documents.iter().map(|doc| doc.id).collect()
    }

    fn syntax_tree(&self, file: FileId) -> Option<&SyntaxTree> {
        self.document(file).map(|doc| &doc.tree)
    }

    fn source_text(&self, file: FileId) -> Option<&str> {
        self.document(file).map(|doc| doc.text.as_str())
    }

    fn document_path(&self, file: FileId) -> Option<&Path> {
        self.document(file).map(|doc| doc.path.as_path())
    }

    fn config_options(&self, file: FileId) -> Option<&AnalyzerConfigOptions> {
        self.document(file).map(|doc| &doc.options)
    }
}

impl SemanticModel for Workspace {
    fn declared_type(&self, file: FileId, decl: &TypeDecl) -> Option<TypeId> {
        self.symbols.declared_type(file, decl.name_span)
    }

    fn type_symbol(&self, id: TypeId) -> Option<&TypeSymbol> {
        self.symbols.type_symbol(id)
    }

    fn type_param(&self, id: TypeParamId) -> Option<&TypeParamSymbol> {
        self.symbols.type_param(id)
    }

    fn resolve_base_type(
        &self,
        file: FileId,
        decl: &TypeDecl,
        base: &TypeExpr,
    ) -> Option<ConstructedType> {
        if !base.is_generic() {
            return None;
        }
        let scope = self.scope_for(file, decl)?;
        match scope.resolve(base) {
            TypeRef::Named { def, args } => {
                let formals = self.symbols.type_symbol(def)?.type_params.clone();
                Some(ConstructedType { def, formals, args })
            }
            TypeRef::Param(_) | TypeRef::Error => None,
        }
    }

    fn declared_type_param(&self, file: FileId, name_span: Span) -> Option<TypeParamId> {
        self.symbols.declared_type_param(file, name_span)
    }

    fn type_by_name(&self, name: &str) -> Option<TypeId> {
        if let Some(cached) = self.name_cache.read().get(name) {
            return *cached;
        }
        let found = self.symbols.type_by_name(name);
        self.name_cache.write().insert(name.to_string(), found);
        found
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
