use tsg_analyzer::Config;
use tsg_diagnostic::Diagnostic;
use tsg_ir::ast::SyntaxTree;
use tsg_ir::host::Host;
use tsg_ir::{CancellationToken, FileId, Span};

use crate::FixError;

/// Everything a fix sees about one diagnostic.
pub struct FixContext<'a> {
    pub host: &'a dyn Host,
    pub diagnostic: &'a Diagnostic,
    /// Configuration of the diagnostic's document.
    pub config: Config,
    pub cancel: &'a CancellationToken,
}

impl<'a> FixContext<'a> {
    pub fn new(host: &'a dyn Host, diagnostic: &'a Diagnostic, cancel: &'a CancellationToken) -> Self {
        let config = tsg_analyzer::config_for(host, diagnostic.location.file);
        FixContext {
            host,
            diagnostic,
            config,
            cancel,
        }
    }

    pub fn file(&self) -> FileId {
        self.diagnostic.location.file
    }

    pub fn span(&self) -> Span {
        self.diagnostic.location.span
    }

    pub fn tree(&self) -> Result<&'a SyntaxTree, FixError> {
        self.host
            .syntax_tree(self.file())
            .ok_or(FixError::DocumentNotFound(self.file()))
    }

    pub fn source(&self) -> Result<&'a str, FixError> {
        self.host
            .source_text(self.file())
            .ok_or(FixError::DocumentNotFound(self.file()))
    }
}

impl std::fmt::Debug for FixContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixContext")
            .field("diagnostic", &self.diagnostic.code)
            .field("location", &self.diagnostic.location)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A fix offered for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeAction {
    pub title: String,
    /// Identifies the fix kind for batch application.
    pub equivalence_key: &'static str,
    pub diagnostic: Diagnostic,
}

impl CodeAction {
    pub fn new(title: impl Into<String>, equivalence_key: &'static str, diagnostic: &Diagnostic) -> Self {
        CodeAction {
            title: title.into(),
            equivalence_key,
            diagnostic: diagnostic.clone(),
        }
    }
}
