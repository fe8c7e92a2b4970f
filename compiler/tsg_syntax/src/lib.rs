//! Reference host front-end for the TSelfGeneric analyzer.
//!
//! Implements the `tsg_ir::host` capability traits for a C#-shaped
//! declaration language:
//! - [`lexer`]: logos-based tokenizer
//! - [`parser`]: declaration-level recursive descent parser
//! - [`Workspace`]: binder and semantic model over a set of documents
//! - whole-workspace type parameter rename
//! - [`editorconfig`]: per-file analyzer options
//!
//! ```ignore
//! let mut builder = Workspace::builder();
//! builder.add_document("Bad.cs", "class Bad<T> : ISelf<T> { }");
//! let workspace = builder.build();
//! ```

pub mod editorconfig;
pub mod lexer;
pub mod parser;
mod rename;
mod workspace;

pub use editorconfig::{EditorConfig, EditorConfigError, EditorConfigStore};
pub use parser::{parse, ParseError, ParseOutput};
pub use workspace::{Document, Workspace, WorkspaceBuilder};
