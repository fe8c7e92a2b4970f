//! TSelfGeneric IR - shared vocabulary
//!
//! This crate contains the data structures shared by the analyzer, the
//! fixes and any host front-end:
//! - Spans and locations
//! - Document and symbol ids
//! - The declaration-level syntax tree
//! - Semantic symbols (types, type parameters, constructed base types)
//! - Text edits and workspace edits
//! - Cancellation
//! - Host capability traits
//!
//! Syntax trees and symbols are immutable snapshots. Nothing in the rule
//! mutates them; fixes describe changes as [`WorkspaceEdit`]s.

pub mod ast;
mod cancel;
mod edit;
pub mod host;
mod ids;
pub mod sema;
mod span;

pub use cancel::{CancellationToken, Cancelled};
pub use edit::{EditConflict, TextEdit, WorkspaceEdit};
pub use ids::{FileId, TypeId, TypeParamId};
pub use span::{Location, Span, SpanError};
