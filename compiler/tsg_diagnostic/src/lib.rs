//! TSelfGeneric Diagnostic System
//!
//! Rule codes, diagnostic values and report rendering.
//!
//! # Key Types
//!
//! - [`RuleCode`]: `TSG1` / `TSG2` with their titles and message templates
//! - [`Diagnostic`]: a finding with its location, message and labels
//! - [`DiagnosticQueue`]: cross-document collection in stable report order
//! - [`emitter`]: terminal, JSON and SARIF output
//! - [`RuleDocs`]: embedded rule pages for `tsgc explain`

mod diagnostic;
pub mod emitter;
mod errors;
mod queue;
mod rule_code;
pub mod span_utils;

pub use diagnostic::{format_message, Diagnostic, Label, Severity};
pub use errors::RuleDocs;
pub use queue::{DiagnosticQueue, QueueConfig};
pub use rule_code::{RuleCode, UnknownRuleCode};
