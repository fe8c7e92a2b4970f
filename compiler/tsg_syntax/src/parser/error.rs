//! Parse error types.

use tsg_ir::Span;

/// A syntax error. Parsing recovers at the next member boundary, so one
/// document can produce several.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
        span: Span,
    },
    #[error("unclosed `{delimiter}`")]
    Unclosed { delimiter: char, span: Span },
    #[error("unrecognized character `{text}`")]
    InvalidToken { text: String, span: Span },
    #[error("source is too large ({len} bytes)")]
    TooLarge { len: usize },
}

impl ParseError {
    /// Where the error was detected.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Expected { span, .. }
            | ParseError::Unclosed { span, .. }
            | ParseError::InvalidToken { span, .. } => *span,
            ParseError::TooLarge { .. } => Span::DUMMY,
        }
    }
}
