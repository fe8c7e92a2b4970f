//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//!
//! ```text
//! warning[TSG1]: The self-type argument should be 'Bad'
//!   --> src/Bad.cs:3:35
//!    |
//!  3 | public class Bad : ISelfRequested<Implementation> { }
//!    |                                   ^^^^^^^^^^^^^^ expected `Bad`
//!    |
//! ```

use std::io::{self, Write};

use crate::{Diagnostic, Label, Severity};

use super::{DiagnosticEmitter, SourceDocument};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter.
    ///
    /// `is_tty` tells whether `writer` is a terminal (used for `ColorMode::Auto`).
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Create a terminal emitter for stdout.
    pub fn stdout(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stdout> {
        TerminalEmitter::with_color_mode(io::stdout(), mode, is_tty)
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        }
    }

    fn write_header(&mut self, diagnostic: &Diagnostic) {
        self.write_colored(
            diagnostic.severity.as_str(),
            Self::severity_color(diagnostic.severity),
        );
        let code = format!("[{}]", diagnostic.code);
        self.write_colored(&code, colors::BOLD);
        let _ = writeln!(self.writer, ": {}", diagnostic.message);
    }

    /// Source line of `label` with an underline below it.
    fn write_snippet(&mut self, doc: &SourceDocument<'_>, label: &Label, gutter: usize) {
        let ((line, col), (end_line, end_col)) = doc.range(label.span);
        let Some(text) = doc.line_text(line) else {
            return;
        };
        let text_width = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        let underline_end = if end_line == line {
            end_col
        } else {
            text_width + 1
        };
        let width = underline_end.saturating_sub(col).max(1) as usize;
        let pad = " ".repeat(col.saturating_sub(1) as usize);
        let (marker, color) = if label.is_primary {
            ("^", Self::severity_color(Severity::Error))
        } else {
            ("-", colors::SECONDARY)
        };

        let _ = writeln!(self.writer, "{:>gutter$} | {text}", line);
        let _ = write!(self.writer, "{:>gutter$} | {pad}", "");
        let mut underline = marker.repeat(width);
        if !label.message.is_empty() {
            underline.push(' ');
            underline.push_str(&label.message);
        }
        self.write_colored(&underline, color);
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, doc: &SourceDocument<'_>, diagnostic: &Diagnostic) {
        self.write_header(diagnostic);

        let (line, col) = doc.line_col(diagnostic.primary_span().start);
        let max_line = diagnostic
            .labels
            .iter()
            .map(|label| doc.line_col(label.span.end).0)
            .max()
            .unwrap_or(line)
            .max(line);
        let gutter = max_line.to_string().len();

        let _ = writeln!(
            self.writer,
            "{:>gutter$}--> {}:{line}:{col}",
            "",
            doc.path
        );
        if !diagnostic.labels.is_empty() {
            let _ = writeln!(self.writer, "{:>gutter$} |", "");
            for label in &diagnostic.labels {
                self.write_snippet(doc, label, gutter);
            }
            let _ = writeln!(self.writer, "{:>gutter$} |", "");
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "{:>gutter$} = ", "");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }

        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let _ = write!(
                self.writer,
                ": {error_count} error{}",
                plural_s(error_count)
            );
            if warning_count > 0 {
                let _ = write!(
                    self.writer,
                    ", {warning_count} warning{}",
                    plural_s(warning_count)
                );
            }
            let _ = writeln!(self.writer, " emitted");
        } else {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}
