//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support and
//! source snippet rendering.

use std::io::{self, Write};

use crate::{Diagnostic, Label, LineIndex, Severity};

use super::{plural_s, DiagnosticEmitter};

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

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support and snippet rendering.
///
/// Attach the scanned source via [`with_source`](Self::with_source) to get
/// `file:line:col` locations and caret-underlined snippets; without it,
/// labels fall back to raw byte offsets.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<String>,
    index: Option<LineIndex>,
    path: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// # Arguments
    ///
    /// * `writer` - The output writer
    /// * `mode` - Color mode selection
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            index: None,
            path: None,
        }
    }

    /// Attach the scanned source for snippet rendering.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.index = Some(LineIndex::build(source));
        self.source = Some(source.to_owned());
        self
    }

    /// Attach the file path shown in location lines.
    #[must_use]
    pub fn with_file_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_owned());
        self
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        if self.colors {
            let color = match severity {
                Severity::Error => colors::ERROR,
                Severity::Warning => colors::WARNING,
                Severity::Note => colors::NOTE,
                Severity::Help => colors::HELP,
            };
            let _ = write!(self.writer, "{color}{severity}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{severity}");
        }
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    /// Render one label: location line plus, when source is attached, the
    /// offending line with a caret (primary) or dash (secondary) underline.
    fn write_label(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { "   " };
        let _ = write!(self.writer, "  {marker} ");

        let Some((index, source)) = self.index.as_ref().zip(self.source.as_deref()) else {
            // No source attached: raw byte offsets are the best we can do.
            let path = self.path.as_deref().unwrap_or("<input>");
            let _ = write!(self.writer, "{path} [{:?}]: ", label.span);
            let message = label.message.clone();
            if label.is_primary {
                self.write_colored(&message, colors::ERROR);
            } else {
                self.write_colored(&message, colors::SECONDARY);
            }
            let _ = writeln!(self.writer);
            return;
        };

        let (line, col) = index.line_col(source, label.span.start);
        let line_text = index.line_text(source, line).to_owned();
        let path = self.path.as_deref().unwrap_or("<input>").to_owned();
        let _ = writeln!(self.writer, "{path}:{line}:{col}");

        // Snippet: gutter, source line, underline.
        let gutter = line.to_string();
        let pad = " ".repeat(gutter.len());
        let _ = writeln!(self.writer, " {pad} |");
        let _ = writeln!(self.writer, " {gutter} | {line_text}");

        // Underline from the label column, one mark per character of the
        // span (at least one), clamped to the visible line.
        let lead = " ".repeat(col.saturating_sub(1) as usize);
        let span_chars = label.span.len().max(1) as usize;
        let visible = line_text.chars().count().saturating_sub(lead.len()).max(1);
        let mark = if label.is_primary { "^" } else { "-" };
        let underline = mark.repeat(span_chars.min(visible));
        let _ = write!(self.writer, " {pad} | {lead}");
        let message = label.message.clone();
        if label.is_primary {
            self.write_colored(&underline, colors::ERROR);
            let _ = write!(self.writer, " ");
            self.write_colored(&message, colors::ERROR);
        } else {
            self.write_colored(&underline, colors::SECONDARY);
            let _ = write!(self.writer, " ");
            self.write_colored(&message, colors::SECONDARY);
        }
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            if self.colors {
                let _ = write!(self.writer, "{}note{}", colors::BOLD, colors::RESET);
            } else {
                let _ = write!(self.writer, "note");
            }
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            if self.colors {
                let _ = write!(self.writer, "{}help{}", colors::HELP, colors::RESET);
            } else {
                let _ = write!(self.writer, "help");
            }
            let _ = writeln!(self.writer, ": {suggestion}");
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
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": {error_count} problem{} found; {warning_count} warning{} emitted",
                    plural_s(error_count),
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(
                    self.writer,
                    ": {error_count} problem{} found",
                    plural_s(error_count)
                );
            }
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

/// Create a terminal emitter for stderr with explicit color mode.
///
/// # Arguments
///
/// * `mode` - Color mode selection (`Auto`, `Always`, or `Never`)
/// * `is_tty` - Whether stderr is a TTY (used for `ColorMode::Auto`)
pub fn stderr_emitter(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
    TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
}
