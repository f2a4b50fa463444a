//! Core diagnostic types for structured error reporting.
//!
//! Defines [`Diagnostic`], [`Label`], [`Severity`], and [`Suggestion`], the
//! building blocks the emitters render, plus the constructors that phrase
//! each balance defect ([`unmatched_closer`], [`unclosed_delimiter`],
//! [`malformed_encoding`]) and the [`verdict_to_diagnostics`] bridge from
//! the scanner's structured output.

use std::fmt;

use delim_core::{DelimKind, EncodingError, OpenDelim, Verdict};

use crate::Span;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}

/// Error codes for all checker diagnostics.
///
/// Format: E####, where E0xxx are scan defects and E9xxx are
/// input/precondition failures.
/// failures.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Unmatched or mismatched closing delimiter
    E0001,
    /// Delimiter still open at end of input
    E0002,
    /// Input is not decodable as UTF-8 text
    E9001,
}

impl ErrorCode {
    /// The code as it appears in rendered output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled span with a message.
///
/// Labels highlight specific locations in the scanned source and attach
/// explanatory messages.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    /// The source location to highlight.
    pub span: Span,
    /// The label text explaining this location.
    pub message: String,
    /// Whether this is the primary defect location.
    pub is_primary: bool,
}

/// A text-only repair suggestion.
///
/// Suggestions describe a fix ("insert a closing `)`"); they are rendered,
/// never applied. `priority` orders multiple suggestions (lower = more
/// likely relevant).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Suggestion {
    /// Human-readable message describing the fix.
    pub message: String,
    /// Priority (lower = more likely to be relevant).
    pub priority: u8,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A structured, renderable diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    /// Create an error-severity diagnostic with the given code.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Set the top-line message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the primary label.
    #[must_use]
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            is_primary: true,
        });
        self
    }

    /// Attach a secondary (context) label.
    #[must_use]
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            is_primary: false,
        });
        self
    }

    /// Attach a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Attach a text-only repair suggestion (priority 0).
    #[must_use]
    pub fn with_suggestion(mut self, message: impl Into<String>) -> Self {
        self.suggestions.push(Suggestion {
            message: message.into(),
            priority: 0,
        });
        self
    }

    /// The primary label's span, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }
}

/// Create a diagnostic for a closing delimiter with no match.
///
/// With `expected` present, the closer hit a still-open delimiter of a
/// different kind (cross-kind mismatch); without it, the stack was empty.
pub fn unmatched_closer(pos: u32, found: DelimKind, expected: Option<OpenDelim>) -> Diagnostic {
    let close = found.close_char();
    match expected {
        Some(open) => Diagnostic::error(ErrorCode::E0001)
            .with_message(format!("mismatched closing delimiter `{close}`"))
            .with_label(Span::at(pos), format!("expected `{}`", open.kind.close_char()))
            .with_secondary_label(
                Span::at(open.pos),
                format!("this `{}` is still open", open.kind.open_char()),
            )
            .with_suggestion(format!(
                "close the `{}` with `{}` before `{close}`",
                open.kind.open_char(),
                open.kind.close_char(),
            )),
        None => Diagnostic::error(ErrorCode::E0001)
            .with_message(format!("unmatched closing delimiter `{close}`"))
            .with_label(Span::at(pos), format!("no `{}` to match", found.open_char()))
            .with_suggestion(format!("remove this `{close}` or open a `{}` before it", found.open_char())),
    }
}

/// Create a diagnostic for a delimiter still open at end of input.
pub fn unclosed_delimiter(open: OpenDelim, eof_pos: u32) -> Diagnostic {
    let opener = open.kind.open_char();
    let closer = open.kind.close_char();
    Diagnostic::error(ErrorCode::E0002)
        .with_message(format!("unclosed delimiter `{opener}`"))
        .with_label(Span::caret(eof_pos), format!("expected `{closer}` before end of input"))
        .with_secondary_label(Span::at(open.pos), "unclosed delimiter opened here")
        .with_suggestion(format!("insert a closing `{closer}` to match this `{opener}`"))
}

/// Create a diagnostic for input that could not be decoded as text.
pub fn malformed_encoding(error: &EncodingError) -> Diagnostic {
    let diag = Diagnostic::error(ErrorCode::E9001).with_message(error.to_string());
    match error {
        EncodingError::InvalidUtf8 { valid_up_to } => diag.with_label(
            Span::caret(u32::try_from(*valid_up_to).unwrap_or(u32::MAX)),
            "first undecodable byte",
        ),
        EncodingError::Utf16LeBom | EncodingError::Utf16BeBom => diag
            .with_label(Span::new(0, 2), "byte-order mark found here")
            .with_suggestion("re-encode the file as UTF-8"),
    }
}

/// Convert a scan verdict into renderable diagnostics.
///
/// `Balanced` produces none. `UnmatchedCloser` produces exactly one.
/// `UnclosedOpeners` produces one per surviving opener, outermost first,
/// each anchored at end of input (`eof_pos` is the source length).
pub fn verdict_to_diagnostics(verdict: &Verdict, eof_pos: u32) -> Vec<Diagnostic> {
    match verdict {
        Verdict::Balanced => Vec::new(),
        Verdict::UnmatchedCloser {
            pos,
            found,
            expected,
        } => vec![unmatched_closer(*pos, *found, *expected)],
        Verdict::UnclosedOpeners { openers } => openers
            .iter()
            .map(|open| unclosed_delimiter(*open, eof_pos))
            .collect(),
    }
}

#[cfg(test)]
mod tests;
