//! JSON Emitter
//!
//! Machine-readable diagnostic output in JSON format: one array of
//! diagnostic objects per run. JSON is built by hand; the handful of
//! fields here does not justify a serialization dependency.

use std::io::Write;

use crate::{Diagnostic, LineIndex};

use super::{escape_json, trailing_comma, DiagnosticEmitter};

/// JSON emitter for machine-readable output.
///
/// Wrap each run in [`begin()`](Self::begin) / [`end()`](Self::end) to
/// produce a well-formed array. Attaching a source via
/// [`with_source`](Self::with_source) adds 1-based `line`/`col` fields to
/// every label; without it, only byte offsets are emitted.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
    source: Option<String>,
    index: Option<LineIndex>,
    path: Option<String>,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter.
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
            source: None,
            index: None,
            path: None,
        }
    }

    /// Attach the scanned source so labels carry line/column fields.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.index = Some(LineIndex::build(source));
        self.source = Some(source.to_owned());
        self
    }

    /// Attach the file path emitted with each diagnostic.
    #[must_use]
    pub fn with_file_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_owned());
        self
    }

    /// Point the emitter at the file whose diagnostics come next.
    ///
    /// Multi-file runs share one emitter (and one JSON array), so the
    /// context is swapped per file instead of per-emitter.
    pub fn set_context(&mut self, path: &str, source: Option<&str>) {
        self.path = Some(path.to_owned());
        self.index = source.map(LineIndex::build);
        self.source = source.map(str::to_owned);
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = writeln!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        let _ = writeln!(self.writer, "\n]");
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(
            self.writer,
            "    \"code\": \"{}\",",
            diagnostic.code.as_str()
        );
        let _ = writeln!(self.writer, "    \"severity\": \"{}\",", diagnostic.severity);
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\",",
            escape_json(&diagnostic.message)
        );
        if let Some(path) = self.path.clone() {
            let _ = writeln!(self.writer, "    \"file\": \"{}\",", escape_json(&path));
        }

        // Labels
        let _ = writeln!(self.writer, "    \"labels\": [");
        let located: Vec<(u32, u32)> = diagnostic
            .labels
            .iter()
            .map(|label| {
                self.index
                    .as_ref()
                    .zip(self.source.as_deref())
                    .map_or((0, 0), |(index, source)| {
                        index.line_col(source, label.span.start)
                    })
            })
            .collect();
        let has_lines = self.index.is_some();
        for (i, label) in diagnostic.labels.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.labels.len());
            let _ = writeln!(self.writer, "      {{");
            let _ = writeln!(self.writer, "        \"start\": {},", label.span.start);
            let _ = writeln!(self.writer, "        \"end\": {},", label.span.end);
            if has_lines {
                let (line, col) = located[i];
                let _ = writeln!(self.writer, "        \"line\": {line},");
                let _ = writeln!(self.writer, "        \"col\": {col},");
            }
            let _ = writeln!(
                self.writer,
                "        \"message\": \"{}\",",
                escape_json(&label.message)
            );
            let _ = writeln!(self.writer, "        \"primary\": {}", label.is_primary);
            let _ = writeln!(self.writer, "      }}{comma}");
        }
        let _ = writeln!(self.writer, "    ],");

        // Notes
        let _ = writeln!(self.writer, "    \"notes\": [");
        for (i, note) in diagnostic.notes.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.notes.len());
            let _ = writeln!(self.writer, "      \"{}\"{}", escape_json(note), comma);
        }
        let _ = writeln!(self.writer, "    ],");

        // Suggestions (text-only)
        let _ = writeln!(self.writer, "    \"suggestions\": [");
        for (i, suggestion) in diagnostic.suggestions.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.suggestions.len());
            let _ = writeln!(
                self.writer,
                "      \"{}\"{}",
                escape_json(&suggestion.message),
                comma
            );
        }
        let _ = writeln!(self.writer, "    ]");

        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // Machine consumers count array elements themselves.
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::{Diagnostic, ErrorCode, Span};

    fn sample() -> Diagnostic {
        Diagnostic::error(ErrorCode::E0002)
            .with_message("unclosed delimiter `(`")
            .with_label(Span::caret(7), "expected `)` before end of input")
            .with_secondary_label(Span::at(2), "unclosed delimiter opened here")
            .with_suggestion("insert a closing `)` to match this `(`")
    }

    fn render(diags: &[Diagnostic], source: Option<&str>, path: Option<&str>) -> String {
        let mut output = Vec::new();
        {
            let mut emitter = JsonEmitter::new(&mut output);
            if let Some(source) = source {
                emitter = emitter.with_source(source);
            }
            if let Some(path) = path {
                emitter = emitter.with_file_path(path);
            }
            emitter.begin();
            emitter.emit_all(diags);
            emitter.end();
            emitter.flush();
        }
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn single_diagnostic_renders_all_fields() {
        let text = render(&[sample()], None, Some("a.ts"));
        assert!(text.starts_with("[\n"));
        assert!(text.trim_end().ends_with(']'));
        assert!(text.contains("\"code\": \"E0002\""));
        assert!(text.contains("\"severity\": \"error\""));
        assert!(text.contains("\"message\": \"unclosed delimiter `(`\""));
        assert!(text.contains("\"file\": \"a.ts\""));
        assert!(text.contains("\"start\": 7"));
        assert!(text.contains("\"primary\": true"));
        assert!(text.contains("\"primary\": false"));
        assert!(text.contains("insert a closing `)` to match this `(`"));
        // No source attached: no line/col fields.
        assert!(!text.contains("\"line\""));
    }

    #[test]
    fn source_attachment_adds_line_and_col() {
        let source = "ab\ncd(e";
        let text = render(&[sample()], Some(source), None);
        assert!(text.contains("\"line\": 2"), "got:\n{text}");
        assert!(text.contains("\"col\": 5"), "got:\n{text}");
    }

    #[test]
    fn diagnostics_are_comma_separated() {
        let text = render(&[sample(), sample()], None, None);
        assert!(text.contains("},\n"), "got:\n{text}");
    }

    #[test]
    fn set_context_swaps_file_between_diagnostics() {
        let mut output = Vec::new();
        {
            let mut emitter = JsonEmitter::new(&mut output);
            emitter.begin();
            emitter.set_context("a.ts", Some("(\n"));
            emitter.emit(&sample());
            emitter.set_context("b.ts", None);
            emitter.emit(&sample());
            emitter.end();
        }
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("\"file\": \"a.ts\""));
        assert!(text.contains("\"file\": \"b.ts\""));
        // Only the first diagnostic had a source attached.
        assert_eq!(text.matches("\"line\"").count(), 2, "got:\n{text}");
    }

    #[test]
    fn quotes_in_messages_are_escaped() {
        let diag = Diagnostic::error(ErrorCode::E9001).with_message("bad \"quote\"");
        let text = render(&[diag], None, None);
        assert!(text.contains("bad \\\"quote\\\""));
    }
}
