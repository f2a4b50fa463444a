use super::*;
use delim_core::{scan, DelimKind, SourceBuffer};
use pretty_assertions::assert_eq;

fn diagnose(source: &str) -> Vec<Diagnostic> {
    let buf = SourceBuffer::new(source);
    verdict_to_diagnostics(&scan(&buf), buf.len())
}

// === Builder ===

#[test]
fn builder_collects_parts_in_order() {
    let diag = Diagnostic::error(ErrorCode::E0001)
        .with_message("m")
        .with_label(Span::at(4), "primary")
        .with_secondary_label(Span::at(1), "context")
        .with_note("n")
        .with_suggestion("s");
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.labels.len(), 2);
    assert!(diag.labels[0].is_primary);
    assert!(!diag.labels[1].is_primary);
    assert_eq!(diag.primary_span(), Some(Span::at(4)));
    assert_eq!(diag.notes, vec!["n".to_owned()]);
    assert_eq!(diag.suggestions[0].message, "s");
}

#[test]
fn error_codes_render_stably() {
    assert_eq!(ErrorCode::E0001.as_str(), "E0001");
    assert_eq!(ErrorCode::E0002.to_string(), "E0002");
    assert_eq!(ErrorCode::E9001.to_string(), "E9001");
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Help.to_string(), "help");
}

// === Verdict conversion ===

#[test]
fn balanced_produces_no_diagnostics() {
    assert_eq!(diagnose("f(a)[b]{c}"), Vec::new());
}

#[test]
fn empty_stack_closer_names_the_missing_opener() {
    let diags = diagnose("x)");
    assert_eq!(diags.len(), 1);
    let diag = &diags[0];
    assert_eq!(diag.code, ErrorCode::E0001);
    assert_eq!(diag.message, "unmatched closing delimiter `)`");
    assert_eq!(diag.primary_span(), Some(Span::at(1)));
    assert_eq!(diag.labels[0].message, "no `(` to match");
}

#[test]
fn cross_kind_mismatch_points_at_both_sides() {
    let diags = diagnose("{ )");
    assert_eq!(diags.len(), 1);
    let diag = &diags[0];
    assert_eq!(diag.message, "mismatched closing delimiter `)`");
    assert_eq!(diag.primary_span(), Some(Span::at(2)));
    assert_eq!(diag.labels[0].message, "expected `}`");
    assert_eq!(diag.labels[1].span, Span::at(0));
    assert_eq!(diag.labels[1].message, "this `{` is still open");
    assert!(diag.suggestions[0].message.contains('}'));
}

#[test]
fn unclosed_openers_produce_one_diagnostic_each() {
    let diags = diagnose("({[");
    assert_eq!(diags.len(), 3);
    assert_eq!(diags[0].message, "unclosed delimiter `(`");
    assert_eq!(diags[1].message, "unclosed delimiter `{`");
    assert_eq!(diags[2].message, "unclosed delimiter `[`");
    // Each is anchored at end of input, with the opener as context.
    for (i, diag) in diags.iter().enumerate() {
        assert_eq!(diag.code, ErrorCode::E0002);
        assert_eq!(diag.primary_span(), Some(Span::caret(3)));
        assert_eq!(diag.labels[1].span, Span::at(u32::try_from(i).unwrap_or(u32::MAX)));
    }
}

#[test]
fn unclosed_suggestion_names_the_closer() {
    let diags = diagnose("f(x");
    assert_eq!(
        diags[0].suggestions[0].message,
        "insert a closing `)` to match this `(`"
    );
}

// === Encoding failures ===

#[test]
fn invalid_utf8_is_a_precondition_diagnostic() {
    let err = SourceBuffer::from_bytes(b"ok\xFF").expect_err("invalid UTF-8 must be rejected");
    let diag = malformed_encoding(&err);
    assert_eq!(diag.code, ErrorCode::E9001);
    assert!(diag.message.contains("invalid UTF-8"));
    assert_eq!(diag.primary_span(), Some(Span::caret(2)));
}

#[test]
fn utf16_bom_suggests_reencoding() {
    let err = SourceBuffer::from_bytes(&[0xFF, 0xFE]).expect_err("UTF-16 BOM must be rejected");
    let diag = malformed_encoding(&err);
    assert!(diag.message.contains("UTF-16"));
    assert_eq!(diag.suggestions[0].message, "re-encode the file as UTF-8");
}

// === Direct constructor coverage ===

#[test]
fn unmatched_closer_uses_found_kind_for_chars() {
    let diag = unmatched_closer(7, DelimKind::Bracket, None);
    assert_eq!(diag.message, "unmatched closing delimiter `]`");
    assert_eq!(diag.labels[0].message, "no `[` to match");
}
