use crate::source_buffer::{EncodingError, SourceBuffer, CACHE_LINE};
use pretty_assertions::assert_eq;

// === Construction ===

#[test]
fn empty_source_has_sentinel() {
    let buf = SourceBuffer::new("");
    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert_eq!(buf.cursor().current(), 0);
    assert!(buf.cursor().is_eof());
}

#[test]
fn source_bytes_are_preserved() {
    let buf = SourceBuffer::new("const x = 1;");
    assert_eq!(buf.as_bytes(), b"const x = 1;");
    assert_eq!(buf.as_str(), "const x = 1;");
    assert_eq!(buf.len(), 12);
    assert!(!buf.is_empty());
}

#[test]
fn buffer_is_padded_to_cache_line() {
    for source in ["", "a", "0123456789", &"x".repeat(63), &"x".repeat(64)] {
        let buf = SourceBuffer::new(source);
        let total = buf.as_sentinel_bytes().len();
        assert_eq!(total % CACHE_LINE, 0, "padding for len {}", source.len());
        assert!(total > source.len(), "sentinel must fit for {source:?}");
    }
}

#[test]
fn padding_after_sentinel_is_zeroed() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    cursor.advance();
    cursor.advance();
    cursor.advance();
    // Past the source: sentinel, then padding, all readable as 0x00.
    assert_eq!(cursor.current(), 0);
    assert_eq!(cursor.peek(), 0);
}

#[test]
fn interior_null_is_preserved_not_eof() {
    let buf = SourceBuffer::new("a\u{0}b");
    assert_eq!(buf.len(), 3);
    let mut cursor = buf.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof(), "interior null must not read as EOF");
}

// === Byte input validation ===

#[test]
fn from_bytes_accepts_valid_utf8() {
    let buf = SourceBuffer::from_bytes("fn(\u{3bb}) {}".as_bytes());
    assert_eq!(buf.map(|b| b.as_str().to_owned()), Ok("fn(\u{3bb}) {}".to_owned()));
}

#[test]
fn from_bytes_rejects_invalid_utf8() {
    let result = SourceBuffer::from_bytes(b"ok \xFF bad");
    assert_eq!(result.err(), Some(EncodingError::InvalidUtf8 { valid_up_to: 3 }));
}

#[test]
fn from_bytes_rejects_utf16_boms() {
    assert_eq!(
        SourceBuffer::from_bytes(&[0xFF, 0xFE, 0x61, 0x00]).err(),
        Some(EncodingError::Utf16LeBom)
    );
    assert_eq!(
        SourceBuffer::from_bytes(&[0xFE, 0xFF, 0x00, 0x61]).err(),
        Some(EncodingError::Utf16BeBom)
    );
}

#[test]
fn from_bytes_accepts_utf8_bom() {
    // A UTF-8 BOM is valid UTF-8; it scans as inert code content.
    let buf = SourceBuffer::from_bytes(&[0xEF, 0xBB, 0xBF, b'{', b'}']);
    assert!(buf.is_ok());
}

#[test]
fn encoding_error_messages_name_the_problem() {
    let invalid = EncodingError::InvalidUtf8 { valid_up_to: 7 }.to_string();
    assert!(invalid.contains("invalid UTF-8"));
    assert!(invalid.contains('7'));
    assert!(EncodingError::Utf16LeBom.to_string().contains("UTF-16"));
    assert!(EncodingError::Utf16BeBom.to_string().contains("UTF-16"));
}
