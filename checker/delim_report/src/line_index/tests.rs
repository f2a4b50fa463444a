use super::LineIndex;
use pretty_assertions::assert_eq;

#[test]
fn empty_source_has_one_line() {
    let index = LineIndex::build("");
    assert_eq!(index.line_count(), 1);
    assert_eq!(index.line_col("", 0), (1, 1));
}

#[test]
fn single_line_columns() {
    let source = "abcdef";
    let index = LineIndex::build(source);
    assert_eq!(index.line_col(source, 0), (1, 1));
    assert_eq!(index.line_col(source, 3), (1, 4));
    assert_eq!(index.line_col(source, 6), (1, 7));
}

#[test]
fn offsets_after_newlines() {
    let source = "ab\ncd\nef";
    let index = LineIndex::build(source);
    assert_eq!(index.line_count(), 3);
    assert_eq!(index.line_col(source, 2), (1, 3)); // the '\n' itself
    assert_eq!(index.line_col(source, 3), (2, 1)); // 'c'
    assert_eq!(index.line_col(source, 4), (2, 2)); // 'd'
    assert_eq!(index.line_col(source, 7), (3, 2)); // 'f'
}

#[test]
fn exact_line_start_offsets() {
    let source = "x\ny\nz";
    let index = LineIndex::build(source);
    assert_eq!(index.line(0), 1);
    assert_eq!(index.line(2), 2);
    assert_eq!(index.line(4), 3);
    assert_eq!(index.line_start(1), 0);
    assert_eq!(index.line_start(2), 2);
    assert_eq!(index.line_start(3), 4);
}

#[test]
fn columns_count_characters_not_bytes() {
    // Two 3-byte characters before the brace: byte offset 6, but column 3.
    let source = "日本{";
    let index = LineIndex::build(source);
    assert_eq!(index.line_col(source, 6), (1, 3));
}

#[test]
fn line_text_strips_newline_and_cr() {
    let source = "first\r\nsecond\nthird";
    let index = LineIndex::build(source);
    assert_eq!(index.line_text(source, 1), "first");
    assert_eq!(index.line_text(source, 2), "second");
    assert_eq!(index.line_text(source, 3), "third");
}

#[test]
fn trailing_newline_opens_a_final_empty_line() {
    let source = "a\n";
    let index = LineIndex::build(source);
    assert_eq!(index.line_count(), 2);
    assert_eq!(index.line_col(source, 2), (2, 1));
    assert_eq!(index.line_text(source, 2), "");
}
