//! Hand-written balance scanner: lexical state machine + delimiter stack.
//!
//! The scanner walks a sentinel-terminated [`Cursor`] in a single pass.
//! At every position exactly one [`LexState`] is active; delimiters are
//! pushed and popped only while in [`LexState::Code`]. State transitions
//! are evaluated before delimiter counting on the same byte, so a quote or
//! comment marker seen in code changes state without being miscounted.
//!
//! # Design
//!
//! Each state has a focused method that jumps (via memchr) to the next
//! byte that can end the region or affect nesting, handles it, and returns.
//! The main loop dispatches on the current state until EOF or until a
//! closing delimiter fails to match, the one condition that ends a scan
//! early, since everything after a confirmed mismatch would produce
//! cascading noise. Unclosed openers, by contrast, are only a defect once
//! the input is exhausted, so they are collected and reported at EOF.

use crate::cursor::Cursor;
use crate::source_buffer::SourceBuffer;

/// Which quote character opened the current string literal.
///
/// Backtick (template) literals are opaque: `${...}` interpolation is not
/// recognized, so delimiters inside a template never touch the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuoteKind {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
    /// `` `...` `` (template literal, treated as an opaque string)
    Backtick,
}

impl QuoteKind {
    /// The quote byte that opens and closes this kind of literal.
    pub fn byte(self) -> u8 {
        match self {
            QuoteKind::Single => b'\'',
            QuoteKind::Double => b'"',
            QuoteKind::Backtick => b'`',
        }
    }

    /// Classify a byte the caller has already matched as a quote.
    fn from_byte(b: u8) -> Self {
        match b {
            b'\'' => QuoteKind::Single,
            b'"' => QuoteKind::Double,
            b'`' => QuoteKind::Backtick,
            _ => unreachable!("not a quote byte: {b:#04x}"),
        }
    }
}

/// One of the three paired delimiter kinds.
///
/// Kinds are tracked separately so that a brace closed by a paren is
/// reported as a mismatch instead of silently popping the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DelimKind {
    /// `(` / `)`
    Paren,
    /// `{` / `}`
    Brace,
    /// `[` / `]`
    Bracket,
}

impl DelimKind {
    /// The opening character of this kind.
    pub fn open_char(self) -> char {
        match self {
            DelimKind::Paren => '(',
            DelimKind::Brace => '{',
            DelimKind::Bracket => '[',
        }
    }

    /// The closing character of this kind.
    pub fn close_char(self) -> char {
        match self {
            DelimKind::Paren => ')',
            DelimKind::Brace => '}',
            DelimKind::Bracket => ']',
        }
    }

    /// Classify a byte the caller has already matched as an opener.
    fn from_open(b: u8) -> Self {
        match b {
            b'(' => DelimKind::Paren,
            b'{' => DelimKind::Brace,
            b'[' => DelimKind::Bracket,
            _ => unreachable!("not an opening delimiter: {b:#04x}"),
        }
    }

    /// Classify a byte the caller has already matched as a closer.
    fn from_close(b: u8) -> Self {
        match b {
            b')' => DelimKind::Paren,
            b'}' => DelimKind::Brace,
            b']' => DelimKind::Bracket,
            _ => unreachable!("not a closing delimiter: {b:#04x}"),
        }
    }
}

/// The scanner's classification of "where we are" in the source.
///
/// Exactly one state is active at any position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexState {
    /// Ordinary code: delimiters count, quotes and comment markers open
    /// their regions.
    Code,
    /// Inside a string or template literal opened by the given quote.
    InString(QuoteKind),
    /// Inside a `//` comment, until the next newline.
    InLineComment,
    /// Inside a `/* ... */` comment, until the close marker.
    InBlockComment,
}

/// A still-open delimiter: where it was opened and what kind it is.
///
/// Pushed only while [`LexState::Code`] is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenDelim {
    /// Byte offset of the opening character.
    pub pos: u32,
    /// Which delimiter kind was opened.
    pub kind: DelimKind,
}

/// Structured result of one scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Stack empty at end of input, no unmatched closer encountered.
    Balanced,
    /// A closing delimiter was seen with an empty or mismatched stack top.
    /// The scan stops at the first such closer.
    UnmatchedCloser {
        /// Byte offset of the offending closer.
        pos: u32,
        /// The kind the closer belongs to.
        found: DelimKind,
        /// The still-open entry the closer failed to match, or `None` if
        /// the stack was empty.
        expected: Option<OpenDelim>,
    },
    /// End of input reached with a non-empty stack: every entry still open,
    /// outermost first.
    UnclosedOpeners {
        /// The surviving stack, in open order.
        openers: Vec<OpenDelim>,
    },
}

impl Verdict {
    /// Returns `true` for [`Verdict::Balanced`].
    pub fn is_balanced(&self) -> bool {
        matches!(self, Verdict::Balanced)
    }

    /// Number of delimiters left open at end of input.
    ///
    /// Zero for [`Verdict::Balanced`]; meaningless (zero) for
    /// [`Verdict::UnmatchedCloser`], where the scan stopped early.
    pub fn open_count(&self) -> usize {
        match self {
            Verdict::UnclosedOpeners { openers } => openers.len(),
            Verdict::Balanced | Verdict::UnmatchedCloser { .. } => 0,
        }
    }
}

/// Single-pass balance scanner.
///
/// Holds no state beyond the cursor, the active [`LexState`], and the
/// delimiter stack; create one per buffer and discard it after
/// [`scan()`](Self::scan).
pub struct BalanceScanner<'a> {
    cursor: Cursor<'a>,
    state: LexState,
    /// Currently-open code-state delimiters, outermost first.
    stack: Vec<OpenDelim>,
}

impl<'a> BalanceScanner<'a> {
    /// Create a scanner positioned at the start of the buffer.
    pub fn new(buffer: &'a SourceBuffer) -> Self {
        Self {
            cursor: buffer.cursor(),
            state: LexState::Code,
            stack: Vec::new(),
        }
    }

    /// Run the scan to completion and produce a [`Verdict`].
    pub fn scan(mut self) -> Verdict {
        while !self.cursor.is_eof() {
            match self.state {
                LexState::Code => {
                    if let Some(verdict) = self.code() {
                        return verdict;
                    }
                }
                LexState::InString(quote) => self.string(quote),
                LexState::InLineComment => self.line_comment(),
                LexState::InBlockComment => self.block_comment(),
            }
        }
        if self.stack.is_empty() {
            Verdict::Balanced
        } else {
            Verdict::UnclosedOpeners {
                openers: self.stack,
            }
        }
    }

    /// Handle the next significant byte in code state.
    ///
    /// Returns `Some` only for the fail-fast case: a closing delimiter with
    /// an empty or mismatched stack top.
    fn code(&mut self) -> Option<Verdict> {
        let b = self.cursor.skip_to_code_delim();
        match b {
            // EOF: the main loop terminates.
            0 => None,
            b'\'' | b'"' | b'`' => {
                self.cursor.advance();
                self.state = LexState::InString(QuoteKind::from_byte(b));
                None
            }
            b'/' => {
                match self.cursor.peek() {
                    b'/' => {
                        self.cursor.advance();
                        self.cursor.advance();
                        self.state = LexState::InLineComment;
                    }
                    b'*' => {
                        self.cursor.advance();
                        self.cursor.advance();
                        self.state = LexState::InBlockComment;
                    }
                    // A lone slash (division, arrow-function bodies, ...) is
                    // inert code.
                    _ => self.cursor.advance(),
                }
                None
            }
            b'(' | b'{' | b'[' => {
                self.stack.push(OpenDelim {
                    pos: self.cursor.pos(),
                    kind: DelimKind::from_open(b),
                });
                self.cursor.advance();
                None
            }
            b')' | b'}' | b']' => {
                let found = DelimKind::from_close(b);
                let pos = self.cursor.pos();
                self.cursor.advance();
                match self.stack.pop() {
                    Some(open) if open.kind == found => None,
                    Some(open) => Some(Verdict::UnmatchedCloser {
                        pos,
                        found,
                        expected: Some(open),
                    }),
                    None => Some(Verdict::UnmatchedCloser {
                        pos,
                        found,
                        expected: None,
                    }),
                }
            }
            _ => unreachable!("skip_to_code_delim returned unexpected byte"),
        }
    }

    /// Consume string content up to the next escape or closing quote.
    fn string(&mut self, quote: QuoteKind) {
        let b = self.cursor.skip_to_string_delim(quote.byte());
        match b {
            // EOF inside an unterminated literal: the literal swallows the
            // rest of the input; any openers on the stack surface at EOF.
            0 => {}
            b'\\' => {
                self.cursor.advance(); // consume '\'
                if self.cursor.current() != 0 || !self.cursor.is_eof() {
                    self.cursor.advance(); // the escaped char is inert, whatever it is
                }
            }
            _ if b == quote.byte() => {
                self.cursor.advance();
                self.state = LexState::Code;
            }
            _ => unreachable!("skip_to_string_delim returned unexpected byte"),
        }
    }

    /// Consume a line comment body; the terminating newline returns to code.
    fn line_comment(&mut self) {
        self.cursor.eat_until_newline_or_eof();
        if self.cursor.current() == b'\n' {
            self.cursor.advance();
            self.state = LexState::Code;
        }
        // At EOF the comment just ends; the main loop terminates.
    }

    /// Consume block-comment content up to `*/`.
    ///
    /// The `/` that completes the close marker is consumed here and never
    /// re-examined, so `/*/` stays an unterminated comment and `*//` does
    /// not re-open one.
    fn block_comment(&mut self) {
        let b = self.cursor.skip_to_star();
        if b == 0 {
            // Unterminated comment: swallows the rest of the input.
            return;
        }
        if self.cursor.peek() == b'/' {
            self.cursor.advance(); // consume '*'
            self.cursor.advance(); // consume '/'
            self.state = LexState::Code;
        } else {
            self.cursor.advance(); // lone '*', still inside the comment
        }
    }
}

/// Scan a buffer and produce a [`Verdict`].
///
/// Convenience wrapper around [`BalanceScanner`].
pub fn scan(buffer: &SourceBuffer) -> Verdict {
    BalanceScanner::new(buffer).scan()
}
