//! Zero-cost cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. EOF is detected
//! when the current byte equals the sentinel (`0x00`) and the position
//! has reached or exceeded the source length. No explicit bounds checking
//! is performed in the common case -- the sentinel guarantees safe
//! termination.
//!
//! # Interior Null Bytes
//!
//! If the source contains interior null bytes (U+0000), the cursor
//! distinguishes them from EOF by comparing `pos` against `source_len`.
//! A null at `pos < source_len` is an interior null (inert content);
//! a null at `pos >= source_len` is the sentinel (EOF).
//!
//! The `skip_to_*` methods jump straight to the next lexically significant
//! byte of a region using memchr, so the scanner never walks ordinary
//! content one byte at a time.

/// Returns the earliest (minimum) of two optional positions.
///
/// Used by the memchr-based scanning methods to combine results from
/// separate memchr calls when we need to search for more bytes than
/// `memchr3` supports (which handles at most 3 needles).
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Zero-cost cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], enabling cheap state snapshots.
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00` (cache-line padding). This is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
/// &[u8] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00` (sentinel). All bytes after the
    /// sentinel must also be `0x00` (padding). This is guaranteed by
    /// `SourceBuffer::new()`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` when at EOF (the sentinel byte). Interior null bytes
    /// also return `0x00`; use [`is_eof()`](Self::is_eof) to distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe to call at any position: the sentinel and cache-line padding
    /// guarantee valid reads beyond the source content.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Returns `true` if the cursor has reached EOF.
    ///
    /// EOF is when the current byte is the sentinel (`0x00`) and the
    /// position is at or past the source length. This distinguishes
    /// EOF from interior null bytes.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// The bytes from the current position to the end of source content.
    #[inline]
    fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos as usize..self.source_len as usize]
    }

    /// Position the cursor `offset` bytes ahead, or at EOF if `offset` is
    /// `None`, and return the byte found (0 for EOF).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are within source_len which fits in u32"
    )]
    #[inline]
    fn land_on(&mut self, offset: Option<usize>) -> u8 {
        if let Some(off) = offset {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance past inert code content to the next byte that can change
    /// lexical state or nesting. Returns the byte found, or 0 for EOF.
    ///
    /// "Interesting" bytes in code: the six delimiters `( ) { } [ ]`, the
    /// three quotes `' "` backtick, and `/` (potential comment opener).
    /// Ten needles total, combined from four memchr sweeps.
    pub fn skip_to_code_delim(&mut self) -> u8 {
        let remaining = self.remaining();
        let openers = memchr::memchr3(b'(', b'{', b'[', remaining);
        let closers = memchr::memchr3(b')', b'}', b']', remaining);
        let quotes = memchr::memchr3(b'\'', b'"', b'`', remaining);
        let slash = memchr::memchr(b'/', remaining);

        let offset = earliest_of(earliest_of(openers, closers), earliest_of(quotes, slash));
        self.land_on(offset)
    }

    /// Advance past ordinary string content to the next interesting byte.
    /// Returns the byte found, or 0 for EOF.
    ///
    /// "Interesting" bytes inside a string literal are its own quote
    /// character and `\` (escape). Everything else is inert, including
    /// newlines, delimiters, and the other two quote characters.
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        let offset = memchr::memchr2(quote, b'\\', self.remaining());
        self.land_on(offset)
    }

    /// Advance to the next `*` (potential block-comment close) or EOF.
    /// Returns the byte found, or 0 for EOF.
    pub fn skip_to_star(&mut self) -> u8 {
        let offset = memchr::memchr(b'*', self.remaining());
        self.land_on(offset)
    }

    /// Advance to the next `\n` byte or EOF.
    ///
    /// Used to skip line-comment bodies. Scans only within source content
    /// (not into sentinel/padding). If no newline is found, positions the
    /// cursor at the EOF sentinel.
    pub fn eat_until_newline_or_eof(&mut self) {
        let offset = memchr::memchr(b'\n', self.remaining());
        self.land_on(offset);
    }
}
