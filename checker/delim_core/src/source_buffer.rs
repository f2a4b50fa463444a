//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing the scanner to detect end of input without explicit bounds
//! checking. The total buffer size is rounded up to the next 64-byte
//! boundary, which also provides safe padding for `peek()` near the end of
//! the buffer.
//!
//! # Encoding
//!
//! [`SourceBuffer::new`] accepts `&str` and cannot fail. [`SourceBuffer::from_bytes`]
//! accepts raw file contents and rejects anything that is not valid UTF-8,
//! including UTF-16 byte-order marks (a common way to hand the scanner a
//! file in the wrong encoding). Rejection is an [`EncodingError`], never a
//! [`Verdict`](crate::Verdict): an undecodable buffer is a precondition
//! violation, not a balance defect.
//!
//! A UTF-8 BOM is valid UTF-8 and is accepted; the scanner treats it as
//! inert code content. Interior null bytes are likewise allowed -- the
//! cursor distinguishes them from the sentinel by position.

use std::fmt;

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Rejection reason for byte input that cannot be scanned as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingError {
    /// The bytes are not valid UTF-8. `valid_up_to` is the length of the
    /// longest valid prefix, as reported by the UTF-8 validator.
    InvalidUtf8 { valid_up_to: usize },
    /// UTF-16 Little-Endian BOM (`0xFF 0xFE`) at start. Wrong encoding.
    Utf16LeBom,
    /// UTF-16 Big-Endian BOM (`0xFE 0xFF`) at start. Wrong encoding.
    Utf16BeBom,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidUtf8 { valid_up_to } => {
                write!(f, "invalid UTF-8 after byte {valid_up_to}")
            }
            EncodingError::Utf16LeBom => {
                write!(f, "input is UTF-16 (little-endian BOM), expected UTF-8")
            }
            EncodingError::Utf16BeBom => {
                write!(f, "input is UTF-16 (big-endian BOM), expected UTF-8")
            }
        }
    }
}

impl std::error::Error for EncodingError {}

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
///
/// The sentinel byte at `source_len` is always `0x00`. All subsequent bytes
/// (cache-line padding) are also `0x00`, ensuring safe reads for `peek()`
/// near the end of the buffer.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from source text.
    ///
    /// Copies the source bytes into a cache-line-aligned buffer with a
    /// `0x00` sentinel byte appended.
    ///
    /// # Buffer Size
    ///
    /// Sources larger than `u32::MAX` bytes (~4 GiB) are accepted but
    /// `source_len` saturates at `u32::MAX`; callers that may see such
    /// inputs should size-check upstream.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Allocate zero-filled buffer, then copy source bytes.
        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        let source_len = u32::try_from(source_len).unwrap_or(u32::MAX);

        Self { buf, source_len }
    }

    /// Create a buffer from raw bytes, validating the encoding.
    ///
    /// Checks for UTF-16 BOMs before UTF-8 validation so that a UTF-16 file
    /// gets a "wrong encoding" error instead of an opaque "invalid UTF-8 at
    /// byte 1".
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        if bytes.starts_with(&[0xFF, 0xFE]) {
            return Err(EncodingError::Utf16LeBom);
        }
        if bytes.starts_with(&[0xFE, 0xFF]) {
            return Err(EncodingError::Utf16BeBom);
        }
        match std::str::from_utf8(bytes) {
            Ok(source) => Ok(Self::new(source)),
            Err(e) => Err(EncodingError::InvalidUtf8 {
                valid_up_to: e.valid_up_to(),
            }),
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Returns the full buffer including sentinel and cache-line padding.
    ///
    /// The byte at index [`len()`](Self::len) is the sentinel (`0x00`).
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the source content as `&str`.
    #[allow(
        unsafe_code,
        reason = "buffer is only ever constructed from validated UTF-8"
    )]
    pub fn as_str(&self) -> &str {
        // SAFETY: Both constructors start from `&str` (UTF-8 validated), and
        // the buffer is immutable afterwards.
        unsafe { std::str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

/// Size assertion: `SourceBuffer` should stay pointer-sized-small.
/// Vec<u8> = 24, u32 = 4, + 4 padding = 32 bytes on 64-bit platforms.
const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 32);

#[cfg(test)]
mod tests;
