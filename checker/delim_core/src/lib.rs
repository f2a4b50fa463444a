//! Delimiter balance verification for JavaScript/TypeScript-family sources.
//!
//! The scanner walks a source buffer once, classifying every byte as code,
//! string/template-literal content, or comment content, and maintains a
//! nesting stack for `()`, `{}`, `[]` while in code. String and comment
//! content is opaque: a `}` inside a string literal never touches the stack.
//!
//! The result of a scan is a [`Verdict`]: balanced, the first unmatched
//! closing delimiter, or the delimiters still open at end of input.
//!
//! ```
//! use delim_core::{scan, SourceBuffer, Verdict};
//!
//! let buf = SourceBuffer::new("let s = \"}{)(\";");
//! assert_eq!(scan(&buf), Verdict::Balanced);
//! ```
//!
//! Scanning is pure and allocation-bounded by nesting depth; each scan owns
//! its state, so callers may scan many buffers in parallel freely.

mod cursor;
mod scanner;
mod source_buffer;

pub use cursor::Cursor;
pub use scanner::{scan, BalanceScanner, DelimKind, LexState, OpenDelim, QuoteKind, Verdict};
pub use source_buffer::{EncodingError, SourceBuffer};
