//! Diagnostic rendering for balance-scan verdicts.
//!
//! [`delim_core`] produces structured [`Verdict`](delim_core::Verdict)s with
//! raw byte offsets; this crate turns them into span-labelled, coded,
//! human-phrased [`Diagnostic`]s and renders those through emitters:
//!
//! - [`TerminalEmitter`](emitter::TerminalEmitter): colored, `file:line:col`
//!   output with source snippets.
//! - [`JsonEmitter`](emitter::JsonEmitter): machine-readable output for
//!   tooling.
//!
//! Diagnostics may carry repair suggestions ("insert a closing `)`"), but
//! rendering is as far as repair goes: nothing in this crate or below it
//! ever rewrites an input.

pub mod diagnostic;
pub mod emitter;
mod line_index;
mod span;

pub use diagnostic::{
    malformed_encoding, unclosed_delimiter, unmatched_closer, verdict_to_diagnostics, Diagnostic,
    ErrorCode, Label, Severity, Suggestion,
};
pub use line_index::LineIndex;
pub use span::Span;
