//! Command handlers for the delim CLI.
//!
//! Each submodule implements a specific CLI command; `main.rs` parses argv
//! and dispatches here. Handlers return process exit codes instead of
//! exiting, so they stay testable.

mod check;

pub use check::{check_paths, CheckOptions};
