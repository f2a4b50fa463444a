//! Library surface of the `delim` CLI.
//!
//! All scanning and rendering logic lives in [`delim_core`] and
//! [`delim_report`]; this crate owns what neither of them may touch: argv,
//! the filesystem, parallelism across files, and process exit codes. The
//! pipeline per file is explicit (load bytes, build a buffer, run the
//! scanner, render the verdict) with no implicit working-directory
//! assumptions.

pub mod commands;
pub mod discovery;

/// Initialize `tracing` from the `RUST_LOG` environment variable.
///
/// Defaults to `warn` when unset. Instrumentation goes to stderr; scan
/// results never go through the logger.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
