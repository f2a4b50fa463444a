//! The `check` command: scan files for delimiter balance defects.
//!
//! Pipeline per file: read bytes → decode into a [`SourceBuffer`] → run the
//! balance scanner → convert the verdict to diagnostics. Files are scanned
//! in parallel (each scan owns its state), then rendered sequentially so
//! diagnostics never interleave.
//!
//! Exit codes: `0` all files balanced, `1` any balance or encoding defect,
//! `2` unusable input (missing path, unreadable file, nothing to scan).

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;

use delim_core::{scan, SourceBuffer};
use delim_report::emitter::{
    stderr_emitter, ColorMode, DiagnosticEmitter, JsonEmitter,
};
use delim_report::{malformed_encoding, verdict_to_diagnostics, Diagnostic};
use rayon::prelude::*;

use crate::discovery;

/// Flags accepted by `delim check`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckOptions {
    /// Emit machine-readable JSON to stdout instead of terminal output.
    pub json: bool,
    /// Color handling for terminal output.
    pub color: ColorMode,
    /// Suppress the all-clear line and the closing summary.
    pub quiet: bool,
}

/// Everything learned about one file, produced in parallel and rendered
/// sequentially.
struct FileOutcome {
    path: PathBuf,
    /// Decoded source, for snippet rendering. `None` when the file could
    /// not be read or decoded.
    source: Option<String>,
    diagnostics: Vec<Diagnostic>,
    /// I/O failure message, when the file could not be read at all.
    io_error: Option<String>,
}

/// Scan every file reachable from `paths` and render a report.
///
/// Returns the process exit code.
pub fn check_paths(paths: &[String], options: &CheckOptions) -> i32 {
    let files = match discovery::collect_files(paths) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    if files.is_empty() {
        eprintln!("error: no source files found under the given paths");
        return 2;
    }

    let started = Instant::now();
    let outcomes: Vec<FileOutcome> = files.par_iter().map(|path| scan_file(path)).collect();
    tracing::debug!(
        files = outcomes.len(),
        elapsed = ?started.elapsed(),
        "scan finished"
    );

    let defect_count: usize = outcomes.iter().map(|o| o.diagnostics.len()).sum();
    let io_error_count = outcomes.iter().filter(|o| o.io_error.is_some()).count();

    if options.json {
        render_json(&outcomes);
    } else {
        render_terminal(&outcomes, options, defect_count);
    }

    for outcome in &outcomes {
        if let Some(message) = &outcome.io_error {
            eprintln!("error: {message}");
        }
    }

    if io_error_count > 0 {
        2
    } else if defect_count > 0 {
        1
    } else {
        0
    }
}

/// Read, decode, and scan one file. Never panics: every failure mode ends
/// up in the outcome.
fn scan_file(path: &Path) -> FileOutcome {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return FileOutcome {
                path: path.to_path_buf(),
                source: None,
                diagnostics: Vec::new(),
                io_error: Some(describe_io_error(path, &e)),
            }
        }
    };

    match SourceBuffer::from_bytes(&bytes) {
        Ok(buf) => {
            let verdict = scan(&buf);
            let diagnostics = verdict_to_diagnostics(&verdict, buf.len());
            FileOutcome {
                path: path.to_path_buf(),
                source: Some(buf.as_str().to_owned()),
                diagnostics,
                io_error: None,
            }
        }
        Err(encoding) => FileOutcome {
            path: path.to_path_buf(),
            source: None,
            diagnostics: vec![malformed_encoding(&encoding)],
            io_error: None,
        },
    }
}

/// Human-readable rendering: one emitter per defective file (it carries
/// that file's source for snippets), then a summary.
fn render_terminal(outcomes: &[FileOutcome], options: &CheckOptions, defect_count: usize) {
    let is_tty = std::io::stderr().is_terminal();

    for outcome in outcomes {
        if outcome.diagnostics.is_empty() {
            continue;
        }
        let path = outcome.path.display().to_string();
        let mut emitter = stderr_emitter(options.color, is_tty).with_file_path(&path);
        if let Some(source) = &outcome.source {
            emitter = emitter.with_source(source);
        }
        emitter.emit_all(&outcome.diagnostics);
        emitter.flush();
    }

    if options.quiet {
        return;
    }
    if defect_count > 0 {
        let mut emitter = stderr_emitter(options.color, is_tty);
        emitter.emit_summary(defect_count, 0);
        emitter.flush();
    } else {
        let scanned = outcomes.len();
        let files = if scanned == 1 { "file" } else { "files" };
        println!("OK: {scanned} {files} scanned, all delimiters balanced");
    }
}

/// Machine-readable rendering: a single JSON array over all files.
fn render_json(outcomes: &[FileOutcome]) {
    let stdout = std::io::stdout();
    let mut emitter = JsonEmitter::new(stdout.lock());
    emitter.begin();
    for outcome in outcomes {
        if outcome.diagnostics.is_empty() {
            continue;
        }
        let path = outcome.path.display().to_string();
        emitter.set_context(&path, outcome.source.as_deref());
        emitter.emit_all(&outcome.diagnostics);
    }
    emitter.end();
    emitter.flush();
}

/// Map an I/O failure to the message shown to the user.
fn describe_io_error(path: &Path, error: &std::io::Error) -> String {
    let path = path.display();
    match error.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => {
            format!("permission denied reading '{path}'")
        }
        _ => format!("error reading '{path}': {error}"),
    }
}
