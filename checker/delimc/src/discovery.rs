//! Source file discovery.
//!
//! Resolves the paths given on the command line into the list of files to
//! scan. Files are taken as-is; directories are walked recursively with a
//! JS/TS-family extension filter, skipping vendored and generated trees
//! (`node_modules`, `dist`, ...) and hidden directories.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions scanned when walking a directory.
///
/// Explicitly named files bypass this filter.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "cjs", "mjs"];

/// Directory names never worth descending into: vendored or generated trees.
const SKIP_DIRS: &[&str] = &["node_modules", "dist", "dist-electron", "coverage", "build"];

/// A command-line path that resolved to nothing scannable.
#[derive(Debug)]
pub struct DiscoveryError {
    pub path: PathBuf,
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot find path '{}'", self.path.display())
    }
}

impl std::error::Error for DiscoveryError {}

/// Resolve command-line paths into a sorted, deduplicated file list.
///
/// A path naming a file is included verbatim (whatever its extension); a
/// path naming a directory is walked recursively. A path naming neither is
/// an error; silently scanning nothing would report "balanced" for a typo.
pub fn collect_files(paths: &[String]) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut files = Vec::new();
    for raw in paths {
        let path = Path::new(raw);
        if path.is_dir() {
            walk_dir(path, &mut files);
        } else if path.is_file() {
            files.push(path.to_path_buf());
        } else {
            return Err(DiscoveryError {
                path: path.to_path_buf(),
            });
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Recursively collect source files under `dir`.
///
/// Unreadable subdirectories are skipped rather than failing the whole
/// run; the skip is visible at debug level.
fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "skipping unreadable directory");
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if path.is_dir() {
            if name.starts_with('.') || SKIP_DIRS.contains(&name.as_ref()) {
                tracing::debug!(dir = %path.display(), "skipping excluded directory");
                continue;
            }
            walk_dir(&path, files);
        } else if is_source_file(&path) {
            files.push(path);
        }
    }
}

/// Whether a walked file has a scannable extension.
fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
