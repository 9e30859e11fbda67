//! Target file discovery.
//!
//! Walks the target directory (optionally recursively) and returns every
//! regular file whose name matches the configured wildcard pattern, sorted by
//! path. Dot-files and dot-directories are included like any other entry.

mod pattern;

use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use thiserror::Error;

pub use pattern::FilePattern;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("target directory `{}` does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("target `{}` is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("file pattern is empty")]
    EmptyPattern,

    #[error("file pattern `{0}` must be a file name, not a path")]
    PatternHasSeparator(String),

    #[error("invalid file pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Collect files under `root` matching `pattern`.
///
/// With `recursive = false` only direct children of `root` are considered.
pub fn collect_files(
    root: &Path,
    pattern: &FilePattern,
    recursive: bool,
) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::MissingDirectory(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root).sort(true).skip_hidden(false);
    let walker = if recursive { walker } else { walker.max_depth(1) };

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            pattern.matches(name)
        })
        .map(|e| e.path())
        .collect();

    files.sort();
    Ok(files)
}
