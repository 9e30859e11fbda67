//! Filesystem path helpers for user-supplied directories.

use std::path::{Path, PathBuf};

/// Absolute form of `path`, with symlinks resolved when it exists.
///
/// A path that cannot be canonicalized (usually because it does not exist
/// yet) is joined onto the working directory instead, so later checks can
/// still report it by its full name.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    }
}

/// Expand a leading `~` to the home directory.
///
/// Non UTF-8 paths are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}
