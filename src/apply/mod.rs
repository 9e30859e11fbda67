//! Apply header rules to files on disk.
//!
//! Every call reads the whole file, cleans the first line, and rewrites the
//! file only when the header actually changed. The result is returned as an
//! [`ApplyReport`]; printing is left to the caller.

mod text;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::header::{HeaderRules, Substitution, clean_header};

pub use text::{LineEnding, TextFile, write_atomic};

// ============================================================================
// Types
// ============================================================================

/// Whether a changed header is written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplyMode {
    #[default]
    Write,
    DryRun,
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// File has no lines; nothing to clean.
    Empty,
    /// Header already matches the cleaned form.
    Unchanged,
    /// Header differs from its cleaned form. Written unless in dry-run mode.
    Updated { original: String, cleaned: String },
}

impl ApplyOutcome {
    pub const fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Unchanged => "unchanged",
            Self::Updated { .. } => "updated",
        }
    }
}

impl fmt::Display for ApplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub path: PathBuf,
    pub outcome: ApplyOutcome,
}

/// Per-file I/O failure.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("failed to read `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApplyError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Clean the header of `path` in place.
pub fn apply_to_file(
    path: &Path,
    separator: &str,
    substitutions: &[Substitution],
) -> Result<ApplyReport, ApplyError> {
    process_file(path, separator, substitutions, ApplyMode::Write)
}

/// Same as [`apply_to_file`] but never writes.
pub fn preview_file(
    path: &Path,
    separator: &str,
    substitutions: &[Substitution],
) -> Result<ApplyReport, ApplyError> {
    process_file(path, separator, substitutions, ApplyMode::DryRun)
}

/// Run `rules` against `path` in the given mode.
pub fn apply_rules(
    path: &Path,
    rules: &HeaderRules,
    mode: ApplyMode,
) -> Result<ApplyReport, ApplyError> {
    process_file(path, &rules.separator, &rules.substitutions, mode)
}

/// Compute the outcome for an in-memory line sequence.
pub fn outcome_for_lines(
    lines: &[String],
    separator: &str,
    substitutions: &[Substitution],
) -> ApplyOutcome {
    let Some(original) = lines.first() else {
        return ApplyOutcome::Empty;
    };

    let cleaned = clean_header(original, separator, substitutions);
    if &cleaned == original {
        ApplyOutcome::Unchanged
    } else {
        ApplyOutcome::Updated {
            original: original.clone(),
            cleaned,
        }
    }
}

fn process_file(
    path: &Path,
    separator: &str,
    substitutions: &[Substitution],
    mode: ApplyMode,
) -> Result<ApplyReport, ApplyError> {
    let mut text = TextFile::read(path).map_err(|source| ApplyError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = outcome_for_lines(&text.lines, separator, substitutions);

    if let ApplyOutcome::Updated { cleaned, .. } = &outcome
        && mode == ApplyMode::Write
    {
        text.lines[0] = cleaned.clone();
        text.write_atomic(path).map_err(|source| ApplyError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(ApplyReport {
        path: path.to_path_buf(),
        outcome,
    })
}

// ============================================================================
// tests
// ============================================================================
