//! `[processing]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [processing]
//! target_directory = "exports"    # Directory to scan (relative to the config file)
//! file_pattern = "*.csv"          # File name wildcard (`*`, `?`)
//! include_subdirectories = true   # Recurse into subdirectories
//! column_separator = "|"          # Literal field separator
//!
//! [[processing.replacements]]
//! find = "."
//! replace = ""
//! ```
//!
//! Replacements run in the order they are listed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::header::{DEFAULT_SEPARATOR, HeaderRules, Substitution};
use crate::scan::FilePattern;

/// Default file name pattern.
pub const DEFAULT_FILE_PATTERN: &str = "*.csv";

/// Header processing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Directory holding the files to clean.
    pub target_directory: PathBuf,

    /// Wildcard matched against file names.
    pub file_pattern: String,

    /// Recurse into subdirectories.
    pub include_subdirectories: bool,

    /// Literal separator between header fields.
    pub column_separator: String,

    /// Ordered find/replace rules.
    pub replacements: Vec<Substitution>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            target_directory: PathBuf::new(),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            include_subdirectories: true,
            column_separator: DEFAULT_SEPARATOR.to_string(),
            replacements: Vec::new(),
        }
    }
}

/// Field paths of `[processing]`, for diagnostics.
pub struct ProcessingFields {
    pub target_directory: FieldPath,
    pub file_pattern: FieldPath,
    pub include_subdirectories: FieldPath,
    pub column_separator: FieldPath,
    pub replacements: FieldPath,
}

impl ProcessingConfig {
    pub const FIELDS: ProcessingFields = ProcessingFields {
        target_directory: FieldPath::new("processing.target_directory"),
        file_pattern: FieldPath::new("processing.file_pattern"),
        include_subdirectories: FieldPath::new("processing.include_subdirectories"),
        column_separator: FieldPath::new("processing.column_separator"),
        replacements: FieldPath::new("processing.replacements"),
    };

    /// Rules for the header transformer.
    pub fn rules(&self) -> HeaderRules {
        HeaderRules::new(self.column_separator.clone(), self.replacements.clone())
    }

    /// Compile the file pattern.
    pub fn pattern(&self) -> Result<FilePattern, crate::scan::ScanError> {
        FilePattern::new(&self.file_pattern)
    }

    /// Validate the rules (separator and replacements).
    pub fn validate_rules(&self, diag: &mut ConfigDiagnostics) {
        if self.column_separator.is_empty() {
            diag.error_with_hint(
                Self::FIELDS.column_separator.clone(),
                "separator must not be empty",
                format!("use the delimiter of your files, e.g. `column_separator = \"{DEFAULT_SEPARATOR}\"`"),
            );
        }

        if self.replacements.is_empty() {
            diag.warn(
                Self::FIELDS.replacements.clone(),
                "no replacement rules configured, headers will not be modified",
            );
        }

        for (i, rule) in self.replacements.iter().enumerate() {
            if rule.is_noop() {
                diag.warn(
                    FieldPath::indexed(&Self::FIELDS.replacements, i, "find"),
                    "empty `find`, rule is skipped",
                );
            }
        }
    }

    /// Validate everything a directory run needs.
    ///
    /// `target_directory` must already be resolved against the project root.
    pub fn validate_for_run(&self, diag: &mut ConfigDiagnostics) {
        self.validate_rules(diag);

        if let Err(e) = self.pattern() {
            diag.error_with_hint(
                Self::FIELDS.file_pattern.clone(),
                e.to_string(),
                "use a file name wildcard such as `*.csv`",
            );
        }

        if self.target_directory.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.target_directory.clone(),
                "target directory is not configured",
                "set `target_directory` or pass a directory on the command line",
            );
        } else if !self.target_directory.is_dir() {
            diag.error(
                Self::FIELDS.target_directory.clone(),
                format!(
                    "directory does not exist: {}",
                    self.target_directory.display()
                ),
            );
        }
    }

    /// Resolve `target_directory` against `root`, expanding a leading `~`.
    pub fn normalize(&mut self, root: &Path) {
        if self.target_directory.as_os_str().is_empty() {
            return;
        }
        let expanded = crate::utils::path::expand_tilde(&self.target_directory);
        self.target_directory = crate::utils::path::normalize_path(&root.join(expanded));
    }
}
