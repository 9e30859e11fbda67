//! Wildcard file-name patterns (`*.csv`, `export_??.txt`).
//!
//! `*` matches any run of characters, `?` exactly one. Everything else is
//! literal. Matching is against the file name only and ignores ASCII case.

use regex::Regex;

use super::ScanError;

#[derive(Debug, Clone)]
pub struct FilePattern {
    source: String,
    regex: Regex,
}

impl FilePattern {
    /// Compile a wildcard pattern.
    pub fn new(pattern: &str) -> Result<Self, ScanError> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(ScanError::EmptyPattern);
        }
        if trimmed.contains(['/', '\\']) {
            return Err(ScanError::PatternHasSeparator(trimmed.to_string()));
        }

        let regex = Regex::new(&wildcard_to_regex(&trimmed.to_ascii_lowercase())).map_err(
            |source| ScanError::InvalidPattern {
                pattern: trimmed.to_string(),
                source,
            },
        )?;

        Ok(Self {
            source: trimmed.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(&file_name.to_ascii_lowercase())
    }
}

/// Translate wildcards into an anchored regex.
fn wildcard_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');

    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    out.push_str(&regex::escape(&literal));

    out.push('$');
    out
}
