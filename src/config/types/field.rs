//! Config field path used in diagnostics.

use owo_colors::OwoColorize;
use std::borrow::Cow;
use std::fmt;

/// Dotted path of a config field, e.g. `processing.column_separator`.
///
/// Static paths come from the section's `FIELDS` constants; indexed paths
/// (`processing.replacements[2].find`) are built at validation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path of an element inside a list field.
    pub fn indexed(list: &FieldPath, index: usize, field: &str) -> Self {
        Self(Cow::Owned(format!("{}[{index}].{field}", list.as_str())))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_path() {
        let list = FieldPath::new("processing.replacements");
        let path = FieldPath::indexed(&list, 2, "find");
        assert_eq!(path.as_str(), "processing.replacements[2].find");
    }
}
