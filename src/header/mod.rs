//! Header cleaning.
//!
//! A header line is split into fields on a literal separator, every field is
//! run through the configured substitutions in order, and the fields are
//! joined back with the same separator.
//!
//! # Example
//!
//! ```ignore
//! let subs = [Substitution::new(".", "")];
//! assert_eq!(clean_header("Name.First|Age.Years", "|", &subs), "NameFirst|AgeYears");
//! ```

use serde::{Deserialize, Serialize};

/// Default column separator.
pub const DEFAULT_SEPARATOR: &str = "|";

// ============================================================================
// Substitution
// ============================================================================

/// A literal find/replace rule applied to each header field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Text to search for. Empty means the rule does nothing.
    #[serde(default)]
    pub find: String,

    /// Replacement text. Missing in config means delete.
    #[serde(default)]
    pub replace: String,
}

impl Substitution {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }

    /// Rules with an empty `find` are skipped.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.find.is_empty()
    }

    /// Replace every non-overlapping occurrence of `find`, left to right.
    #[inline]
    fn apply(&self, field: &str) -> String {
        field.replace(&self.find, &self.replace)
    }
}

// ============================================================================
// HeaderRules
// ============================================================================

/// Separator plus ordered substitutions, i.e. everything needed to clean a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRules {
    pub separator: String,
    pub substitutions: Vec<Substitution>,
}

impl Default for HeaderRules {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            substitutions: Vec::new(),
        }
    }
}

impl HeaderRules {
    pub fn new(separator: impl Into<String>, substitutions: Vec<Substitution>) -> Self {
        Self {
            separator: separator.into(),
            substitutions,
        }
    }

    /// Number of rules that will actually change text.
    pub fn active_count(&self) -> usize {
        self.substitutions.iter().filter(|s| !s.is_noop()).count()
    }

    pub fn clean(&self, header: &str) -> String {
        clean_header(header, &self.separator, &self.substitutions)
    }

    pub fn clean_lines(&self, lines: &[String]) -> Vec<String> {
        clean_first_line(lines, &self.separator, &self.substitutions)
    }
}

// ============================================================================
// Cleaning
// ============================================================================

/// Clean a header line field by field.
///
/// Returns `header` untouched when there are no substitutions. An empty
/// separator leaves the header as a single field.
pub fn clean_header(header: &str, separator: &str, substitutions: &[Substitution]) -> String {
    if substitutions.is_empty() {
        return header.to_string();
    }

    // `str::split("")` yields one entry per char plus empty ends.
    if separator.is_empty() {
        return clean_field(header, substitutions);
    }

    header
        .split(separator)
        .map(|field| clean_field(field, substitutions))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Apply every non-empty substitution to a single field, in order.
fn clean_field(field: &str, substitutions: &[Substitution]) -> String {
    substitutions
        .iter()
        .filter(|s| !s.is_noop())
        .fold(field.to_string(), |acc, s| s.apply(&acc))
}

/// Clean the first line of `lines` and copy the rest.
///
/// The input is left as-is; an empty input gives an empty output.
pub fn clean_first_line(
    lines: &[String],
    separator: &str,
    substitutions: &[Substitution],
) -> Vec<String> {
    let Some((header, rest)) = lines.split_first() else {
        return Vec::new();
    };

    let mut cleaned = Vec::with_capacity(lines.len());
    cleaned.push(clean_header(header, separator, substitutions));
    cleaned.extend(rest.iter().cloned());
    cleaned
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(pairs: &[(&str, &str)]) -> Vec<Substitution> {
        pairs.iter().map(|(f, r)| Substitution::new(*f, *r)).collect()
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_rules_is_identity() {
        let header = "Name.First|Age.Years|City.Location";
        assert_eq!(clean_header(header, "|", &[]), header);

        // Separator is not normalized either
        assert_eq!(clean_header("a||b|", ",", &[]), "a||b|");
        assert_eq!(clean_header("", "", &[]), "");
    }

    #[test]
    fn test_dot_removal() {
        let result = clean_header("Name.First|Age.Years|City.Location", "|", &subs(&[(".", "")]));
        assert_eq!(result, "NameFirst|AgeYears|CityLocation");
    }

    #[test]
    fn test_dot_removal_is_idempotent() {
        let rules = subs(&[(".", "")]);
        let once = clean_header("a.b..c|.d.|e", "|", &rules);
        let twice = clean_header(&once, "|", &rules);
        assert_eq!(once, "abc|d|e");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_multiple_rules() {
        let rules = subs(&[(".", ""), (" ", "_"), ("-", "_")]);
        let result = clean_header("Name.First|Age Years|City-Location", "|", &rules);
        assert_eq!(result, "NameFirst|Age_Years|City_Location");
    }

    #[test]
    fn test_special_characters() {
        let rules = subs(&[("#", "_"), ("%", "Percent"), ("&", "And")]);
        let result = clean_header("Name#1|Age%Value|City&County", "|", &rules);
        assert_eq!(result, "Name_1|AgePercentValue|CityAndCounty");
    }

    #[test]
    fn test_comma_separator() {
        let result = clean_header("Name.First,Age.Years", ",", &subs(&[(".", "_")]));
        assert_eq!(result, "Name_First,Age_Years");
    }

    #[test]
    fn test_multichar_separator() {
        let result = clean_header("a.b::c.d", "::", &subs(&[(".", "")]));
        assert_eq!(result, "ab::cd");
    }

    #[test]
    fn test_rules_apply_in_order() {
        let rules = subs(&[("a", "b"), ("b", "c")]);
        assert_eq!(clean_header("a", "|", &rules), "c");

        // Reversed order: "b"->"c" runs first and finds nothing
        let reversed = subs(&[("b", "c"), ("a", "b")]);
        assert_eq!(clean_header("a", "|", &reversed), "b");
    }

    #[test]
    fn test_empty_find_is_skipped() {
        let rules = subs(&[("", "X"), (".", "")]);
        assert_eq!(clean_header("Name.First|Age.Years", "|", &rules), "NameFirst|AgeYears");

        let interleaved = subs(&[(".", "-"), ("", "X"), ("-", "_")]);
        assert_eq!(clean_header("a.b", "|", &interleaved), "a_b");
    }

    #[test]
    fn test_only_empty_find_rules() {
        let rules = subs(&[("", "X"), ("", "")]);
        assert_eq!(clean_header("a.b|c", "|", &rules), "a.b|c");
    }

    #[test]
    fn test_non_overlapping_replacement() {
        assert_eq!(clean_header("aaa", "|", &subs(&[("aa", "b")])), "ba");
        assert_eq!(clean_header("aaaa", "|", &subs(&[("aa", "b")])), "bb");
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        // Inserted text containing the pattern is not replaced again
        assert_eq!(clean_header("a", "|", &subs(&[("a", "aa")])), "aa");
        assert_eq!(clean_header("x.y", "|", &subs(&[(".", "..")])), "x..y");
    }

    #[test]
    fn test_field_isolation() {
        // Rule spanning a field boundary never matches
        assert_eq!(clean_header("a|b", "|", &subs(&[("a|b", "X")])), "a|b");
        // Rule output containing the separator is kept verbatim
        assert_eq!(clean_header("a.b|c", "|", &subs(&[(".", "|")])), "a|b|c");
    }

    #[test]
    fn test_header_without_separator() {
        assert_eq!(clean_header("Name.First", "|", &subs(&[(".", "")])), "NameFirst");
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(clean_header("", "|", &subs(&[(".", "")])), "");
    }

    #[test]
    fn test_empty_fields_preserved() {
        assert_eq!(clean_header("|a.b||", "|", &subs(&[(".", "")])), "|ab||");
    }

    #[test]
    fn test_empty_separator_single_field() {
        assert_eq!(clean_header("a.b|c.d", "", &subs(&[(".", "")])), "ab|cd");
        assert_eq!(clean_header("", "", &subs(&[(".", "")])), "");
    }

    #[test]
    fn test_clean_first_line_only_header() {
        let input = lines(&["Name.First|Age.Years", "John|25", "Jane.Doe|25.0"]);
        let result = clean_first_line(&input, "|", &subs(&[(".", "_")]));
        assert_eq!(result, lines(&["Name_First|Age_Years", "John|25", "Jane.Doe|25.0"]));

        // Input is left untouched
        assert_eq!(input[0], "Name.First|Age.Years");
    }

    #[test]
    fn test_clean_first_line_empty() {
        assert!(clean_first_line(&[], "|", &subs(&[(".", "")])).is_empty());
        assert!(clean_first_line(&[], "", &[]).is_empty());
    }

    #[test]
    fn test_clean_first_line_single_line() {
        let result = clean_first_line(&lines(&["a.b"]), "|", &subs(&[(".", "")]));
        assert_eq!(result, lines(&["ab"]));
    }

    #[test]
    fn test_header_rules_defaults() {
        let rules = HeaderRules::default();
        assert_eq!(rules.separator, "|");
        assert!(rules.substitutions.is_empty());
        assert_eq!(rules.clean("a.b|c"), "a.b|c");
    }

    #[test]
    fn test_header_rules_active_count() {
        let rules = HeaderRules::new("|", subs(&[("", "x"), (".", ""), (" ", "_")]));
        assert_eq!(rules.active_count(), 2);
        assert_eq!(rules.clean("a.b c|d"), "ab_c|d");
        assert_eq!(
            rules.clean_lines(&lines(&["a.b", "c.d"])),
            lines(&["ab", "c.d"])
        );
    }

    #[test]
    fn test_substitution_missing_replace_deserializes_empty() {
        let sub: Substitution = serde_json::from_str(r#"{"find": "."}"#).unwrap();
        assert_eq!(sub, Substitution::new(".", ""));
    }
}
