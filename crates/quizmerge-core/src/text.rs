//! Text normalization and shared line markers.

use std::sync::LazyLock;

use regex::Regex;

/// A line (left-trimmed) that begins with `<integer>.`.
static NUMBER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("number marker pattern is valid"));

/// Collapse every run of whitespace to a single space and trim both ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The key used to compare question texts for duplicates: trimmed and
/// lowercased, with inner spacing left as-is.
///
/// Scanned questions are already whitespace-normalized, so only stored text
/// can differ in inner spacing. Never stored; only used for equality.
pub fn duplicate_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Returns `true` if the line opens with a question number like `12.`.
pub(crate) fn starts_with_number(line: &str) -> bool {
    NUMBER_MARKER.is_match(line.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(
            normalize_whitespace("  What \t is\n\n AI?  "),
            "What is AI?"
        );
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \t "), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for s in ["a  b", "\u{00a0}x\u{2003}y ", "Überprüfung   der  KI", "plain"] {
            let once = normalize_whitespace(s);
            assert_eq!(normalize_whitespace(&once), once);
        }
    }

    #[test]
    fn duplicate_key_flattens_case() {
        assert_eq!(duplicate_key("  What IS AI? "), "what is ai?");
        assert_eq!(duplicate_key("What is AI?"), duplicate_key("WHAT IS AI?\n"));
    }

    #[test]
    fn duplicate_key_keeps_inner_spacing() {
        assert_eq!(duplicate_key("What  is AI?"), "what  is ai?");
        assert_ne!(duplicate_key("What  is AI?"), duplicate_key("What is AI?"));
    }

    #[test]
    fn number_marker() {
        assert!(starts_with_number("12. (1 pt) text"));
        assert!(starts_with_number("   3.foo"));
        assert!(!starts_with_number("a. option"));
        assert!(!starts_with_number("12 no period"));
    }
}
