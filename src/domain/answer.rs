//! Guess/answer text comparison.
//!
//! The verification authority stores answers as display text; players pick
//! candidates rendered from the same text. Comparison therefore folds case,
//! strips diacritics (NFKD, combining marks removed) and ignores
//! surrounding whitespace.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical comparison form of an answer or guess.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    folded.trim().to_string()
}

/// Case- and diacritic-insensitive equality.
pub fn normalized_eq(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::{normalize, normalized_eq};

    #[test]
    fn case_is_folded() {
        assert!(normalized_eq("ROME", "rome"));
        assert!(normalized_eq("Rome", "rOmE"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(normalized_eq("  Rome ", "rome"));
    }

    #[test]
    fn diacritics_are_stripped() {
        assert!(normalized_eq("São Paulo", "sao paulo"));
        assert!(normalized_eq("Curaçao", "curacao"));
    }

    #[test]
    fn distinct_answers_stay_distinct() {
        assert!(!normalized_eq("Rome", "Lima"));
        assert_ne!(normalize("Paris"), normalize("Parisian"));
    }
}
