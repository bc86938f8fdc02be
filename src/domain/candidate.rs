//! The five candidate answers shown in the elimination round.

use crate::domain::answer::normalized_eq;
use crate::errors::domain::{DomainError, ValidationKind};

/// Number of candidates in every elimination round.
pub const CANDIDATE_COUNT: usize = 5;

/// Ordered, immutable set of exactly five candidate answers.
///
/// Populated once from the external candidate-list fetch and never
/// mutated afterward; reveal order is the stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet([String; CANDIDATE_COUNT]);

impl CandidateSet {
    /// Validate and freeze a candidate list.
    pub fn new(options: Vec<String>) -> Result<Self, DomainError> {
        if options.len() != CANDIDATE_COUNT {
            return Err(DomainError::validation(
                ValidationKind::OptionCount,
                format!(
                    "expected {CANDIDATE_COUNT} candidates, got {}",
                    options.len()
                ),
            ));
        }
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(DomainError::validation(
                ValidationKind::OptionCount,
                "candidate text must not be empty",
            ));
        }
        let arr: [String; CANDIDATE_COUNT] = options
            .try_into()
            .map_err(|_| DomainError::validation(ValidationKind::OptionCount, "candidate list"))?;
        Ok(Self(arr))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Resolve picked text to the canonical candidate string, if any.
    ///
    /// Matching is normalized so a presentation layer that trims or
    /// re-cases labels still resolves to the stored candidate.
    pub fn canonical(&self, text: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|option| normalized_eq(option, text))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{CandidateSet, CANDIDATE_COUNT};

    fn options() -> Vec<String> {
        ["Paris", "Lima", "Rome", "Cairo", "Oslo"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn accepts_exactly_five() {
        let set = CandidateSet::new(options()).expect("five candidates");
        assert_eq!(set.iter().count(), CANDIDATE_COUNT);
        assert_eq!(set.get(2), Some("Rome"));
    }

    #[test]
    fn rejects_wrong_count() {
        assert!(CandidateSet::new(vec!["Paris".into()]).is_err());
        let mut six = options();
        six.push("Kyiv".into());
        assert!(CandidateSet::new(six).is_err());
    }

    #[test]
    fn rejects_blank_candidate() {
        let mut opts = options();
        opts[3] = "   ".into();
        assert!(CandidateSet::new(opts).is_err());
    }

    #[test]
    fn canonical_resolves_normalized_text() {
        let set = CandidateSet::new(options()).expect("five candidates");
        assert_eq!(set.canonical("rome"), Some("Rome"));
        assert_eq!(set.canonical(" CAIRO "), Some("Cairo"));
        assert_eq!(set.canonical("Kyiv"), None);
    }
}
