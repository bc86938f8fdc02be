//! Verification service seam.
//!
//! The authority exposes exactly two operations. Submission does not
//! report correctness directly: it acknowledges acceptance and returns the
//! updated guess record, from which the caller infers whether the pick
//! matched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::answer::normalized_eq;
use crate::domain::state::RoundId;
use crate::errors::domain::DomainError;

/// One guess as recorded by the verification authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessEntry {
    pub text: String,
    pub correct: bool,
}

/// Updated guess record returned by a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// Whether the authority accepted the submission at all.
    pub accepted: bool,
    /// The round's guesses after this submission, newest last.
    pub entries: Vec<GuessEntry>,
}

impl GuessRecord {
    /// Infer whether `selection` was verified as the correct answer.
    pub fn confirms(&self, selection: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.correct && normalized_eq(&entry.text, selection))
    }
}

/// Authoritative answer for a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAnswer {
    pub answer: String,
}

/// The remote authority consulted to settle a round.
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Submit the player's pick for `round_id`.
    async fn submit_guess(
        &self,
        round_id: RoundId,
        option_text: &str,
    ) -> Result<GuessRecord, DomainError>;

    /// Fetch the authoritative answer for `round_id` in `language`.
    async fn resolve_answer(
        &self,
        round_id: RoundId,
        language: &str,
    ) -> Result<ResolvedAnswer, DomainError>;
}
