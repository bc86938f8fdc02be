//! Error codes for the lastcall round engine.
//!
//! This module defines all error codes used throughout the crate.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! surfaced to the embedding game (store `error_message`, logs).

use core::fmt;

/// Centralized error codes for the round engine.
///
/// This enum ensures type safety and prevents the use of ad-hoc error
/// codes. Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Round interaction validation
    /// Action not legal in the current round phase
    PhaseMismatch,
    /// Picked text is not one of the five candidates
    UnknownCandidate,
    /// Candidate list must contain exactly five options
    InvalidOptionCount,
    /// Retry requested without a stored selection
    NoSelection,

    // Conflicts
    /// Round already reached a terminal outcome
    RoundCompleted,
    /// A selection has already been recorded
    SelectionTaken,

    // Verification
    /// Submit-selection retries exhausted; player may retry
    VerificationUnavailable,
    /// Resolve-answer retries exhausted; sentinel answer used
    AnswerUnavailable,
    /// Network attempt exceeded its deadline
    VerifyTimeout,
    /// Verification service returned a non-success response
    VerifyUpstream,
    /// Round torn down while an operation was in flight
    RoundCancelled,

    // Operational
    /// Configuration error
    ConfigError,
    /// Unexpected internal error
    Internal,
}

impl ErrorCode {
    /// Canonical string for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::PhaseMismatch => "PHASE_MISMATCH",
            ErrorCode::UnknownCandidate => "UNKNOWN_CANDIDATE",
            ErrorCode::InvalidOptionCount => "INVALID_OPTION_COUNT",
            ErrorCode::NoSelection => "NO_SELECTION",
            ErrorCode::RoundCompleted => "ROUND_COMPLETED",
            ErrorCode::SelectionTaken => "SELECTION_TAKEN",
            ErrorCode::VerificationUnavailable => "VERIFICATION_UNAVAILABLE",
            ErrorCode::AnswerUnavailable => "ANSWER_UNAVAILABLE",
            ErrorCode::VerifyTimeout => "VERIFY_TIMEOUT",
            ErrorCode::VerifyUpstream => "VERIFY_UPSTREAM",
            ErrorCode::RoundCancelled => "ROUND_CANCELLED",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
