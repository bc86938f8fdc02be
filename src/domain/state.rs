//! Authoritative round state and its transitions.

use serde::{Deserialize, Serialize};

use crate::domain::candidate::{CandidateSet, CANDIDATE_COUNT};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Identifier of the daily challenge this round belongs to.
pub type RoundId = i64;

/// Sentinel shown when resolve-answer retries are exhausted.
///
/// Resolution must never block completion indefinitely; a completed round
/// always carries a non-empty answer, even if it is this placeholder.
pub const ANSWER_UNAVAILABLE: &str = "Answer not available";

/// Scheduler state of the reveal/arm sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// Round created, nothing revealed yet.
    Idle,
    /// Candidate `0..=4` is flipping.
    Revealing(u8),
    /// All five flipped; settle delay before arming.
    Settling,
    /// Countdown is live, a pick is accepted.
    Armed,
    /// A verification operation is in flight.
    Resolving,
    /// Terminal outcome reached.
    Completed,
}

/// Terminal outcome of the elimination round.
///
/// `Unresolved` is strictly the pre-completion value; a completed round
/// always holds one of the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Unresolved,
    Win,
    /// Picked a candidate, verification said it was wrong.
    LossWrong,
    /// Clock ran out without a pick.
    LossExpired,
}

/// Staged message for the in-flight verification op (presentational only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    Idle,
    /// Sending the player's pick.
    Submitting,
    /// Fetching the authoritative answer.
    Determining,
    /// In flight past the slow-connection threshold.
    SlowConnection,
    /// In flight past the still-working threshold.
    StillWorking,
    /// Waiting out a backoff window before attempt `n`.
    Retrying(u32),
}

/// The single authoritative data container for one elimination round.
///
/// Externally owned: the main game creates it when the round activates and
/// discards it with the next daily challenge. The hosting UI (and this
/// crate's controller) may be torn down and recreated while it persists.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub round_id: RoundId,
    /// The five candidates, reveal order, populated once.
    pub options: CandidateSet,
    /// Visual-sequence flags. Stored here so they survive a remount, but
    /// semantically ephemeral: the remount guard may reset them.
    pub flipped: [bool; CANDIDATE_COUNT],
    pub fully_revealed: bool,
    pub phase: RoundPhase,
    /// Player's pick, set at most once.
    pub selected_option: Option<String>,
    /// Authoritative answer, set at most once; non-empty whenever
    /// `completed` is true.
    pub resolved_answer: Option<String>,
    /// Transitions false -> true exactly once, never reverts.
    pub completed: bool,
    pub outcome: Outcome,
    /// Monotonically non-increasing while armed and not paused.
    pub time_remaining_secs: u32,
    pub paused: bool,
    /// Countdown reached zero.
    pub expired: bool,
    /// Retries performed for the currently in-flight operation.
    pub retry_count: u32,
    /// Player-facing error for a recoverable verification failure.
    pub error_message: Option<String>,
    pub progress: Progress,
}

impl RoundState {
    pub fn new(round_id: RoundId, options: CandidateSet, countdown_secs: u32) -> Self {
        Self {
            round_id,
            options,
            flipped: [false; CANDIDATE_COUNT],
            fully_revealed: false,
            phase: RoundPhase::Idle,
            selected_option: None,
            resolved_answer: None,
            completed: false,
            outcome: Outcome::Unresolved,
            time_remaining_secs: countdown_secs,
            paused: false,
            expired: false,
            retry_count: 0,
            error_message: None,
            progress: Progress::Idle,
        }
    }

    /// Record the player's pick. Legal only once, while armed.
    ///
    /// Returns the canonical candidate text on success.
    pub fn select(&mut self, text: &str) -> Result<String, DomainError> {
        if self.completed {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyCompleted,
                "selection after completion",
            ));
        }
        if self.selected_option.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::SelectionTaken,
                "a selection is already recorded",
            ));
        }
        if self.phase != RoundPhase::Armed {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("cannot select in phase {:?}", self.phase),
            ));
        }
        let canonical = self
            .options
            .canonical(text)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::UnknownCandidate,
                    format!("'{text}' is not one of the candidates"),
                )
            })?
            .to_string();
        self.selected_option = Some(canonical.clone());
        Ok(canonical)
    }

    /// The single-shot terminal transition.
    ///
    /// Returns `true` iff this call performed the transition; once
    /// completed, every further call is a no-op. Both the player-selected
    /// path and the timer-expired path funnel through this guard.
    pub fn complete(&mut self, answer: &str, outcome: Outcome) -> bool {
        if self.completed {
            return false;
        }
        debug_assert!(!answer.is_empty(), "completed round needs an answer");
        debug_assert!(outcome != Outcome::Unresolved);
        self.resolved_answer = Some(answer.to_string());
        self.outcome = outcome;
        self.completed = true;
        self.phase = RoundPhase::Completed;
        self.progress = Progress::Idle;
        self.error_message = None;
        true
    }

    /// One countdown tick; returns the remaining seconds afterwards.
    pub fn tick(&mut self) -> u32 {
        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        self.time_remaining_secs
    }

    /// Reset the visual-sequence flags so the reveal can replay after a
    /// remount. Durable fields are untouched.
    pub fn reset_reveal_flags(&mut self) {
        self.flipped = [false; CANDIDATE_COUNT];
        self.fully_revealed = false;
        if !self.completed {
            self.phase = RoundPhase::Idle;
        }
    }

    /// Seconds consumed from an initial countdown of `countdown_secs`.
    pub fn elapsed_secs(&self, countdown_secs: u32) -> u32 {
        countdown_secs.saturating_sub(self.time_remaining_secs)
    }
}
