//! Player view of round state - what the presentation layer renders.
//!
//! This is the only surface the presentation consumes: a derived snapshot
//! published on every committed mutation. It never exposes the
//! authoritative container itself.

use serde::Serialize;

use crate::domain::answer::normalized_eq;
use crate::domain::state::{Outcome, Progress, RoundPhase, RoundState};

/// One candidate as the presentation sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateView {
    pub text: String,
    /// Whether the flip animation for this candidate has run.
    pub flipped: bool,
    /// Whether this candidate is the player's pick.
    pub selected: bool,
    /// Known only once the round completes; `None` before that so the
    /// presentation cannot leak the answer early.
    pub correct: Option<bool>,
    /// Whether a click on this candidate would currently be accepted.
    pub selectable: bool,
}

/// Derived view-state for the whole round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundView {
    pub phase: RoundPhase,
    pub candidates: Vec<CandidateView>,
    pub seconds_remaining: u32,
    pub progress: Progress,
    pub completed: bool,
    pub outcome: Outcome,
    pub resolved_answer: Option<String>,
    /// Player-facing recoverable error, with a retry action attached.
    pub error: Option<String>,
    /// The completed round asks its host to transition out.
    pub close_requested: bool,
}

impl RoundView {
    pub fn project(state: &RoundState, close_requested: bool) -> Self {
        let selectable =
            state.phase == RoundPhase::Armed && !state.completed && state.selected_option.is_none();

        let candidates = state
            .options
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let selected = state
                    .selected_option
                    .as_deref()
                    .is_some_and(|s| s == text);
                let correct = if state.completed {
                    state
                        .resolved_answer
                        .as_deref()
                        .map(|answer| normalized_eq(answer, text))
                } else {
                    None
                };
                CandidateView {
                    text: text.to_string(),
                    flipped: state.flipped[i],
                    selected,
                    correct,
                    selectable,
                }
            })
            .collect();

        Self {
            phase: state.phase,
            candidates,
            seconds_remaining: state.time_remaining_secs,
            progress: state.progress,
            completed: state.completed,
            outcome: state.outcome,
            resolved_answer: state.resolved_answer.clone(),
            error: state.error_message.clone(),
            close_requested,
        }
    }

    /// Convenience for tests and hosts: the view of a single candidate.
    pub fn candidate(&self, text: &str) -> Option<&CandidateView> {
        self.candidates.iter().find(|c| c.text == text)
    }
}
