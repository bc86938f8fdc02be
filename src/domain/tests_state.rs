use crate::domain::candidate::CandidateSet;
use crate::domain::state::{Outcome, RoundPhase, RoundState};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

fn armed_state() -> RoundState {
    let options = CandidateSet::new(
        ["Paris", "Lima", "Rome", "Cairo", "Oslo"]
            .into_iter()
            .map(String::from)
            .collect(),
    )
    .expect("five candidates");
    let mut state = RoundState::new(42, options, 10);
    state.flipped = [true; 5];
    state.fully_revealed = true;
    state.phase = RoundPhase::Armed;
    state
}

#[test]
fn select_records_canonical_text_once() {
    let mut state = armed_state();
    let picked = state.select("rome").expect("legal pick");
    assert_eq!(picked, "Rome");
    assert_eq!(state.selected_option.as_deref(), Some("Rome"));

    let err = state.select("Lima").expect_err("second pick");
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::SelectionTaken, _)
    ));
    assert_eq!(state.selected_option.as_deref(), Some("Rome"));
}

#[test]
fn select_rejects_unknown_candidate() {
    let mut state = armed_state();
    let err = state.select("Kyiv").expect_err("not a candidate");
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UnknownCandidate, _)
    ));
    assert!(state.selected_option.is_none());
}

#[test]
fn select_rejects_before_armed() {
    let mut state = armed_state();
    state.phase = RoundPhase::Revealing(3);
    let err = state.select("Rome").expect_err("not armed yet");
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PhaseMismatch, _)
    ));
}

#[test]
fn select_after_completion_is_a_conflict() {
    let mut state = armed_state();
    assert!(state.complete("Lima", Outcome::LossExpired));
    let err = state.select("Rome").expect_err("round is over");
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyCompleted, _)
    ));
}

#[test]
fn complete_transitions_exactly_once() {
    let mut state = armed_state();
    assert!(state.complete("Rome", Outcome::Win));
    assert!(state.completed);
    assert_eq!(state.outcome, Outcome::Win);
    assert_eq!(state.phase, RoundPhase::Completed);
    assert_eq!(state.resolved_answer.as_deref(), Some("Rome"));

    // The losing side of the race is a no-op.
    assert!(!state.complete("Lima", Outcome::LossExpired));
    assert_eq!(state.outcome, Outcome::Win);
    assert_eq!(state.resolved_answer.as_deref(), Some("Rome"));
}

#[test]
fn complete_clears_transient_error_state() {
    let mut state = armed_state();
    state.error_message = Some("verification unavailable".into());
    assert!(state.complete("Rome", Outcome::Win));
    assert!(state.error_message.is_none());
}

#[test]
fn tick_saturates_at_zero() {
    let mut state = armed_state();
    state.time_remaining_secs = 1;
    assert_eq!(state.tick(), 0);
    assert_eq!(state.tick(), 0);
}

#[test]
fn reset_reveal_flags_keeps_durable_fields() {
    let mut state = armed_state();
    state.time_remaining_secs = 6;
    state.reset_reveal_flags();
    assert_eq!(state.flipped, [false; 5]);
    assert!(!state.fully_revealed);
    assert_eq!(state.phase, RoundPhase::Idle);
    // Durable fields untouched.
    assert_eq!(state.time_remaining_secs, 6);
    assert!(!state.completed);
}

#[test]
fn reset_reveal_flags_never_reopens_a_completed_round() {
    let mut state = armed_state();
    assert!(state.complete("Lima", Outcome::LossExpired));
    state.reset_reveal_flags();
    assert_eq!(state.phase, RoundPhase::Completed);
    assert!(state.completed);
}

#[test]
fn elapsed_counts_consumed_seconds() {
    let mut state = armed_state();
    state.time_remaining_secs = 7;
    assert_eq!(state.elapsed_secs(10), 3);
}
