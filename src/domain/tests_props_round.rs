//! Property tests for round state invariants (pure domain).
//!
//! Invariant contract:
//! - `completed` transitions false -> true at most once, never reverts
//! - `resolved_answer` is non-empty whenever `completed` is true
//! - `time_remaining_secs` is monotonically non-increasing
//! - `selected_option` is set at most once

use proptest::prelude::*;

use crate::domain::candidate::CandidateSet;
use crate::domain::state::{Outcome, RoundPhase, RoundState};

#[derive(Debug, Clone)]
enum Op {
    Select(usize),
    CompleteWin(usize),
    CompleteLoss(usize),
    Tick,
    ResetRevealFlags,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..5).prop_map(Op::Select),
        (0usize..5).prop_map(Op::CompleteWin),
        (0usize..5).prop_map(Op::CompleteLoss),
        Just(Op::Tick),
        Just(Op::ResetRevealFlags),
    ]
}

fn fresh_armed() -> RoundState {
    let options = CandidateSet::new(
        ["Paris", "Lima", "Rome", "Cairo", "Oslo"]
            .into_iter()
            .map(String::from)
            .collect(),
    )
    .expect("five candidates");
    let mut state = RoundState::new(7, options, 10);
    state.fully_revealed = true;
    state.flipped = [true; 5];
    state.phase = RoundPhase::Armed;
    state
}

proptest! {
    /// Property: no operation sequence completes a round twice or
    /// reverts completion, and a completed round always has an answer.
    #[test]
    fn prop_completion_is_single_shot(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let mut state = fresh_armed();
        let mut completions = 0u32;
        let mut last_remaining = state.time_remaining_secs;

        for op in ops {
            match op {
                Op::Select(i) => {
                    let text = state.options.get(i).expect("index in range").to_string();
                    let _ = state.select(&text);
                }
                Op::CompleteWin(i) => {
                    let answer = state.options.get(i).expect("index in range").to_string();
                    if state.complete(&answer, Outcome::Win) {
                        completions += 1;
                    }
                }
                Op::CompleteLoss(i) => {
                    let answer = state.options.get(i).expect("index in range").to_string();
                    if state.complete(&answer, Outcome::LossExpired) {
                        completions += 1;
                    }
                }
                Op::Tick => {
                    state.tick();
                }
                Op::ResetRevealFlags => state.reset_reveal_flags(),
            }

            prop_assert!(state.time_remaining_secs <= last_remaining,
                "time must never increase");
            last_remaining = state.time_remaining_secs;

            if state.completed {
                let answer = state.resolved_answer.as_deref().unwrap_or("");
                prop_assert!(!answer.is_empty(),
                    "completed round must carry a non-empty answer");
                prop_assert!(state.outcome != Outcome::Unresolved,
                    "completed round must have a terminal outcome");
            } else {
                prop_assert_eq!(state.outcome, Outcome::Unresolved);
            }
        }

        prop_assert!(completions <= 1, "completion happened {completions} times");
    }

    /// Property: the pick never silently changes once recorded.
    #[test]
    fn prop_selection_is_sticky(first in 0usize..5, second in 0usize..5) {
        let mut state = fresh_armed();
        let first_text = state.options.get(first).expect("in range").to_string();
        let second_text = state.options.get(second).expect("in range").to_string();

        state.select(&first_text).expect("first pick is legal");
        let _ = state.select(&second_text);

        prop_assert_eq!(state.selected_option.as_deref(), Some(first_text.as_str()));
    }
}
