//! End-to-end scenarios for the elimination round.
//!
//! Each test drives a full round under paused tokio time: reveal, arm,
//! then either a player pick or an expiry, through verification to the
//! terminal outcome.

mod support;

use lastcall::{Outcome, RoundPhase, ANSWER_UNAVAILABLE};

use crate::support::{settle, step, Fixture};

#[tokio::test(start_paused = true)]
async fn reveal_flips_all_five_then_arms() {
    let fx = Fixture::new();
    fx.flow.mount();
    settle().await;

    step(1100).await;
    let view = fx.flow.view();
    let flipped = view.candidates.iter().filter(|c| c.flipped).count();
    assert_eq!(flipped, 3, "candidates 0..=2 flip within 1.1s");
    assert!(!view.candidates[0].selectable, "no picks before arming");

    step(1400).await;
    let view = fx.flow.view();
    assert!(view.candidates.iter().all(|c| c.flipped));
    assert_eq!(view.phase, RoundPhase::Armed);
    assert_eq!(view.seconds_remaining, 10);
    assert!(view.candidates.iter().all(|c| c.selectable));

    fx.flow.teardown();
}

#[tokio::test(start_paused = true)]
async fn scenario_a_correct_pick_wins_with_time_left() {
    let fx = Fixture::new();
    fx.mount_and_arm().await;

    step(3000).await;
    assert_eq!(fx.flow.view().seconds_remaining, 7);

    fx.verify.push_submit_verdict("Rome", true);
    fx.flow.select("Rome").expect("legal pick");
    step(0).await;

    let view = fx.flow.view();
    assert!(view.completed);
    assert_eq!(view.outcome, Outcome::Win);
    assert_eq!(view.resolved_answer.as_deref(), Some("Rome"));
    assert_eq!(view.seconds_remaining, 7, "timer halts with ~7s remaining");
    assert_eq!(view.candidate("Rome").expect("in view").correct, Some(true));

    assert_eq!(fx.verify.submit_calls(), 1);
    assert_eq!(fx.verify.resolve_calls(), 0, "a confirmed pick skips resolve");

    assert_eq!(fx.session.final_outcome(), Some(Outcome::Win));
    let summary = fx.session.last_summary().expect("summary persisted");
    assert_eq!(summary.attempts, 1);
    assert_eq!(summary.elapsed_secs, 3);
    let streak = fx.session.streak();
    assert_eq!((streak.played, streak.wins, streak.current_streak), (1, 1, 1));

    // The timer never resumes after completion.
    step(5000).await;
    assert_eq!(fx.flow.view().seconds_remaining, 7);

    fx.flow.teardown();
}

#[tokio::test(start_paused = true)]
async fn scenario_b_expiry_resolves_without_submitting() {
    let fx = Fixture::new();
    fx.verify.push_resolve_answer("Lima");
    fx.mount_and_arm().await;

    step(10_000).await;

    let view = fx.flow.view();
    assert!(view.completed);
    assert_eq!(view.outcome, Outcome::LossExpired);
    assert_eq!(view.resolved_answer.as_deref(), Some("Lima"));
    assert_eq!(view.seconds_remaining, 0);
    assert_eq!(view.candidate("Lima").expect("in view").correct, Some(true));
    assert_eq!(view.candidate("Rome").expect("in view").correct, Some(false));

    assert_eq!(fx.verify.submit_calls(), 0, "expiry never submits");
    assert_eq!(fx.verify.resolve_calls(), 1, "resolve called exactly once");
    assert_eq!(fx.session.final_outcome(), Some(Outcome::LossExpired));
    assert_eq!(fx.session.streak().current_streak, 0);

    fx.flow.teardown();
}

#[tokio::test(start_paused = true)]
async fn scenario_c_submit_recovers_on_third_attempt_then_loses() {
    let fx = Fixture::new();
    fx.verify.push_submit_failure();
    fx.verify.push_submit_failure();
    fx.verify.push_submit_verdict("Cairo", false);
    fx.verify.push_resolve_answer("Lima");
    fx.mount_and_arm().await;

    step(3000).await;
    fx.flow.select("Cairo").expect("legal pick");
    step(0).await;

    // First attempt failed immediately; we are in the 1s backoff window.
    let view = fx.flow.view();
    assert!(!view.completed);
    assert_eq!(view.progress, lastcall::Progress::Retrying(2));

    step(1000).await;
    assert_eq!(fx.flow.view().progress, lastcall::Progress::Retrying(3));

    step(2000).await;
    let view = fx.flow.view();
    assert!(view.completed, "third attempt settles the round");
    assert_eq!(view.outcome, Outcome::LossWrong);
    assert_eq!(view.resolved_answer.as_deref(), Some("Lima"));
    let cairo = view.candidate("Cairo").expect("in view");
    assert!(cairo.selected);
    assert_eq!(cairo.correct, Some(false));
    assert_eq!(view.candidate("Lima").expect("in view").correct, Some(true));
    // The countdown kept ticking through the ~3s of backoff.
    assert!(view.seconds_remaining <= 5);

    assert_eq!(fx.verify.submit_calls(), 3);
    assert_eq!(fx.verify.resolve_calls(), 1);
    assert_eq!(fx.session.final_outcome(), Some(Outcome::LossWrong));

    fx.flow.teardown();
}

#[tokio::test(start_paused = true)]
async fn scenario_d_resolve_exhaustion_degrades_to_sentinel() {
    let fx = Fixture::new();
    fx.verify.push_resolve_failure();
    fx.verify.push_resolve_failure();
    fx.verify.push_resolve_failure();
    fx.mount_and_arm().await;

    step(10_000).await;
    assert!(!fx.flow.view().completed, "retries still running");

    step(3500).await;
    let view = fx.flow.view();
    assert!(view.completed, "resolution never blocks completion");
    assert_eq!(view.outcome, Outcome::LossExpired);
    assert_eq!(view.resolved_answer.as_deref(), Some(ANSWER_UNAVAILABLE));
    // No candidate matches the sentinel.
    assert!(view.candidates.iter().all(|c| c.correct == Some(false)));

    assert_eq!(fx.verify.resolve_calls(), 3);
    let summary = fx.session.last_summary().expect("summary persisted");
    assert_eq!(summary.attempts, 3);
    assert_eq!(summary.elapsed_secs, 10);

    fx.flow.teardown();
}
