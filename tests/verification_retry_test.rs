//! Verification failure handling: recoverable submit exhaustion, staged
//! progress escalation, and the click/expiry race.

mod support;

use std::time::Duration;

use lastcall::{Outcome, Progress, RoundPhase};

use crate::support::{step, Fixture};

#[tokio::test(start_paused = true)]
async fn submit_exhaustion_surfaces_recoverable_error_without_completing() {
    let fx = Fixture::new();
    fx.verify.push_submit_failure();
    fx.verify.push_submit_failure();
    fx.verify.push_submit_failure();
    fx.mount_and_arm().await;

    fx.flow.select("Rome").expect("legal pick");
    step(3100).await;

    let view = fx.flow.view();
    assert!(!view.completed, "the round does not complete");
    assert_eq!(view.phase, RoundPhase::Armed);
    assert_eq!(view.progress, Progress::Idle);
    let message = view.error.clone().expect("player-facing error");
    assert!(message.contains("try again"));
    assert_eq!(fx.session.error_message().as_deref(), Some(message.as_str()));
    assert!(fx.session.final_outcome().is_none());
    assert_eq!(fx.verify.submit_calls(), 3);

    // The stored selection is kept for the retry action.
    let rome = view.candidate("Rome").expect("in view");
    assert!(rome.selected);
    assert!(!rome.selectable, "the pick cannot be changed");

    fx.flow.teardown();
}

#[tokio::test(start_paused = true)]
async fn retry_action_resubmits_the_same_selection() {
    let fx = Fixture::new();
    fx.verify.push_submit_failure();
    fx.verify.push_submit_failure();
    fx.verify.push_submit_failure();
    fx.mount_and_arm().await;

    fx.flow.select("Rome").expect("legal pick");
    step(3100).await;
    assert!(fx.flow.view().error.is_some());

    fx.verify.push_submit_verdict("Rome", true);
    fx.flow.retry_submission().expect("retry with stored selection");
    step(0).await;

    let view = fx.flow.view();
    assert!(view.completed);
    assert_eq!(view.outcome, Outcome::Win);
    assert!(view.error.is_none());
    assert!(fx.session.error_message().is_none());
    assert_eq!(fx.verify.submit_calls(), 4);

    fx.flow.teardown();
}

#[tokio::test(start_paused = true)]
async fn retry_without_a_selection_is_rejected() {
    let fx = Fixture::new();
    fx.mount_and_arm().await;

    let err = fx.flow.retry_submission().expect_err("nothing to retry");
    assert_eq!(err.code(), lastcall::ErrorCode::NoSelection);

    fx.flow.teardown();
}

#[tokio::test(start_paused = true)]
async fn progress_escalates_while_a_call_is_in_flight() {
    let fx = Fixture::new();
    fx.verify.set_latency(Duration::from_secs(7));
    fx.verify.push_submit_verdict("Rome", true);
    fx.mount_and_arm().await;

    fx.flow.select("Rome").expect("legal pick");
    step(0).await;
    assert_eq!(fx.flow.view().progress, Progress::Submitting);

    step(2500).await;
    assert_eq!(fx.flow.view().progress, Progress::SlowConnection);

    step(3500).await;
    assert_eq!(fx.flow.view().progress, Progress::StillWorking);

    step(1000).await;
    let view = fx.flow.view();
    assert!(view.completed);
    assert_eq!(view.outcome, Outcome::Win);
    assert_eq!(view.progress, Progress::Idle);

    fx.flow.teardown();
}

#[tokio::test(start_paused = true)]
async fn expiry_during_in_flight_submission_loses_the_race_cleanly() {
    let fx = Fixture::new();
    fx.verify.set_latency(Duration::from_secs(5));
    fx.verify.push_submit_verdict("Rome", true);
    fx.verify.push_resolve_answer("Rome");
    fx.mount_and_arm().await;

    // Pick with 2s on the clock; the submission outlives the countdown.
    step(8000).await;
    fx.flow.select("Rome").expect("legal pick");

    step(2000).await;
    let view = fx.flow.view();
    assert!(!view.completed, "verification still in flight at expiry");
    assert_eq!(view.seconds_remaining, 0);

    step(5000).await;
    let view = fx.flow.view();
    assert!(view.completed);
    assert_eq!(
        view.outcome,
        Outcome::Win,
        "the first finisher settles the round"
    );
    assert_eq!(view.resolved_answer.as_deref(), Some("Rome"));

    // Exactly one terminal write reached the shared store.
    assert_eq!(fx.session.streak().played, 1);
    assert_eq!(fx.session.final_outcome(), Some(Outcome::Win));

    fx.flow.teardown();
}

#[tokio::test(start_paused = true)]
async fn selection_after_completion_is_silently_ignored() {
    let fx = Fixture::new();
    fx.verify.push_resolve_answer("Lima");
    fx.mount_and_arm().await;
    step(10_000).await;
    assert!(fx.flow.view().completed);

    fx.flow
        .select("Rome")
        .expect("late click is ignored, not an error");
    step(1000).await;

    let view = fx.flow.view();
    assert_eq!(view.outcome, Outcome::LossExpired);
    assert!(
        !view.candidate("Rome").expect("in view").selected,
        "the late pick was not recorded"
    );
    assert_eq!(fx.verify.submit_calls(), 0);

    fx.flow.teardown();
}

#[tokio::test(start_paused = true)]
async fn unknown_candidate_is_rejected_with_a_code() {
    let fx = Fixture::new();
    fx.mount_and_arm().await;

    let err = fx.flow.select("Kyiv").expect_err("not a candidate");
    assert_eq!(err.code(), lastcall::ErrorCode::UnknownCandidate);

    fx.flow.teardown();
}
