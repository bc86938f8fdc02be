//! Verification pipeline: settles the round against the remote authority.
//!
//! Two entries feed it - a player selection (submit, then resolve on a
//! miss) and a timer expiry (resolve only). Both funnel into the same
//! single-shot completion guard, so whichever finishes first wins and the
//! other becomes a no-op.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

use super::RoundFlow;
use crate::domain::state::{Outcome, Progress, RoundPhase, ANSWER_UNAVAILABLE};
use crate::error::FlowError;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::infra::retry::retry_with_backoff;
use crate::state::session::RoundSummary;

/// Player-facing message for a recoverable submit failure.
const SUBMIT_FAILED_MESSAGE: &str =
    "We couldn't verify your pick. Check your connection and try again.";

impl RoundFlow {
    pub(super) fn spawn_resolve_selection(&self, selection: String) {
        let Some(flow) = self.strong() else { return };
        self.spawn(async move { flow.resolve_selection(selection).await });
    }

    pub(super) fn spawn_resolve_expiry(&self) {
        let Some(flow) = self.strong() else { return };
        self.spawn(async move { flow.resolve_expiry().await });
    }

    /// Entry A: the player picked before expiry.
    ///
    /// Correctness is inferred from the updated guess record, not from a
    /// direct flag: a confirmed pick wins immediately; a miss falls
    /// through to answer resolution.
    async fn resolve_selection(self: Arc<Self>, selection: String) {
        if !self.enter_pipeline() {
            return;
        }

        let round_id = self.round_id();
        let cancel = self.tasks.token();
        let verify = Arc::clone(&self.verify);

        let submitted = retry_with_backoff(
            "submit_guess",
            &self.retry_cfg,
            &cancel,
            |p| self.apply_progress(p),
            Progress::Submitting,
            || {
                let verify = Arc::clone(&verify);
                let selection = selection.clone();
                async move { verify.submit_guess(round_id, &selection).await }
            },
        )
        .await;

        match submitted {
            Ok(record) => {
                if !record.accepted {
                    warn!(round_id, "verification service did not accept the guess");
                }
                if record.confirms(&selection) {
                    self.commit_completion(&selection, Outcome::Win);
                } else {
                    self.resolve_answer_and_complete(Outcome::LossWrong).await;
                }
            }
            Err(err) => self.fail_submission(err),
        }
    }

    /// Entry B: the clock ran out without a pick; submission is skipped
    /// entirely.
    async fn resolve_expiry(self: Arc<Self>) {
        if !self.enter_pipeline() {
            return;
        }
        self.resolve_answer_and_complete(Outcome::LossExpired).await;
    }

    /// Player-facing retry action after submit retries were exhausted.
    ///
    /// Re-runs entry A with the stored selection; the pick itself is
    /// recorded at most once and never changes.
    pub fn retry_submission(&self) -> Result<(), FlowError> {
        let selection = {
            let state = self.state.lock();
            if state.completed {
                debug!("ignoring retry after completion");
                return Ok(());
            }
            let selection = state.selected_option.clone().ok_or_else(|| {
                DomainError::validation(ValidationKind::NoSelection, "no selection to retry")
            })?;
            if state.error_message.is_none() {
                // Nothing failed (or a submission is already in flight).
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    "no failed submission to retry",
                )
                .into());
            }
            selection
        };
        self.mutate(|state| {
            state.error_message = None;
            state.retry_count = 0;
        });
        self.session.clear_error();
        info!(round_id = self.round_id(), "retrying guess submission");
        self.spawn_resolve_selection(selection);
        Ok(())
    }

    /// Guarded pipeline entry; `false` when the round is already settled,
    /// which makes overlapping click/expiry triggers no-ops.
    fn enter_pipeline(&self) -> bool {
        self.mutate(|state| {
            if state.completed {
                debug!("pipeline invoked after completion; ignoring");
                return false;
            }
            state.phase = RoundPhase::Resolving;
            state.retry_count = 0;
            true
        })
    }

    fn apply_progress(&self, progress: Progress) {
        self.mutate(|state| {
            if state.completed {
                return;
            }
            state.progress = progress;
            if let Progress::Retrying(attempt) = progress {
                state.retry_count = attempt.saturating_sub(1);
            }
        });
    }

    /// Fetch the authoritative answer and complete the round with `loss`.
    ///
    /// Exhausted retries degrade to the sentinel answer instead of
    /// blocking completion.
    async fn resolve_answer_and_complete(&self, loss: Outcome) {
        let round_id = self.round_id();
        let language = self.session.challenge().language;
        let cancel = self.tasks.token();
        let verify = Arc::clone(&self.verify);

        let resolved = retry_with_backoff(
            "resolve_answer",
            &self.retry_cfg,
            &cancel,
            |p| self.apply_progress(p),
            Progress::Determining,
            || {
                let verify = Arc::clone(&verify);
                let language = language.clone();
                async move { verify.resolve_answer(round_id, &language).await }
            },
        )
        .await;

        let answer = match resolved {
            Ok(resolved) if !resolved.answer.trim().is_empty() => resolved.answer,
            Ok(_) => {
                warn!(round_id, "resolve answer returned empty text");
                ANSWER_UNAVAILABLE.to_string()
            }
            Err(DomainError::Infra(InfraErrorKind::Cancelled, _)) => return,
            Err(err) => {
                error!(
                    round_id,
                    error = %err,
                    code = %ErrorCode::AnswerUnavailable,
                    "resolve answer retries exhausted; completing with sentinel"
                );
                ANSWER_UNAVAILABLE.to_string()
            }
        };

        self.commit_completion(&answer, loss);
    }

    /// Terminal transition plus write-once store finalization.
    fn commit_completion(&self, answer: &str, outcome: Outcome) {
        // A torn-down round must not touch shared state.
        if self.tasks.is_cancelled() {
            return;
        }

        let committed = self.mutate(|state| {
            if !state.complete(answer, outcome) {
                return None;
            }
            Some((
                state.round_id,
                state.retry_count + 1,
                state.elapsed_secs(self.round_cfg.countdown_secs),
            ))
        });

        let Some((round_id, attempts, elapsed_secs)) = committed else {
            debug!("completion already committed; ignoring");
            return;
        };

        info!(round_id, ?outcome, elapsed_secs, "round completed");
        let first = self.session.finalize_round(RoundSummary {
            outcome,
            attempts,
            elapsed_secs,
            completed_at: OffsetDateTime::now_utc(),
        });
        if !first {
            warn!(round_id, "session was already finalized");
        }
    }

    /// Recoverable round-level failure: the round stays open and the
    /// player gets a retry action.
    fn fail_submission(&self, err: DomainError) {
        if matches!(err, DomainError::Infra(InfraErrorKind::Cancelled, _)) {
            return;
        }
        error!(
            error = %err,
            code = %ErrorCode::VerificationUnavailable,
            "guess submission retries exhausted"
        );
        self.mutate(|state| {
            if state.completed {
                return;
            }
            state.progress = Progress::Idle;
            state.error_message = Some(SUBMIT_FAILED_MESSAGE.to_string());
            if state.phase == RoundPhase::Resolving {
                state.phase = RoundPhase::Armed;
            }
        });
        self.session.set_error(SUBMIT_FAILED_MESSAGE);
    }
}
