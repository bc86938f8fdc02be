//! Bounded retry with an exponential backoff ladder and staged progress.
//!
//! Reimplemented as an iterative loop with an explicit attempt counter so
//! the liveness check between attempts is straightforward and the call
//! stack stays flat regardless of how many retries run.

use std::future::Future;

use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::retry::RetryConfig;
use crate::domain::state::Progress;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Run `op` up to `cfg.max_attempts` times.
///
/// Each attempt is bounded by `cfg.request_timeout`. While an attempt is
/// in flight, `on_progress` receives the staged escalation
/// (`stage` -> SlowConnection -> StillWorking); between attempts it
/// receives `Retrying(n)` for the upcoming attempt. A cancelled token
/// stops the sequence immediately with a non-retryable error.
pub async fn retry_with_backoff<T, Op, Fut, P>(
    op_name: &'static str,
    cfg: &RetryConfig,
    cancel: &CancellationToken,
    on_progress: P,
    stage: Progress,
    mut op: Op,
) -> Result<T, DomainError>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
    P: Fn(Progress),
{
    let mut last_err = None;

    for attempt in 1..=cfg.max_attempts {
        if cancel.is_cancelled() {
            return Err(DomainError::infra(
                InfraErrorKind::Cancelled,
                "round torn down",
            ));
        }

        match run_attempt(cfg, cancel, &on_progress, stage, op()).await {
            Ok(value) => {
                if attempt > 1 {
                    info!(op = op_name, attempts = attempt, "verification recovered");
                }
                return Ok(value);
            }
            Err(err) => {
                warn!(
                    op = op_name,
                    attempt,
                    max_attempts = cfg.max_attempts,
                    error = %err,
                    "verification attempt failed"
                );
                if !err.is_retryable() {
                    return Err(err);
                }
                last_err = Some(err);
                if attempt < cfg.max_attempts {
                    on_progress(Progress::Retrying(attempt + 1));
                    sleep(cfg.backoff_delay(attempt)).await;
                }
            }
        }
    }

    Err(last_err.unwrap_or_else(|| {
        DomainError::infra(InfraErrorKind::Other("retry".into()), "no attempts executed")
    }))
}

/// One attempt with its own deadline and staged progress escalation.
async fn run_attempt<T, Fut, P>(
    cfg: &RetryConfig,
    cancel: &CancellationToken,
    on_progress: &P,
    stage: Progress,
    fut: Fut,
) -> Result<T, DomainError>
where
    Fut: Future<Output = Result<T, DomainError>>,
    P: Fn(Progress),
{
    on_progress(stage);

    let attempt = timeout(cfg.request_timeout, fut);
    tokio::pin!(attempt);
    let slow = sleep(cfg.slow_after);
    tokio::pin!(slow);
    let stalled = sleep(cfg.stalled_after);
    tokio::pin!(stalled);

    let mut slow_fired = false;
    let mut stalled_fired = false;

    loop {
        tokio::select! {
            result = &mut attempt => {
                return match result {
                    Ok(inner) => inner,
                    Err(_) => Err(DomainError::infra(
                        InfraErrorKind::Timeout,
                        format!("no response within {:?}", cfg.request_timeout),
                    )),
                };
            }
            _ = &mut slow, if !slow_fired => {
                slow_fired = true;
                on_progress(Progress::SlowConnection);
            }
            _ = &mut stalled, if !stalled_fired => {
                stalled_fired = true;
                on_progress(Progress::StillWorking);
            }
            _ = cancel.cancelled() => {
                return Err(DomainError::infra(
                    InfraErrorKind::Cancelled,
                    "round torn down mid-attempt",
                ));
            }
        }
    }
}
