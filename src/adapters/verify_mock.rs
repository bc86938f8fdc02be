//! Scripted in-process verification authority for tests.
//!
//! Strict by design: every call consumes the next scripted result and an
//! exhausted script panics, so a test that triggers more calls than it
//! scripted fails loudly instead of silently succeeding.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::adapters::verify::{GuessEntry, GuessRecord, ResolvedAnswer, VerificationService};
use crate::domain::state::RoundId;
use crate::errors::domain::{DomainError, InfraErrorKind};

type SubmitResult = Result<GuessRecord, DomainError>;
type ResolveResult = Result<ResolvedAnswer, DomainError>;

#[derive(Default)]
pub struct ScriptedVerification {
    submit_script: Mutex<VecDeque<SubmitResult>>,
    resolve_script: Mutex<VecDeque<ResolveResult>>,
    submit_calls: AtomicU32,
    resolve_calls: AtomicU32,
    /// Simulated network latency per call; works under paused tokio time.
    latency: Mutex<Duration>,
}

impl ScriptedVerification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = latency;
    }

    pub fn push_submit(&self, result: SubmitResult) {
        self.submit_script.lock().push_back(result);
    }

    pub fn push_resolve(&self, result: ResolveResult) {
        self.resolve_script.lock().push_back(result);
    }

    /// Script a submission acknowledged with a guess record in which
    /// `selection` is marked correct or wrong.
    pub fn push_submit_verdict(&self, selection: &str, correct: bool) {
        self.push_submit(Ok(GuessRecord {
            accepted: true,
            entries: vec![GuessEntry {
                text: selection.to_string(),
                correct,
            }],
        }));
    }

    /// Script a transient upstream failure for the next submission.
    pub fn push_submit_failure(&self) {
        self.push_submit(Err(DomainError::infra(
            InfraErrorKind::Upstream,
            "scripted submit failure",
        )));
    }

    pub fn push_resolve_answer(&self, answer: &str) {
        self.push_resolve(Ok(ResolvedAnswer {
            answer: answer.to_string(),
        }));
    }

    /// Script a transient upstream failure for the next resolution.
    pub fn push_resolve_failure(&self) {
        self.push_resolve(Err(DomainError::infra(
            InfraErrorKind::Upstream,
            "scripted resolve failure",
        )));
    }

    pub fn submit_calls(&self) -> u32 {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn resolve_calls(&self) -> u32 {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl VerificationService for ScriptedVerification {
    async fn submit_guess(
        &self,
        _round_id: RoundId,
        _option_text: &str,
    ) -> Result<GuessRecord, DomainError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.submit_script
            .lock()
            .pop_front()
            .expect("ScriptedVerification: submit script exhausted")
    }

    async fn resolve_answer(
        &self,
        _round_id: RoundId,
        _language: &str,
    ) -> Result<ResolvedAnswer, DomainError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.resolve_script
            .lock()
            .pop_front()
            .expect("ScriptedVerification: resolve script exhausted")
    }
}
