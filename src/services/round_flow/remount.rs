//! Remount reconciliation.
//!
//! The hosting UI may be destroyed and recreated mid-round (a layout
//! change, for instance) while the round state persists. Visual-sequence
//! flags are ephemeral in meaning but stored durably, so every mount
//! reconciles the two before anything runs.

use std::sync::atomic::Ordering;

use tracing::{debug, info};

use super::RoundFlow;
use crate::domain::state::RoundState;

/// Resume strategy chosen on (re)initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumePlan {
    /// Round already settled: ask the host to transition out after a
    /// short delay; never replay any reveal animation.
    CloseAfterDelay,
    /// Stale visual flags from a previous mount: reset them and replay
    /// the reveal from the first candidate. Durable fields are untouched.
    RestartReveal,
    /// Nothing persisted beyond a fresh round.
    FreshStart,
}

impl RoundFlow {
    /// Classify persisted state against what a fresh mount expects.
    fn classify_mount(state: &RoundState) -> ResumePlan {
        if state.completed {
            ResumePlan::CloseAfterDelay
        } else if state.fully_revealed || state.flipped.iter().any(|f| *f) {
            ResumePlan::RestartReveal
        } else {
            ResumePlan::FreshStart
        }
    }

    /// Reconcile ephemeral visual-sequence state with durable round state
    /// and start the chosen resume path. Called on every mount.
    pub fn mount(&self) -> ResumePlan {
        let plan = Self::classify_mount(&self.state.lock());
        info!(round_id = self.round_id(), ?plan, "mounting round controller");

        match plan {
            ResumePlan::CloseAfterDelay => {
                let Some(flow) = self.strong() else { return plan };
                let cancel = self.tasks.token();
                let delay = self.round_cfg.close_delay;
                self.spawn(async move {
                    tokio::select! {
                        _ = cancel.cancelled() => {}
                        _ = tokio::time::sleep(delay) => flow.request_close(),
                    }
                });
            }
            ResumePlan::RestartReveal => {
                debug!("resetting stale reveal flags");
                self.mutate(|state| state.reset_reveal_flags());
                self.start_reveal();
            }
            ResumePlan::FreshStart => self.start_reveal(),
        }

        plan
    }

    fn request_close(&self) {
        self.close_requested.store(true, Ordering::SeqCst);
        self.publish();
    }
}
