//! Fixed-cadence reveal of the five candidates.

use std::sync::Arc;

use tracing::{debug, info};

use super::RoundFlow;
use crate::domain::candidate::CANDIDATE_COUNT;
use crate::domain::state::RoundPhase;

impl RoundFlow {
    /// Begin the reveal sequence.
    ///
    /// No-op when the round is already completed or already fully
    /// revealed, which guards re-entrancy across remounts.
    pub(super) fn start_reveal(&self) {
        {
            let state = self.state.lock();
            if state.completed || state.fully_revealed {
                debug!(
                    completed = state.completed,
                    fully_revealed = state.fully_revealed,
                    "reveal not started"
                );
                return;
            }
        }
        let Some(flow) = self.strong() else { return };
        self.spawn(async move { flow.run_reveal().await });
    }

    /// Candidate `i` flips at `i * reveal_interval` after start; a settle
    /// delay follows the fifth flip before the countdown arms.
    async fn run_reveal(self: Arc<Self>) {
        let cancel = self.tasks.token();

        for index in 0..CANDIDATE_COUNT {
            let halted = self.mutate(|state| {
                if state.completed {
                    return true;
                }
                state.phase = RoundPhase::Revealing(index as u8);
                state.flipped[index] = true;
                false
            });
            if halted {
                return;
            }

            if index + 1 < CANDIDATE_COUNT {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(self.round_cfg.reveal_interval) => {}
                }
            }
        }

        self.mutate(|state| {
            if !state.completed {
                state.phase = RoundPhase::Settling;
            }
        });
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(self.round_cfg.settle_delay) => {}
        }

        let round_id = self.mutate(|state| {
            state.fully_revealed = true;
            if !state.completed {
                state.phase = RoundPhase::Armed;
            }
            state.round_id
        });
        info!(round_id, "all candidates revealed; arming countdown");
        self.arm();
    }
}
