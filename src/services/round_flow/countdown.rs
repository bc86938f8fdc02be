//! Once-per-second countdown while the round is armed.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::{debug, info};

use super::RoundFlow;

enum Tick {
    Continue,
    /// Paused: the second elapses without consuming clock time.
    Skipped,
    /// Round settled while we slept; stop ticking for good.
    Halt,
    Expired,
}

impl RoundFlow {
    /// Arm the countdown. Idempotent: re-arming an armed timer is a no-op.
    pub(crate) fn arm(&self) {
        if self.armed.swap(true, Ordering::SeqCst) {
            debug!("countdown already armed");
            return;
        }
        let Some(flow) = self.strong() else { return };
        self.spawn(async move { flow.run_countdown().await });
    }

    async fn run_countdown(self: Arc<Self>) {
        let cancel = self.tasks.token();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(self.round_cfg.tick_interval) => {}
            }

            let tick = self.mutate(|state| {
                if state.completed {
                    return Tick::Halt;
                }
                if state.paused {
                    return Tick::Skipped;
                }
                if state.tick() == 0 {
                    state.expired = true;
                    Tick::Expired
                } else {
                    Tick::Continue
                }
            });

            match tick {
                Tick::Continue | Tick::Skipped => {}
                Tick::Halt => return,
                Tick::Expired => {
                    info!(round_id = self.round_id(), "countdown expired");
                    self.spawn_resolve_expiry();
                    return;
                }
            }
        }
    }

    /// Suspend ticking; the remaining value is preserved.
    pub fn pause(&self) {
        self.mutate(|state| {
            if !state.completed {
                state.paused = true;
            }
        });
    }

    /// Continue ticking from the preserved value.
    pub fn resume(&self) {
        self.mutate(|state| state.paused = false);
    }
}
