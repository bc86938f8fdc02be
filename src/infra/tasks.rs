//! Registry for round-scoped spawned tasks.
//!
//! Tearing down the round cancels the shared token and aborts every
//! pending timer task. In-flight network work checks the token before
//! mutating shared state on eventual resolution.

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct TaskSet {
    handles: Mutex<Vec<JoinHandle<()>>>,
    cancel: CancellationToken,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Liveness token handed to every spawned task.
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Track a spawned task; finished handles are pruned opportunistically.
    pub fn register(&self, handle: JoinHandle<()>) {
        let mut handles = self.handles.lock();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Cancel the token and abort all pending tasks.
    pub fn cancel_all(&self) {
        self.cancel.cancel();
        for handle in self.handles.lock().drain(..) {
            handle.abort();
        }
    }
}
