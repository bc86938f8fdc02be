//! Round flow controller - drives reveal, countdown, and verification.
//!
//! One controller instance exists per mounted UI; the authoritative
//! `RoundState` and the `GameSession` outlive it and may be re-attached
//! after a remount. All mutation funnels through `mutate`, which derives
//! edge-triggered transitions for the logs and republishes the derived
//! view to subscribers.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::adapters::verify::VerificationService;
use crate::config::retry::RetryConfig;
use crate::config::round::RoundConfig;
use crate::domain::candidate::CandidateSet;
use crate::domain::player_view::RoundView;
use crate::domain::round_transition::{derive_round_transitions, RoundSnapshot};
use crate::domain::state::{RoundId, RoundState};
use crate::error::FlowError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::infra::tasks::TaskSet;
use crate::state::session::GameSession;

mod countdown;
mod remount;
mod reveal;
mod verification;

pub use remount::ResumePlan;

/// Controller for one elimination round.
pub struct RoundFlow {
    state: Arc<Mutex<RoundState>>,
    session: Arc<GameSession>,
    verify: Arc<dyn VerificationService>,
    round_cfg: RoundConfig,
    retry_cfg: RetryConfig,
    tasks: TaskSet,
    /// Idempotent-arming latch for the countdown.
    armed: AtomicBool,
    /// Set once a completed round asks its host to transition out.
    close_requested: AtomicBool,
    view_tx: watch::Sender<RoundView>,
    /// Self-handle for spawning tasks from `&self` entry points.
    weak: Weak<RoundFlow>,
}

impl RoundFlow {
    /// Build a fresh round for today's challenge.
    ///
    /// `options` is the externally fetched candidate list; it must hold
    /// exactly five entries.
    pub fn start(
        session: Arc<GameSession>,
        verify: Arc<dyn VerificationService>,
        options: Vec<String>,
        round_cfg: RoundConfig,
        retry_cfg: RetryConfig,
    ) -> Result<Arc<Self>, FlowError> {
        let challenge = session.challenge();
        let candidates = CandidateSet::new(options)?;
        let state = Arc::new(Mutex::new(RoundState::new(
            challenge.round_id,
            candidates,
            round_cfg.countdown_secs,
        )));
        Ok(Self::attach(state, session, verify, round_cfg, retry_cfg))
    }

    /// Controller over an existing round state, as happens when the
    /// hosting UI is destroyed and recreated mid-round.
    pub fn attach(
        state: Arc<Mutex<RoundState>>,
        session: Arc<GameSession>,
        verify: Arc<dyn VerificationService>,
        round_cfg: RoundConfig,
        retry_cfg: RetryConfig,
    ) -> Arc<Self> {
        let view = {
            let state = state.lock();
            RoundView::project(&state, false)
        };
        let (view_tx, _) = watch::channel(view);
        Arc::new_cyclic(|weak| Self {
            state,
            session,
            verify,
            round_cfg,
            retry_cfg,
            tasks: TaskSet::new(),
            armed: AtomicBool::new(false),
            close_requested: AtomicBool::new(false),
            view_tx,
            weak: weak.clone(),
        })
    }

    /// Subscribe to derived view snapshots; a new value is published on
    /// every committed mutation.
    pub fn subscribe(&self) -> watch::Receiver<RoundView> {
        self.view_tx.subscribe()
    }

    /// Current derived view.
    pub fn view(&self) -> RoundView {
        self.view_tx.borrow().clone()
    }

    /// The externally-owned state container; hand it back to `attach`
    /// after a remount.
    pub fn state_handle(&self) -> Arc<Mutex<RoundState>> {
        Arc::clone(&self.state)
    }

    /// Tear the round down: aborts pending timers and signals in-flight
    /// verification to drop its result.
    pub fn teardown(&self) {
        info!(round_id = self.round_id(), "tearing down round");
        self.tasks.cancel_all();
    }

    /// The one player input: pick a candidate.
    ///
    /// Late or duplicate clicks (after completion, or once a selection is
    /// recorded) lose the race silently; picks that were never legal are
    /// reported back to the caller.
    pub fn select(&self, text: &str) -> Result<(), FlowError> {
        match self.mutate(|state| state.select(text)) {
            Ok(canonical) => {
                info!(round_id = self.round_id(), candidate = %canonical, "player selected");
                self.spawn_resolve_selection(canonical);
                Ok(())
            }
            Err(DomainError::Conflict(
                ConflictKind::AlreadyCompleted | ConflictKind::SelectionTaken,
                _,
            )) => {
                debug!("ignoring re-entrant selection");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn round_id(&self) -> RoundId {
        self.state.lock().round_id
    }

    /// Run a state mutation, log derived transitions, republish the view.
    fn mutate<R>(&self, f: impl FnOnce(&mut RoundState) -> R) -> R {
        let (result, transitions) = {
            let mut state = self.state.lock();
            let before = RoundSnapshot::of(&state);
            let result = f(&mut state);
            let after = RoundSnapshot::of(&state);
            (result, derive_round_transitions(&before, &after))
        };
        for transition in &transitions {
            debug!(?transition, "round transition");
        }
        self.publish();
        result
    }

    fn publish(&self) {
        let view = {
            let state = self.state.lock();
            RoundView::project(&state, self.close_requested.load(Ordering::SeqCst))
        };
        self.view_tx.send_replace(view);
    }

    fn spawn(&self, fut: impl Future<Output = ()> + Send + 'static) {
        self.tasks.register(tokio::spawn(fut));
    }

    /// Upgradeable self-handle for tasks; `None` only while the last
    /// holder is dropping the controller.
    fn strong(&self) -> Option<Arc<Self>> {
        self.weak.upgrade()
    }
}
