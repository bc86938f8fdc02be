//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use lastcall::{
    Challenge, GameSession, RetryConfig, RoundConfig, RoundFlow, ScriptedVerification,
    VerificationService,
};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Idempotent logging init for integration tests (mirrors the unit-test
/// bootstrap; `TEST_LOG` / `RUST_LOG`, default `warn`).
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_test_writer()
            .without_time()
            .try_init();
    });
}

pub fn options() -> Vec<String> {
    ["Paris", "Lima", "Rome", "Cairo", "Oslo"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn session() -> Arc<GameSession> {
    Arc::new(GameSession::new(
        Challenge {
            round_id: 42,
            prompt: "Capital on the Tiber?".into(),
            language: "en".into(),
        },
        false,
    ))
}

pub struct Fixture {
    pub flow: Arc<RoundFlow>,
    pub verify: Arc<ScriptedVerification>,
    pub session: Arc<GameSession>,
}

impl Fixture {
    pub fn new() -> Self {
        init_logging();
        let session = session();
        let verify = Arc::new(ScriptedVerification::new());
        let verify_dyn: Arc<dyn VerificationService> = verify.clone();
        let flow = RoundFlow::start(
            Arc::clone(&session),
            verify_dyn,
            options(),
            RoundConfig::default(),
            RetryConfig::default(),
        )
        .expect("five candidates");
        Self {
            flow,
            verify,
            session,
        }
    }

    /// Mount and advance through the reveal so the countdown is armed
    /// (five flips at 500 ms cadence plus the settle delay).
    ///
    /// The settle before advancing pins the reveal task's start to t=0,
    /// keeping every later deadline on exact whole-second boundaries.
    pub async fn mount_and_arm(&self) {
        self.flow.mount();
        settle().await;
        step(2500).await;
    }
}

/// Let spawned tasks run without advancing the clock.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Advance paused time in small chunks so repeating timers fire on every
/// due tick, not just the first one.
pub async fn step(ms: u64) {
    let mut remaining = ms;
    while remaining > 0 {
        let chunk = remaining.min(100);
        tokio::time::advance(Duration::from_millis(chunk)).await;
        remaining -= chunk;
        settle().await;
    }
    settle().await;
}
