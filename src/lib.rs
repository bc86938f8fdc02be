#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Timed last-chance elimination round engine for a daily trivia game.
//!
//! When the player exhausts their normal guesses, five candidate answers
//! are revealed one by one, a countdown arms, and the pick (or the
//! expiry) is verified against the remote authority exactly once. The
//! crate is the round controller only: presentation subscribes to derived
//! view snapshots and feeds back a single input event.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod infra;
pub mod services;
pub mod state;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use adapters::verify::{GuessEntry, GuessRecord, ResolvedAnswer, VerificationService};
pub use adapters::verify_http::HttpVerificationService;
pub use adapters::verify_mock::ScriptedVerification;
pub use config::retry::RetryConfig;
pub use config::round::RoundConfig;
pub use domain::player_view::{CandidateView, RoundView};
pub use domain::state::{Outcome, Progress, RoundId, RoundPhase, RoundState, ANSWER_UNAVAILABLE};
pub use error::FlowError;
pub use errors::ErrorCode;
pub use services::round_flow::{ResumePlan, RoundFlow};
pub use state::session::{Challenge, GameSession, RoundSummary, StreakStats};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
