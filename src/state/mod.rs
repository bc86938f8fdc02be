//! Shared state containers owned by the embedding game.

pub mod session;

pub use session::{Challenge, GameSession, RoundSummary, StreakStats};
