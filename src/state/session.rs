//! The main game's shared store, as the round engine sees it.
//!
//! The session outlives the round controller: the controller reads the
//! challenge and guess history from it and writes the terminal outcome
//! into it exactly once. It is an explicit, injected container with a
//! single writer per field, not an ambient global; tests construct a
//! fresh one per case.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::state::{Outcome, RoundId};

/// Today's challenge as fetched by the main game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub round_id: RoundId,
    pub prompt: String,
    /// Language the authoritative answer should be resolved in.
    pub language: String,
}

/// Win/streak bookkeeping across daily challenges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    pub played: u32,
    pub wins: u32,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl StreakStats {
    fn record(&mut self, won: bool) {
        self.played += 1;
        if won {
            self.wins += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }
}

/// Summary persisted when a round completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub outcome: Outcome,
    /// Verification attempts performed by the completing operation.
    pub attempts: u32,
    /// Countdown seconds consumed before the terminal outcome.
    pub elapsed_secs: u32,
    pub completed_at: OffsetDateTime,
}

#[derive(Debug)]
struct SessionInner {
    challenge: Challenge,
    wrong_guess_history: Vec<String>,
    hard_mode: bool,
    final_outcome: Option<Outcome>,
    completed: bool,
    error_message: Option<String>,
    streak: StreakStats,
    last_summary: Option<RoundSummary>,
}

/// Shared main-game store.
#[derive(Debug)]
pub struct GameSession {
    inner: Mutex<SessionInner>,
}

impl GameSession {
    pub fn new(challenge: Challenge, hard_mode: bool) -> Self {
        Self {
            inner: Mutex::new(SessionInner {
                challenge,
                wrong_guess_history: Vec::new(),
                hard_mode,
                final_outcome: None,
                completed: false,
                error_message: None,
                streak: StreakStats::default(),
                last_summary: None,
            }),
        }
    }

    /// Seed previous streak bookkeeping (loaded by the main game).
    pub fn with_streak(self, streak: StreakStats) -> Self {
        self.inner.lock().streak = streak;
        self
    }

    pub fn challenge(&self) -> Challenge {
        self.inner.lock().challenge.clone()
    }

    pub fn hard_mode(&self) -> bool {
        self.inner.lock().hard_mode
    }

    /// Recorded by the main round as normal guesses fail; read-only input
    /// for the elimination round.
    pub fn record_wrong_guess(&self, guess: impl Into<String>) {
        self.inner.lock().wrong_guess_history.push(guess.into());
    }

    pub fn wrong_guess_history(&self) -> Vec<String> {
        self.inner.lock().wrong_guess_history.clone()
    }

    /// Write-once terminal bookkeeping for the elimination round.
    ///
    /// Returns `true` iff this call performed the write; later calls are
    /// no-ops so a racing duplicate completion cannot double-count a
    /// streak.
    pub fn finalize_round(&self, summary: RoundSummary) -> bool {
        let mut inner = self.inner.lock();
        if inner.completed {
            return false;
        }
        inner.completed = true;
        inner.final_outcome = Some(summary.outcome);
        inner.error_message = None;
        inner.streak.record(summary.outcome == Outcome::Win);
        inner.last_summary = Some(summary);
        true
    }

    /// Mirror a recoverable round-level error for the main game's UI.
    pub fn set_error(&self, message: impl Into<String>) {
        let mut inner = self.inner.lock();
        if !inner.completed {
            inner.error_message = Some(message.into());
        }
    }

    pub fn clear_error(&self) {
        self.inner.lock().error_message = None;
    }

    pub fn error_message(&self) -> Option<String> {
        self.inner.lock().error_message.clone()
    }

    pub fn is_completed(&self) -> bool {
        self.inner.lock().completed
    }

    pub fn final_outcome(&self) -> Option<Outcome> {
        self.inner.lock().final_outcome
    }

    pub fn streak(&self) -> StreakStats {
        self.inner.lock().streak
    }

    pub fn last_summary(&self) -> Option<RoundSummary> {
        self.inner.lock().last_summary.clone()
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::{Challenge, GameSession, RoundSummary, StreakStats};
    use crate::domain::state::Outcome;

    fn session() -> GameSession {
        GameSession::new(
            Challenge {
                round_id: 42,
                prompt: "Capital on the Tiber?".into(),
                language: "en".into(),
            },
            false,
        )
    }

    fn summary(outcome: Outcome) -> RoundSummary {
        RoundSummary {
            outcome,
            attempts: 1,
            elapsed_secs: 3,
            completed_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn finalize_round_is_write_once() {
        let session = session();
        assert!(session.finalize_round(summary(Outcome::Win)));
        assert!(!session.finalize_round(summary(Outcome::LossExpired)));
        assert_eq!(session.final_outcome(), Some(Outcome::Win));
        assert_eq!(session.streak().played, 1);
    }

    #[test]
    fn win_extends_streak_and_loss_breaks_it() {
        let session = session().with_streak(StreakStats {
            played: 4,
            wins: 3,
            current_streak: 3,
            best_streak: 3,
        });
        assert!(session.finalize_round(summary(Outcome::Win)));
        let streak = session.streak();
        assert_eq!(streak.current_streak, 4);
        assert_eq!(streak.best_streak, 4);

        let other = session_with_streak(streak);
        assert!(other.finalize_round(summary(Outcome::LossWrong)));
        assert_eq!(other.streak().current_streak, 0);
        assert_eq!(other.streak().best_streak, 4);
    }

    fn session_with_streak(streak: StreakStats) -> GameSession {
        session().with_streak(streak)
    }

    #[test]
    fn finalize_clears_pending_error() {
        let session = session();
        session.set_error("verification unavailable");
        assert!(session.error_message().is_some());
        assert!(session.finalize_round(summary(Outcome::LossExpired)));
        assert!(session.error_message().is_none());
    }

    #[test]
    fn errors_are_ignored_after_completion() {
        let session = session();
        assert!(session.finalize_round(summary(Outcome::Win)));
        session.set_error("late failure");
        assert!(session.error_message().is_none());
    }
}
