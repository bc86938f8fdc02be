//! Edge-triggered round lifecycle transitions.
//!
//! Derived from before/after snapshots of `RoundState` so observers (and
//! the structured logs) see events, not polled state.

use crate::domain::state::{Outcome, RoundPhase, RoundState};

/// Cheap lifecycle projection used for before/after comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub fully_revealed: bool,
    pub completed: bool,
    pub outcome: Outcome,
    pub expired: bool,
}

impl RoundSnapshot {
    pub fn of(state: &RoundState) -> Self {
        Self {
            phase: state.phase,
            fully_revealed: state.fully_revealed,
            completed: state.completed,
            outcome: state.outcome,
            expired: state.expired,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundTransition {
    /// Edge-triggered: all five candidates became visible.
    RevealFinished,

    /// Edge-triggered: the countdown went live.
    TimerArmed,

    /// Edge-triggered: the countdown reached zero.
    TimerExpired,

    /// Edge-triggered: a verification operation entered flight.
    ResolutionStarted,

    /// Edge-triggered: the round reached its terminal outcome.
    RoundCompleted { outcome: Outcome },
}

/// Derive lifecycle transitions from before/after state.
pub fn derive_round_transitions(
    before: &RoundSnapshot,
    after: &RoundSnapshot,
) -> Vec<RoundTransition> {
    let mut transitions = Vec::new();

    if !before.fully_revealed && after.fully_revealed {
        transitions.push(RoundTransition::RevealFinished);
    }

    if before.phase != RoundPhase::Armed && after.phase == RoundPhase::Armed {
        transitions.push(RoundTransition::TimerArmed);
    }

    if !before.expired && after.expired {
        transitions.push(RoundTransition::TimerExpired);
    }

    if before.phase != RoundPhase::Resolving && after.phase == RoundPhase::Resolving {
        transitions.push(RoundTransition::ResolutionStarted);
    }

    if !before.completed && after.completed {
        transitions.push(RoundTransition::RoundCompleted {
            outcome: after.outcome,
        });
    }

    transitions
}
