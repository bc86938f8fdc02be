use crate::domain::round_transition::{
    derive_round_transitions, RoundSnapshot, RoundTransition,
};
use crate::domain::state::{Outcome, RoundPhase};

fn snap(phase: RoundPhase, completed: bool, outcome: Outcome) -> RoundSnapshot {
    RoundSnapshot {
        phase,
        fully_revealed: matches!(
            phase,
            RoundPhase::Armed | RoundPhase::Resolving | RoundPhase::Completed
        ),
        completed,
        outcome,
        expired: false,
    }
}

#[test]
fn derive_transitions_empty_when_unchanged() {
    let s = snap(RoundPhase::Armed, false, Outcome::Unresolved);
    assert!(derive_round_transitions(&s, &s).is_empty());
}

#[test]
fn derive_transitions_emits_reveal_and_arm_together() {
    let before = snap(RoundPhase::Settling, false, Outcome::Unresolved);
    let after = snap(RoundPhase::Armed, false, Outcome::Unresolved);
    let t = derive_round_transitions(&before, &after);
    assert!(t.contains(&RoundTransition::TimerArmed));
    // Settling snapshots are not fully revealed in this fixture, so the
    // reveal edge fires on the same mutation.
    assert!(t.contains(&RoundTransition::RevealFinished));
}

#[test]
fn derive_transitions_emits_resolution_started() {
    let before = snap(RoundPhase::Armed, false, Outcome::Unresolved);
    let after = snap(RoundPhase::Resolving, false, Outcome::Unresolved);
    let t = derive_round_transitions(&before, &after);
    assert_eq!(t, vec![RoundTransition::ResolutionStarted]);
}

#[test]
fn derive_transitions_emits_completed_with_outcome() {
    let before = snap(RoundPhase::Resolving, false, Outcome::Unresolved);
    let after = snap(RoundPhase::Completed, true, Outcome::Win);
    let t = derive_round_transitions(&before, &after);
    assert_eq!(
        t,
        vec![RoundTransition::RoundCompleted {
            outcome: Outcome::Win
        }]
    );
}

#[test]
fn derive_transitions_emits_expired_edge_once() {
    let mut before = snap(RoundPhase::Armed, false, Outcome::Unresolved);
    let mut after = before;
    after.expired = true;
    let t = derive_round_transitions(&before, &after);
    assert_eq!(t, vec![RoundTransition::TimerExpired]);

    // Already-expired before: no re-emission.
    before.expired = true;
    assert!(derive_round_transitions(&before, &after).is_empty());
}
