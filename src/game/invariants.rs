//! Game invariants - sanity checks that detect bugs.
//!
//! The tick loop should never produce a state that fails these checks. They
//! run after every tick in debug builds and from the fuzz and property tests.

use crate::game::{FORTRESS_COUNT, GameState, Rules, Topology};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(
    state: &GameState,
    topology: &Topology,
    rules: &Rules,
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violation = |message: String| violations.push(InvariantViolation { message });

    for (id, fortress) in state.fortresses.iter().enumerate() {
        if !fortress.pawns.is_finite() || fortress.pawns < 0.0 {
            violation(format!("Fortress {id} has invalid pawn count {}", fortress.pawns));
        }
        if let Some(timer) = fortress.upgrade_timer {
            if !fortress.level.is_upgradable() {
                violation(format!("Fortress {id} is upgrading past the top level"));
            }
            if timer > rules.upgrade_duration {
                violation(format!(
                    "Fortress {id} upgrade timer {timer} exceeds duration {}",
                    rules.upgrade_duration
                ));
            }
            if fortress.owner.team().is_none() {
                violation(format!("Neutral fortress {id} is upgrading"));
            }
        }
    }

    for pawn in &state.moving {
        if pawn.from >= FORTRESS_COUNT || !topology.is_reachable(pawn.from, pawn.to) {
            violation(format!(
                "Moving pawn travels {} -> {} without a road",
                pawn.from, pawn.to
            ));
        }
        if !pawn.position.x.is_finite() || !pawn.position.y.is_finite() {
            violation(format!("Moving pawn {} -> {} left the board", pawn.from, pawn.to));
        }
    }

    for batch in &state.spawning {
        if batch.from >= FORTRESS_COUNT || !topology.is_reachable(batch.from, batch.to) {
            violation(format!(
                "Batch departs {} -> {} without a road",
                batch.from, batch.to
            ));
        }
        if batch.is_exhausted() {
            violation(format!(
                "Exhausted batch {} -> {} was not removed",
                batch.from, batch.to
            ));
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState, topology: &Topology, rules: &Rules) {
    let violations = check_invariants(state, topology, rules);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!(
            "Game invariant violations at tick {}:\n  - {}",
            state.tick,
            messages.join("\n  - ")
        );
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState, _topology: &Topology, _rules: &Rules) {}
