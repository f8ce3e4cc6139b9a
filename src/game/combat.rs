//! Arrival resolution.
//!
//! A pawn reaching a friendly fortress reinforces it by one. A pawn reaching
//! any other fortress deals its kind's damage; if that drives the garrison
//! strictly below zero the fortress is captured and reset to level 1 with an
//! empty garrison.

use crate::game::{Fortress, MovingPawn, Rules};

/// What an arriving pawn did to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalOutcome {
    /// Friendly fortress gained a pawn.
    Reinforced,
    /// Hostile or neutral fortress lost pawns but held.
    Damaged,
    /// Hostile or neutral fortress fell to the pawn's team.
    Captured,
}

/// Apply one arriving pawn to its destination fortress.
pub fn resolve_arrival(fortress: &mut Fortress, pawn: &MovingPawn, rules: &Rules) -> ArrivalOutcome {
    if fortress.owner.is(pawn.team) {
        fortress.pawns += 1.0;
        return ArrivalOutcome::Reinforced;
    }

    fortress.pawns -= rules.damage(pawn.kind);
    if fortress.pawns < 0.0 {
        fortress.capture(pawn.team);
        ArrivalOutcome::Captured
    } else {
        ArrivalOutcome::Damaged
    }
}
