//! Per-tick fortress upkeep: production, over-capacity decay and upgrades.

use crate::game::{Fortress, FortressId, Rules};

/// Whether a periodic event with `period` fires on `tick`.
///
/// A zero period never fires.
#[must_use]
#[inline]
pub fn fires(tick: u32, period: u32) -> bool {
    period != 0 && tick % period == 0
}

/// Grow every owned garrison that is due and below capacity.
///
/// Neutral fortresses do not produce. Returns the number of fortresses that
/// gained a pawn.
pub fn produce(fortresses: &mut [Fortress], tick: u32, rules: &Rules) -> u32 {
    let mut produced = 0;
    for fortress in fortresses.iter_mut() {
        if fortress.owner.team().is_none() {
            continue;
        }
        if !fires(tick, rules.cooldown(fortress.kind, fortress.level)) {
            continue;
        }
        let capacity = f64::from(rules.capacity(fortress.level));
        if fortress.pawns < capacity {
            fortress.pawns = (fortress.pawns + 1.0).min(capacity);
            produced += 1;
        }
    }
    produced
}

/// Drain one pawn from every over-capacity fortress on decay ticks.
///
/// This is a slow correction, not a clamp: a fortress far above capacity
/// loses a single pawn per interval. Returns the number of fortresses drained.
pub fn decay(fortresses: &mut [Fortress], tick: u32, rules: &Rules) -> u32 {
    if !fires(tick, rules.decay_interval) {
        return 0;
    }
    let mut drained = 0;
    for fortress in fortresses.iter_mut() {
        if fortress.pawns > f64::from(rules.capacity(fortress.level)) {
            fortress.pawns -= 1.0;
            drained += 1;
        }
    }
    drained
}

/// Count down running upgrades and finish the ones that have run out.
///
/// A timer above zero is decremented; a timer already at zero completes the
/// upgrade on this tick. Returns the fortresses whose level rose.
pub fn advance_upgrades(fortresses: &mut [Fortress]) -> Vec<FortressId> {
    let mut completed = Vec::new();
    for (id, fortress) in fortresses.iter_mut().enumerate() {
        match fortress.upgrade_timer {
            Some(0) => {
                fortress.upgrade_timer = None;
                if let Some(next) = fortress.level.next() {
                    fortress.level = next;
                    completed.push(id);
                }
            }
            Some(remaining) => fortress.upgrade_timer = Some(remaining - 1),
            None => {}
        }
    }
    completed
}
