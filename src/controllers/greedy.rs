//! Deterministic greedy controller.

// Pawn counts are small non-negative values
#![allow(clippy::cast_precision_loss)]

use crate::controller::Controller;
use crate::game::{Command, FortressId, Kind, Rules, Team, View};

/// Expands whenever it can win a fight outright and upgrades in safe rear
/// fortresses otherwise.
///
/// Each tick, in order:
/// 1. Upgrade the first fortress that is full, can pay, and has no enemy
///    neighbor.
/// 2. Deploy from the strongest fortress to the weakest neighbor it does
///    not hold, if half its garrison deals enough damage to capture it and
///    no own pawns are already heading there.
/// 3. Otherwise wait.
#[derive(Debug, Clone, Copy)]
pub struct Greedy {
    damage: [f64; 2],
}

impl Greedy {
    /// Create a controller that sizes its attacks with `rules`.
    #[must_use]
    pub fn new(rules: &Rules) -> Self {
        Self {
            damage: [rules.damage(Kind::Kind0), rules.damage(Kind::Kind1)],
        }
    }

    fn safe_upgrade(view: &View) -> Option<FortressId> {
        view.mine().find(|&id| {
            let fortress = &view.fortresses[id];
            fortress.level.is_upgradable()
                && fortress.upgrade_timer.is_none()
                && fortress.pawns >= f64::from(fortress.capacity)
                && !fortress.neighbors.iter().any(|&n| view.is_enemy(n))
        })
    }

    fn already_targeted(view: &View, target: FortressId) -> bool {
        view.moving
            .iter()
            .any(|p| p.team == Team::A && p.to == target)
            || view
                .spawning
                .iter()
                .any(|b| b.team == Team::A && b.to == target)
    }

    fn best_attack(&self, view: &View) -> Option<(FortressId, FortressId)> {
        let mut subjects: Vec<FortressId> = view
            .mine()
            .filter(|&id| view.fortresses[id].pawns >= 2.0)
            .collect();
        subjects.sort_by(|&a, &b| {
            view.fortresses[b]
                .pawns
                .total_cmp(&view.fortresses[a].pawns)
                .then(a.cmp(&b))
        });

        for subject in subjects {
            let fortress = &view.fortresses[subject];
            let strike = (fortress.pawns / 2.0).floor() * self.damage[fortress.kind.index()];
            let weakest = fortress
                .neighbors
                .iter()
                .copied()
                .filter(|&n| !view.is_mine(n) && !Self::already_targeted(view, n))
                .min_by(|&a, &b| {
                    view.fortresses[a]
                        .pawns
                        .total_cmp(&view.fortresses[b].pawns)
                        .then(a.cmp(&b))
                });
            if let Some(target) = weakest
                && strike > view.fortresses[target].pawns
            {
                return Some((subject, target));
            }
        }
        None
    }
}

impl Controller for Greedy {
    fn name(&self) -> &str {
        "greedy"
    }

    fn decide(&mut self, view: &View) -> Command {
        if let Some(subject) = Self::safe_upgrade(view) {
            return Command::Upgrade { subject };
        }
        if let Some((subject, target)) = self.best_attack(view) {
            return Command::Deploy { subject, target };
        }
        Command::Wait
    }
}
