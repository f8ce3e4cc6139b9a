//! Randomized sample controller.

// Pawn counts are small non-negative values
#![allow(clippy::cast_precision_loss)]

use crate::controller::Controller;
use crate::game::{Command, FORTRESS_COUNT, Rng, View};

/// Picks a random fortress, order and neighbor every tick.
///
/// The order only goes through when the chosen fortress holds at least half
/// its capacity, and then only with probability `(pawns / capacity - 0.5) / 3`,
/// so a fuller fortress acts more often. The fortress is not checked for
/// ownership; the engine drops orders for fortresses the side does not hold.
#[derive(Debug, Clone, Copy)]
pub struct RandomController {
    rng: Rng,
}

impl RandomController {
    /// Create a controller drawing from `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { rng: Rng::new(seed) }
    }
}

impl Controller for RandomController {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, view: &View) -> Command {
        let subject = self.rng.below(FORTRESS_COUNT);
        let order = self.rng.below(3);
        let fortress = &view.fortresses[subject];
        let Some(&target) = fortress
            .neighbors
            .get(self.rng.below(fortress.neighbors.len()))
        else {
            return Command::Wait;
        };

        let capacity = f64::from(fortress.capacity);
        if fortress.pawns < f64::from(fortress.capacity / 2) {
            return Command::Wait;
        }
        if self.rng.next_f64() >= (fortress.pawns / capacity - 0.5) / 3.0 {
            return Command::Wait;
        }

        match order {
            1 => Command::Deploy { subject, target },
            2 => Command::Upgrade { subject },
            _ => Command::Wait,
        }
    }
}
