//! Pawns in transit and batches waiting to depart.

use serde::{Deserialize, Serialize};

use crate::game::{FortressId, Kind, Team, Vec2};

/// A single pawn travelling along a road.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingPawn {
    /// Side the pawn fights for.
    pub team: Team,
    /// Kind of the fortress that sent it.
    pub kind: Kind,
    /// Source fortress.
    pub from: FortressId,
    /// Destination fortress.
    pub to: FortressId,
    /// Current position, only used to detect arrival.
    pub position: Vec2,
}

/// Pawns mobilized by a deploy order that have not yet left the source.
///
/// One pawn leaves every departure period until `remaining` reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawningBatch {
    /// Side the pawns fight for.
    pub team: Team,
    /// Kind of the source fortress.
    pub kind: Kind,
    /// Pawns still waiting to depart.
    pub remaining: u32,
    /// Source fortress.
    pub from: FortressId,
    /// Destination fortress.
    pub to: FortressId,
    /// Point on the road where pawns appear.
    pub spawn_position: Vec2,
}

impl SpawningBatch {
    /// Release one pawn at `position`, or `None` once the batch is empty.
    pub fn release(&mut self, position: Vec2) -> Option<MovingPawn> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(MovingPawn {
            team: self.team,
            kind: self.kind,
            from: self.from,
            to: self.to,
            position,
        })
    }

    /// Whether every pawn has departed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_counts_down() {
        let mut batch = SpawningBatch {
            team: Team::A,
            kind: Kind::Kind0,
            remaining: 2,
            from: 10,
            to: 7,
            spawn_position: Vec2::new(1.0, 2.0),
        };

        let first = batch.release(Vec2::new(3.0, 4.0)).unwrap();
        assert_eq!(first.team, Team::A);
        assert_eq!((first.from, first.to), (10, 7));
        assert_eq!(first.position, Vec2::new(3.0, 4.0));
        assert!(!batch.is_exhausted());

        assert!(batch.release(batch.spawn_position).is_some());
        assert!(batch.is_exhausted());
        assert!(batch.release(batch.spawn_position).is_none());
    }
}
