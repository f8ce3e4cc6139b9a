//! Orders a side can issue once per tick.

use serde::{Deserialize, Serialize};

use crate::game::FortressId;

/// One order per side per tick.
///
/// Indices are interpreted in the issuing side's own view; the engine maps
/// them back to board indices before applying them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Command {
    /// Do nothing.
    #[default]
    Wait,
    /// Send half the standing pawns of `subject` towards `target`.
    Deploy {
        /// Source fortress.
        subject: FortressId,
        /// Destination fortress (must be a neighbor of `subject`).
        target: FortressId,
    },
    /// Spend half the capacity of `subject` to raise its level.
    Upgrade {
        /// Fortress to upgrade.
        subject: FortressId,
    },
}

impl Command {
    /// Rewrite every fortress index through `map`.
    ///
    /// Returns `Wait` if any index is outside the board, so malformed orders
    /// degrade to no-ops instead of panicking.
    #[must_use]
    pub fn remap(self, map: impl Fn(FortressId) -> Option<FortressId>) -> Self {
        match self {
            Command::Wait => Command::Wait,
            Command::Deploy { subject, target } => match (map(subject), map(target)) {
                (Some(subject), Some(target)) => Command::Deploy { subject, target },
                _ => Command::Wait,
            },
            Command::Upgrade { subject } => {
                map(subject).map_or(Command::Wait, |subject| Command::Upgrade { subject })
            }
        }
    }

    /// Short label used in logs and statistics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Command::Wait => "wait",
            Command::Deploy { .. } => "deploy",
            Command::Upgrade { .. } => "upgrade",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_translates_indices() {
        let mirror = |i: FortressId| (i < 12).then(|| 11 - i);
        assert_eq!(
            Command::Deploy { subject: 10, target: 7 }.remap(mirror),
            Command::Deploy { subject: 1, target: 4 }
        );
        assert_eq!(
            Command::Upgrade { subject: 0 }.remap(mirror),
            Command::Upgrade { subject: 11 }
        );
        assert_eq!(Command::Wait.remap(mirror), Command::Wait);
    }

    #[test]
    fn test_remap_out_of_range_becomes_wait() {
        let mirror = |i: FortressId| (i < 12).then(|| 11 - i);
        assert_eq!(
            Command::Deploy { subject: 3, target: 12 }.remap(mirror),
            Command::Wait
        );
        assert_eq!(Command::Upgrade { subject: 99 }.remap(mirror), Command::Wait);
    }
}
