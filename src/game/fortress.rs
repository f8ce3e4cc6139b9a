//! Fortress state.

use serde::{Deserialize, Serialize};

/// Number of fortresses on every map.
pub const FORTRESS_COUNT: usize = 12;

/// Index of a fortress on the board (0..12).
pub type FortressId = usize;

/// One of the two competing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// The bottom side. Always presented the identity view.
    A,
    /// The top side. Always presented the flipped view.
    B,
}

impl Team {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    /// Index into per-team arrays (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "Blue"),
            Team::B => write!(f, "Red"),
        }
    }
}

/// Who holds a fortress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Owner {
    /// Nobody.
    #[default]
    Neutral,
    /// A team.
    Team(Team),
}

impl Owner {
    /// Swap team labels, leaving neutral fortresses alone.
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Owner::Neutral => Owner::Neutral,
            Owner::Team(team) => Owner::Team(team.opponent()),
        }
    }

    /// Whether `team` holds this fortress.
    #[must_use]
    pub fn is(self, team: Team) -> bool {
        self == Owner::Team(team)
    }

    /// The owning team, if any.
    #[must_use]
    pub const fn team(self) -> Option<Team> {
        match self {
            Owner::Neutral => None,
            Owner::Team(team) => Some(team),
        }
    }
}

/// Fortress category. Fixed for the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Fast, light pawns.
    #[default]
    Kind0,
    /// Slow, heavy pawns.
    Kind1,
}

impl Kind {
    /// Index into per-kind tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Kind::Kind0 => 0,
            Kind::Kind1 => 1,
        }
    }
}

/// Fortress level, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Lowest level; every captured fortress restarts here.
    pub const MIN: Level = Level(1);
    /// Highest level; no further upgrades.
    pub const MAX: Level = Level(5);

    /// Create a level, returning `None` outside `1..=5`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Raw level number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-level tables.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// The next level, or `None` at the top.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Whether an upgrade can start from this level.
    #[must_use]
    pub const fn is_upgradable(self) -> bool {
        self.0 < Self::MAX.0
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("level {value} outside 1..=5"))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

/// Mutable content of one fortress.
///
/// Capacity and production cooldown are derived from `kind` and `level`
/// through [`crate::game::Rules`]; they are never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fortress {
    /// Current holder.
    pub owner: Owner,
    /// Category, fixed for the match.
    pub kind: Kind,
    /// Current level.
    pub level: Level,
    /// Standing pawns. Fractional after combat damage.
    pub pawns: f64,
    /// Remaining upgrade ticks while an upgrade is in progress.
    pub upgrade_timer: Option<u32>,
}

impl Fortress {
    /// Create a fortress with no upgrade in progress.
    #[must_use]
    pub const fn new(owner: Owner, kind: Kind, level: Level, pawns: f64) -> Self {
        Self {
            owner,
            kind,
            level,
            pawns,
            upgrade_timer: None,
        }
    }

    /// Whether an upgrade is running.
    #[must_use]
    pub const fn is_upgrading(&self) -> bool {
        self.upgrade_timer.is_some()
    }

    /// Hand the fortress to `team`, resetting it to a fresh level-1 garrison.
    ///
    /// Any upgrade in progress is lost.
    pub fn capture(&mut self, team: Team) {
        self.owner = Owner::Team(team);
        self.level = Level::MIN;
        self.pawns = 0.0;
        self.upgrade_timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bounds() {
        assert!(Level::new(0).is_none());
        assert!(Level::new(6).is_none());
        assert_eq!(Level::new(1), Some(Level::MIN));
        assert_eq!(Level::new(5), Some(Level::MAX));
        assert_eq!(Level::MAX.next(), None);
        assert_eq!(Level::MIN.next().map(Level::get), Some(2));
        assert!(!Level::MAX.is_upgradable());
        assert!(Level::MIN.is_upgradable());
    }

    #[test]
    fn test_owner_swap_is_involution() {
        for owner in [Owner::Neutral, Owner::Team(Team::A), Owner::Team(Team::B)] {
            assert_eq!(owner.swapped().swapped(), owner);
        }
        assert_eq!(Owner::Team(Team::A).swapped(), Owner::Team(Team::B));
        assert_eq!(Owner::Neutral.swapped(), Owner::Neutral);
    }

    #[test]
    fn test_capture_resets_fortress() {
        let level3 = Level::new(3).unwrap();
        let mut fortress = Fortress::new(Owner::Team(Team::B), Kind::Kind1, level3, 0.3);
        fortress.upgrade_timer = Some(120);

        fortress.capture(Team::A);

        assert_eq!(fortress.owner, Owner::Team(Team::A));
        assert_eq!(fortress.level, Level::MIN);
        assert!(fortress.pawns.abs() < f64::EPSILON);
        assert!(!fortress.is_upgrading());
        assert_eq!(fortress.kind, Kind::Kind1);
    }

    #[test]
    fn test_level_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Level>("3").is_ok());
        assert!(serde_json::from_str::<Level>("0").is_err());
        assert!(serde_json::from_str::<Level>("6").is_err());
    }
}
