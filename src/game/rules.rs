//! Static rule tables.
//!
//! Production cooldown is indexed by `(kind, level)` and capacity by `level`.
//! Both lookups are total: [`Kind`] and [`Level`] cannot hold values outside
//! the tables.

use serde::{Deserialize, Serialize};

use crate::game::{Kind, Level};

/// Number of levels covered by the per-level tables.
pub const LEVEL_COUNT: usize = 5;

/// Number of fortress kinds.
pub const KIND_COUNT: usize = 2;

/// Match-wide rule tables and constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Maximum standing pawns produced up to, by level.
    pub capacity: [u32; LEVEL_COUNT],
    /// Ticks between produced pawns, by kind then level.
    pub cooldown: [[u32; LEVEL_COUNT]; KIND_COUNT],
    /// Ticks an upgrade takes.
    pub upgrade_duration: u32,
    /// Ticks between over-capacity decay steps.
    pub decay_interval: u32,
    /// Ticks between pawn releases from a batch, by kind.
    pub departure_period: [u32; KIND_COUNT],
    /// Distance a moving pawn covers per tick, by kind.
    pub speed: [f64; KIND_COUNT],
    /// Pawns removed from a hostile fortress per arriving pawn, by kind.
    pub damage: [f64; KIND_COUNT],
    /// A pawn within this distance of its target has arrived.
    pub arrival_radius: f64,
    /// Distance from the source centre at which a batch spawns pawns.
    pub spawn_offset: f64,
    /// Scale of the random lateral offset given to released pawns.
    pub jitter: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            capacity: [10, 20, 30, 40, 50],
            cooldown: [[40, 32, 25, 18, 12], [50, 40, 32, 24, 16]],
            upgrade_duration: 200,
            decay_interval: 40,
            departure_period: [7, 10],
            speed: [1.5, 1.0],
            damage: [0.65, 0.95],
            arrival_radius: 45.0,
            spawn_offset: 42.0,
            jitter: 10.0,
        }
    }
}

impl Rules {
    /// Capacity of a fortress at `level`.
    #[must_use]
    #[inline]
    pub fn capacity(&self, level: Level) -> u32 {
        self.capacity[level.index()]
    }

    /// Production interval in ticks.
    #[must_use]
    #[inline]
    pub fn cooldown(&self, kind: Kind, level: Level) -> u32 {
        self.cooldown[kind.index()][level.index()]
    }

    /// Pawns spent to start an upgrade from `level`.
    ///
    /// Integer half of the capacity, truncated.
    #[must_use]
    #[inline]
    pub fn upgrade_cost(&self, level: Level) -> u32 {
        self.capacity(level) / 2
    }

    /// Ticks between releases for a batch of `kind`.
    #[must_use]
    #[inline]
    pub fn departure_period(&self, kind: Kind) -> u32 {
        self.departure_period[kind.index()]
    }

    /// Per-tick travel distance of a `kind` pawn.
    #[must_use]
    #[inline]
    pub fn speed(&self, kind: Kind) -> f64 {
        self.speed[kind.index()]
    }

    /// Damage dealt by one arriving hostile `kind` pawn.
    #[must_use]
    #[inline]
    pub fn damage(&self, kind: Kind) -> f64 {
        self.damage[kind.index()]
    }

    /// Check the tables for values that would stall or break the tick loop.
    ///
    /// Returns a description of the first problem found.
    pub(crate) fn check(&self) -> Result<(), String> {
        // Decay keeps garrisons non-negative only while capacity >= 1
        if let Some(level) = self.capacity.iter().position(|&c| c == 0) {
            return Err(format!("capacity for level {} is zero", level + 1));
        }
        for (kind, row) in self.cooldown.iter().enumerate() {
            if let Some(level) = row.iter().position(|&c| c == 0) {
                return Err(format!("cooldown for kind {kind} level {} is zero", level + 1));
            }
        }
        if self.departure_period.contains(&0) {
            return Err("departure period is zero".to_string());
        }
        if self.decay_interval == 0 {
            return Err("decay interval is zero".to_string());
        }
        let reals = self
            .speed
            .iter()
            .chain(&self.damage)
            .chain([&self.arrival_radius, &self.spawn_offset, &self.jitter]);
        for value in reals {
            if !value.is_finite() || *value < 0.0 {
                return Err(format!("rule value {value} is not a finite non-negative number"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_tables() {
        let rules = Rules::default();
        assert_eq!(rules.capacity(Level::MIN), 10);
        assert_eq!(rules.capacity(Level::MAX), 50);
        assert_eq!(rules.upgrade_cost(Level::MIN), 5);
        assert_eq!(rules.departure_period(Kind::Kind0), 7);
        assert_eq!(rules.departure_period(Kind::Kind1), 10);
        assert!((rules.damage(Kind::Kind0) - 0.65).abs() < 1e-12);
        assert!((rules.damage(Kind::Kind1) - 0.95).abs() < 1e-12);
        assert!(rules.check().is_ok());
    }

    #[test]
    fn test_cooldown_lookup_is_total() {
        let rules = Rules::default();
        for kind in [Kind::Kind0, Kind::Kind1] {
            for raw in 1..=5 {
                let level = Level::new(raw).unwrap();
                assert!(rules.cooldown(kind, level) > 0);
            }
        }
    }

    #[test]
    fn test_check_rejects_zero_cooldown() {
        let mut rules = Rules::default();
        rules.cooldown[1][2] = 0;
        let err = rules.check().unwrap_err();
        assert!(err.contains("kind 1 level 3"));
    }

    #[test]
    fn test_check_rejects_zero_capacity() {
        let mut rules = Rules::default();
        rules.capacity[0] = 0;
        let err = rules.check().unwrap_err();
        assert!(err.contains("level 1"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules: Rules = serde_json::from_str(r#"{"upgrade_duration": 50}"#).unwrap();
        assert_eq!(rules.upgrade_duration, 50);
        assert_eq!(rules.capacity, Rules::default().capacity);
    }
}
