//! JSON configuration for custom boards and rule tables.
//!
//! A map file describes the board (positions, roads, symmetry) and the
//! opening position. A rules file overrides any subset of the reference
//! rule tables; missing fields keep their defaults.
//!
//! ```json
//! {
//!   "positions": [[250, 100], ...],
//!   "edges": [[0, 1], [0, 3], ...],
//!   "symmetry": [11, 10, 9, ...],
//!   "fortresses": [
//!     { "owner": "neutral", "kind": "kind0", "level": 1 },
//!     { "owner": "red", "kind": "kind0", "level": 2, "pawns": 20 },
//!     ...
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::game::{
    FORTRESS_COUNT, Fortress, FortressId, GameState, Kind, Level, Owner, Rules, Team,
    Topology, Vec2,
};

/// Starting holder of a fortress in a map file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Held by nobody.
    #[default]
    Neutral,
    /// Team A.
    Blue,
    /// Team B.
    Red,
}

impl From<Side> for Owner {
    fn from(side: Side) -> Self {
        match side {
            Side::Neutral => Owner::Neutral,
            Side::Blue => Owner::Team(Team::A),
            Side::Red => Owner::Team(Team::B),
        }
    }
}

impl From<Owner> for Side {
    fn from(owner: Owner) -> Self {
        match owner {
            Owner::Neutral => Side::Neutral,
            Owner::Team(Team::A) => Side::Blue,
            Owner::Team(Team::B) => Side::Red,
        }
    }
}

/// Opening state of one fortress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FortressConfig {
    /// Starting holder.
    #[serde(default)]
    pub owner: Side,
    /// Fortress category.
    #[serde(default)]
    pub kind: Kind,
    /// Starting level.
    pub level: Level,
    /// Starting garrison. Defaults to ten pawns per level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pawns: Option<f64>,
}

/// Board and opening position loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Fortress centres, `[x, y]`.
    pub positions: Vec<[f64; 2]>,
    /// Undirected roads.
    pub edges: Vec<[FortressId; 2]>,
    /// Point-symmetric counterpart of each fortress.
    pub symmetry: Vec<FortressId>,
    /// Opening state of each fortress.
    pub fortresses: Vec<FortressConfig>,
}

impl MapConfig {
    /// The reference board and opening.
    #[must_use]
    pub fn standard() -> Self {
        let topology = Topology::standard();
        let state = GameState::standard();
        Self {
            positions: topology.positions().iter().map(|p| [p.x, p.y]).collect(),
            edges: topology.edges().into_iter().map(|(a, b)| [a, b]).collect(),
            symmetry: topology.symmetry().to_vec(),
            fortresses: state
                .fortresses
                .iter()
                .map(|f| FortressConfig {
                    owner: f.owner.into(),
                    kind: f.kind,
                    level: f.level,
                    pawns: Some(f.pawns),
                })
                .collect(),
        }
    }

    /// Parse and validate a map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] if the map fails validation.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.build()?;
        Ok(config)
    }

    /// Validate the map and build its topology and opening state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a table does not have exactly one
    /// entry per fortress, a road or symmetry entry is out of range, the
    /// symmetry is not an involution mapping roads onto roads, or a garrison
    /// is negative or not finite.
    pub fn build(&self) -> ConfigResult<(Topology, GameState)> {
        let positions = exactly_twelve("positions", &self.positions)?.map(|[x, y]| Vec2::new(x, y));
        let symmetry = exactly_twelve("symmetry", &self.symmetry)?;
        let openings = exactly_twelve("fortresses", &self.fortresses)?;
        let edges: Vec<_> = self.edges.iter().map(|&[a, b]| (a, b)).collect();

        let topology = Topology::new(positions, &edges, symmetry)?;

        let mut fortresses = [Fortress::new(Owner::Neutral, Kind::Kind0, Level::MIN, 0.0); FORTRESS_COUNT];
        for (id, opening) in openings.iter().enumerate() {
            let pawns = opening
                .pawns
                .unwrap_or_else(|| f64::from(opening.level.get()) * 10.0);
            if !pawns.is_finite() || pawns < 0.0 {
                return Err(ConfigError::invalid(format!(
                    "fortress {id} starts with {pawns} pawns"
                )));
            }
            fortresses[id] = Fortress::new(opening.owner.into(), opening.kind, opening.level, pawns);
        }

        Ok((topology, GameState::new(fortresses)))
    }
}

fn exactly_twelve<T: Copy>(field: &str, values: &[T]) -> ConfigResult<[T; FORTRESS_COUNT]> {
    values.try_into().map_err(|_| {
        ConfigError::invalid(format!(
            "{field} has {} entries, expected {FORTRESS_COUNT}",
            values.len()
        ))
    })
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate a map file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or fails
/// validation.
pub fn load_map(path: impl AsRef<Path>) -> ConfigResult<(Topology, GameState)> {
    MapConfig::from_json(&read(path.as_ref())?)?.build()
}

/// Parse and validate rule tables. Missing fields keep reference values.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed JSON and
/// [`ConfigError::Invalid`] if a period or capacity is zero or a rate is negative or not
/// finite.
pub fn rules_from_json(json: &str) -> ConfigResult<Rules> {
    let rules: Rules = serde_json::from_str(json)?;
    rules.check().map_err(ConfigError::Invalid)?;
    Ok(rules)
}

/// Load and validate a rules file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or fails
/// validation.
pub fn load_rules(path: impl AsRef<Path>) -> ConfigResult<Rules> {
    rules_from_json(&read(path.as_ref())?)
}
