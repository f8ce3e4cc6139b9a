//! Board geometry: fortress positions, roads and the point symmetry.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::game::{FORTRESS_COUNT, FortressId};

/// A point or vector on the board.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component (grows downwards).
    pub y: f64,
}

impl Vec2 {
    /// Create a vector.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Scale by `factor`.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Squared distance to `other`.
    #[must_use]
    pub fn distance_sq(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Length of the vector.
    #[must_use]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit normal, rotated a quarter turn from this direction.
    #[must_use]
    pub fn normal(self) -> Self {
        Self::new(self.y, -self.x)
    }
}

/// Reference board positions, point-symmetric about (500, 400).
const STANDARD_POSITIONS: [(f64, f64); FORTRESS_COUNT] = [
    (250.0, 100.0),
    (500.0, 70.0),
    (750.0, 100.0),
    (170.0, 320.0),
    (500.0, 250.0),
    (830.0, 320.0),
    (170.0, 480.0),
    (500.0, 550.0),
    (830.0, 480.0),
    (250.0, 700.0),
    (500.0, 730.0),
    (750.0, 700.0),
];

/// Reference roads (undirected).
const STANDARD_EDGES: [(FortressId, FortressId); 25] = [
    (0, 1),
    (0, 3),
    (0, 4),
    (1, 2),
    (1, 4),
    (2, 4),
    (2, 5),
    (3, 4),
    (3, 6),
    (3, 7),
    (4, 5),
    (4, 6),
    (4, 7),
    (4, 8),
    (5, 7),
    (5, 8),
    (6, 7),
    (6, 9),
    (7, 8),
    (7, 9),
    (7, 10),
    (7, 11),
    (8, 11),
    (9, 10),
    (10, 11),
];

/// Immutable board geometry.
///
/// Direction vectors and neighbor lists are precomputed once; the symmetry
/// table `σ` maps each fortress to its point-symmetric counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    positions: [Vec2; FORTRESS_COUNT],
    neighbors: [Vec<FortressId>; FORTRESS_COUNT],
    directions: [[Option<Vec2>; FORTRESS_COUNT]; FORTRESS_COUNT],
    symmetry: [FortressId; FORTRESS_COUNT],
}

impl Topology {
    /// Build and validate a topology.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if an edge is out of range or a
    /// self-loop, two connected fortresses share a position, the symmetry
    /// table is not an involution, or the symmetry does not map roads onto
    /// roads.
    pub fn new(
        positions: [Vec2; FORTRESS_COUNT],
        edges: &[(FortressId, FortressId)],
        symmetry: [FortressId; FORTRESS_COUNT],
    ) -> ConfigResult<Self> {
        for (i, p) in positions.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(ConfigError::invalid(format!("position of fortress {i} is not finite")));
            }
        }
        for &(a, b) in edges {
            if a >= FORTRESS_COUNT || b >= FORTRESS_COUNT {
                return Err(ConfigError::invalid(format!("road {a}-{b} is out of range")));
            }
            if a == b {
                return Err(ConfigError::invalid(format!("road {a}-{b} is a self-loop")));
            }
            if positions[a].distance_sq(positions[b]) <= 0.0 {
                return Err(ConfigError::invalid(format!(
                    "road {a}-{b} joins fortresses at the same position"
                )));
            }
        }
        for (i, &j) in symmetry.iter().enumerate() {
            if j >= FORTRESS_COUNT {
                return Err(ConfigError::invalid(format!("symmetry of {i} is out of range")));
            }
            if symmetry[j] != i {
                return Err(ConfigError::invalid(format!(
                    "symmetry is not an involution at fortress {i}"
                )));
            }
        }

        let topology = Self::build(positions, edges, symmetry);

        for a in 0..FORTRESS_COUNT {
            for &b in topology.neighbors(a) {
                if !topology.is_reachable(symmetry[a], symmetry[b]) {
                    return Err(ConfigError::invalid(format!(
                        "road {a}-{b} has no symmetric counterpart"
                    )));
                }
            }
        }

        Ok(topology)
    }

    /// The reference 12-fortress board.
    #[must_use]
    pub fn standard() -> Self {
        let positions = STANDARD_POSITIONS.map(|(x, y)| Vec2::new(x, y));
        let symmetry = std::array::from_fn(|i| FORTRESS_COUNT - 1 - i);
        Self::build(positions, &STANDARD_EDGES, symmetry)
    }

    fn build(
        positions: [Vec2; FORTRESS_COUNT],
        edges: &[(FortressId, FortressId)],
        symmetry: [FortressId; FORTRESS_COUNT],
    ) -> Self {
        let mut neighbors: [Vec<FortressId>; FORTRESS_COUNT] = Default::default();
        let mut directions = [[None; FORTRESS_COUNT]; FORTRESS_COUNT];

        for &(a, b) in edges {
            for (from, to) in [(a, b), (b, a)] {
                if directions[from][to].is_some() {
                    continue;
                }
                let delta = Vec2::new(
                    positions[to].x - positions[from].x,
                    positions[to].y - positions[from].y,
                );
                directions[from][to] = Some(delta.scale(1.0 / delta.length()));
                neighbors[from].push(to);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Self {
            positions,
            neighbors,
            directions,
            symmetry,
        }
    }

    /// Centre of a fortress.
    #[must_use]
    #[inline]
    pub fn position(&self, id: FortressId) -> Vec2 {
        self.positions[id]
    }

    /// All fortress positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec2; FORTRESS_COUNT] {
        &self.positions
    }

    /// Fortresses directly reachable from `id`, ascending.
    #[must_use]
    #[inline]
    pub fn neighbors(&self, id: FortressId) -> &[FortressId] {
        &self.neighbors[id]
    }

    /// Unit direction from `from` towards `to`, or `None` if there is no road.
    #[must_use]
    #[inline]
    pub fn direction(&self, from: FortressId, to: FortressId) -> Option<Vec2> {
        self.directions.get(from)?.get(to).copied().flatten()
    }

    /// Whether a road leads from `from` to `to`.
    #[must_use]
    pub fn is_reachable(&self, from: FortressId, to: FortressId) -> bool {
        self.direction(from, to).is_some()
    }

    /// Point-symmetric counterpart of `id` (`σ`).
    #[must_use]
    #[inline]
    pub fn mirror(&self, id: FortressId) -> FortressId {
        self.symmetry[id]
    }

    /// The whole symmetry table.
    #[must_use]
    pub fn symmetry(&self) -> &[FortressId; FORTRESS_COUNT] {
        &self.symmetry
    }

    /// Every road as `(low, high)` pairs.
    #[must_use]
    pub fn edges(&self) -> Vec<(FortressId, FortressId)> {
        (0..FORTRESS_COUNT)
            .flat_map(|a| self.neighbors[a].iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
            .collect()
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_neighbors() {
        let topology = Topology::standard();
        assert_eq!(topology.neighbors(0), &[1, 3, 4]);
        assert_eq!(topology.neighbors(4), &[0, 1, 2, 3, 5, 6, 7, 8]);
        assert_eq!(topology.neighbors(7), &[3, 4, 5, 6, 8, 9, 10, 11]);
        assert_eq!(topology.neighbors(10), &[7, 9, 11]);
        assert_eq!(topology.edges().len(), 25);
    }

    #[test]
    fn test_standard_passes_validation() {
        let standard = Topology::standard();
        let rebuilt = Topology::new(*standard.positions(), &standard.edges(), *standard.symmetry());
        assert_eq!(rebuilt.unwrap(), standard);
    }

    #[test]
    fn test_symmetry_is_automorphism() {
        let topology = Topology::standard();
        for a in 0..FORTRESS_COUNT {
            assert_eq!(topology.mirror(topology.mirror(a)), a);
            for &b in topology.neighbors(a) {
                assert!(topology.is_reachable(topology.mirror(a), topology.mirror(b)));
            }
        }
        assert_eq!(topology.mirror(0), 11);
        assert_eq!(topology.mirror(4), 7);
    }

    #[test]
    fn test_directions_are_unit_vectors() {
        let topology = Topology::standard();
        for (a, b) in topology.edges() {
            let forward = topology.direction(a, b).unwrap();
            let back = topology.direction(b, a).unwrap();
            assert!((forward.length() - 1.0).abs() < 1e-12);
            assert!((forward.x + back.x).abs() < 1e-12);
            assert!((forward.y + back.y).abs() < 1e-12);
        }
        assert!(topology.direction(0, 11).is_none());
        assert!(topology.direction(0, 0).is_none());
        assert!(topology.direction(0, 99).is_none());
    }

    #[test]
    fn test_rejects_broken_symmetry() {
        let standard = Topology::standard();
        let mut symmetry = *standard.symmetry();
        symmetry.swap(0, 1);
        let err = Topology::new(*standard.positions(), &standard.edges(), symmetry).unwrap_err();
        assert!(err.to_string().contains("involution"));
    }

    #[test]
    fn test_rejects_asymmetric_road() {
        let standard = Topology::standard();
        let mut edges = standard.edges();
        edges.push((0, 2));
        let err = Topology::new(*standard.positions(), &edges, *standard.symmetry()).unwrap_err();
        assert!(err.to_string().contains("symmetric counterpart"));
    }

    #[test]
    fn test_rejects_self_loop() {
        let standard = Topology::standard();
        let err = Topology::new(*standard.positions(), &[(3, 3)], *standard.symmetry()).unwrap_err();
        assert!(err.to_string().contains("self-loop"));
    }
}
