//! Mutable match state and the individual tick phases.
//!
//! The phases are exposed separately so the engine can run them in the
//! fixed order of a tick and tests can drive them one at a time.

// Pawn counts are non-negative and far below u32::MAX
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::game::{
    ArrivalOutcome, Command, FORTRESS_COUNT, Fortress, FortressId, Kind, Level, MovingPawn, Owner,
    Rng, Rules, SpawningBatch, Team, Topology, Vec2, fires, resolve_arrival,
};

/// Final or provisional match outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// One side won.
    Winner(Team),
    /// Neither side won.
    Draw,
}

/// Why a command was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// A fortress index was outside the board.
    OutOfRange,
    /// The issuing side does not hold the subject.
    NotOwner,
    /// The subject lacks the pawns the order costs.
    TooFewPawns,
    /// No road from subject to target.
    Unreachable,
    /// An upgrade is already running.
    AlreadyUpgrading,
    /// The subject is at the top level.
    MaxLevel,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::OutOfRange => "fortress index out of range",
            Self::NotOwner => "subject not owned by issuer",
            Self::TooFewPawns => "not enough pawns",
            Self::Unreachable => "target not reachable from subject",
            Self::AlreadyUpgrading => "upgrade already in progress",
            Self::MaxLevel => "fortress already at maximum level",
        };
        f.write_str(reason)
    }
}

/// One pawn that reached its destination this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    /// Side of the arriving pawn.
    pub team: Team,
    /// Destination fortress.
    pub fortress: FortressId,
    /// Effect on the destination.
    pub outcome: ArrivalOutcome,
}

/// Complete mutable state of a match.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Every fortress, indexed by board position.
    pub fortresses: [Fortress; FORTRESS_COUNT],
    /// Pawns travelling along roads, in departure order.
    pub moving: Vec<MovingPawn>,
    /// Deploy batches still releasing pawns, in order issued.
    pub spawning: Vec<SpawningBatch>,
    /// Ticks completed so far.
    pub tick: u32,
}

impl GameState {
    /// Create a state at tick 0 with nothing in transit.
    #[must_use]
    pub fn new(fortresses: [Fortress; FORTRESS_COUNT]) -> Self {
        Self {
            fortresses,
            moving: Vec::new(),
            spawning: Vec::new(),
            tick: 0,
        }
    }

    /// Opening position of the reference board.
    ///
    /// Team A starts on fortress 10 and team B on its mirror, fortress 1.
    /// Fortresses 4 and 7 are the heavy central strongholds.
    #[must_use]
    pub fn standard() -> Self {
        const LEVELS: [u8; FORTRESS_COUNT] = [1, 2, 1, 2, 3, 2, 2, 3, 2, 1, 2, 1];

        let fortresses = std::array::from_fn(|id| {
            let level = Level::new(LEVELS[id]).unwrap_or(Level::MIN);
            let kind = if id == 4 || id == 7 { Kind::Kind1 } else { Kind::Kind0 };
            let owner = match id {
                10 => Owner::Team(Team::A),
                1 => Owner::Team(Team::B),
                _ => Owner::Neutral,
            };
            Fortress::new(owner, kind, level, f64::from(level.get()) * 10.0)
        });
        Self::new(fortresses)
    }

    /// Fortresses held by each team, indexed by [`Team::index`].
    #[must_use]
    pub fn fortress_counts(&self) -> [usize; 2] {
        let mut counts = [0; 2];
        for fortress in &self.fortresses {
            if let Some(team) = fortress.owner.team() {
                counts[team.index()] += 1;
            }
        }
        counts
    }

    /// Decide the match if a side has been wiped out.
    ///
    /// Returns `None` while both sides hold at least one fortress. Otherwise
    /// the side holding more fortresses wins, equal counts draw.
    #[must_use]
    pub fn elimination_outcome(&self) -> Option<Outcome> {
        let [a, b] = self.fortress_counts();
        if a != 0 && b != 0 {
            return None;
        }
        Some(match a.cmp(&b) {
            std::cmp::Ordering::Greater => Outcome::Winner(Team::A),
            std::cmp::Ordering::Less => Outcome::Winner(Team::B),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }

    /// Advance every moving pawn, then resolve all arrivals in order.
    ///
    /// Arrival is detected only after every pawn has moved, so pawns landing
    /// on the same tick are all resolved.
    pub fn move_pawns(&mut self, topology: &Topology, rules: &Rules) -> Vec<Arrival> {
        let radius_sq = rules.arrival_radius * rules.arrival_radius;

        let mut arrived = Vec::new();
        for (idx, pawn) in self.moving.iter_mut().enumerate() {
            if let Some(direction) = topology.direction(pawn.from, pawn.to) {
                pawn.position = pawn.position.add(direction.scale(rules.speed(pawn.kind)));
            }
            if pawn.position.distance_sq(topology.position(pawn.to)) <= radius_sq {
                arrived.push(idx);
            }
        }

        let mut arrivals = Vec::with_capacity(arrived.len());
        for &idx in &arrived {
            let pawn = self.moving[idx];
            let outcome = resolve_arrival(&mut self.fortresses[pawn.to], &pawn, rules);
            arrivals.push(Arrival {
                team: pawn.team,
                fortress: pawn.to,
                outcome,
            });
        }

        if !arrived.is_empty() {
            let mut idx = 0;
            let mut next_arrived = arrived.iter().peekable();
            self.moving.retain(|_| {
                let keep = next_arrived.next_if_eq(&&idx).is_none();
                idx += 1;
                keep
            });
        }

        arrivals
    }

    /// Apply one command for `team`, expressed in board indices.
    ///
    /// # Errors
    ///
    /// Returns the reason the command was ignored. Rejected commands leave
    /// the state untouched.
    pub fn apply_command(
        &mut self,
        team: Team,
        command: Command,
        topology: &Topology,
        rules: &Rules,
    ) -> Result<(), Rejection> {
        match command {
            Command::Wait => Ok(()),
            Command::Deploy { subject, target } => {
                self.try_deploy(team, subject, target, topology, rules)
            }
            Command::Upgrade { subject } => self.try_upgrade(team, subject, rules),
        }
    }

    /// Mobilize half the garrison of `subject` towards `target`.
    ///
    /// # Errors
    ///
    /// Rejected unless `team` holds `subject`, it has at least two pawns and
    /// a road leads to `target`.
    pub fn try_deploy(
        &mut self,
        team: Team,
        subject: FortressId,
        target: FortressId,
        topology: &Topology,
        rules: &Rules,
    ) -> Result<(), Rejection> {
        if subject >= FORTRESS_COUNT || target >= FORTRESS_COUNT {
            return Err(Rejection::OutOfRange);
        }
        let fortress = &mut self.fortresses[subject];
        if !fortress.owner.is(team) {
            return Err(Rejection::NotOwner);
        }
        if fortress.pawns < 2.0 {
            return Err(Rejection::TooFewPawns);
        }
        let Some(direction) = topology.direction(subject, target) else {
            return Err(Rejection::Unreachable);
        };

        let sent = (fortress.pawns / 2.0).floor();
        fortress.pawns -= sent;
        self.spawning.push(SpawningBatch {
            team,
            kind: fortress.kind,
            remaining: sent as u32,
            from: subject,
            to: target,
            spawn_position: topology
                .position(subject)
                .add(direction.scale(rules.spawn_offset)),
        });
        Ok(())
    }

    /// Start an upgrade of `subject`, paying half its capacity.
    ///
    /// # Errors
    ///
    /// Rejected unless `team` holds `subject`, it is below the top level, no
    /// upgrade is running and it can pay the cost.
    pub fn try_upgrade(
        &mut self,
        team: Team,
        subject: FortressId,
        rules: &Rules,
    ) -> Result<(), Rejection> {
        let fortress = self
            .fortresses
            .get_mut(subject)
            .ok_or(Rejection::OutOfRange)?;
        if !fortress.owner.is(team) {
            return Err(Rejection::NotOwner);
        }
        if !fortress.level.is_upgradable() {
            return Err(Rejection::MaxLevel);
        }
        if fortress.is_upgrading() {
            return Err(Rejection::AlreadyUpgrading);
        }
        let cost = f64::from(rules.upgrade_cost(fortress.level));
        if fortress.pawns < cost {
            return Err(Rejection::TooFewPawns);
        }

        fortress.upgrade_timer = Some(rules.upgrade_duration);
        fortress.pawns -= cost;
        Ok(())
    }

    /// Release one pawn from every batch due this tick and drop empty batches.
    ///
    /// Each released pawn is shifted sideways from the spawn point by a
    /// random fraction of the jitter scale. Returns the number released.
    pub fn release_departures(&mut self, topology: &Topology, rules: &Rules, rng: &mut Rng) -> u32 {
        let mut released = 0;
        for batch in &mut self.spawning {
            if batch.is_exhausted() || !fires(self.tick, rules.departure_period(batch.kind)) {
                continue;
            }
            let lateral = (rng.next_f64() - 0.5) * rules.jitter;
            let normal = topology
                .direction(batch.from, batch.to)
                .map_or(Vec2::default(), Vec2::normal);
            let position = batch.spawn_position.add(normal.scale(lateral));
            if let Some(pawn) = batch.release(position) {
                self.moving.push(pawn);
                released += 1;
            }
        }
        self.spawning.retain(|batch| !batch.is_exhausted());
        released
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GameState, Topology, Rules) {
        (GameState::standard(), Topology::standard(), Rules::default())
    }

    #[test]
    fn test_standard_opening_is_symmetric() {
        let (state, topology, _) = setup();
        assert_eq!(state.fortress_counts(), [1, 1]);
        for id in 0..FORTRESS_COUNT {
            let here = state.fortresses[id];
            let there = state.fortresses[topology.mirror(id)];
            assert_eq!(here.owner, there.owner.swapped());
            assert_eq!(here.kind, there.kind);
            assert_eq!(here.level, there.level);
        }
        assert_eq!(state.fortresses[10].owner, Owner::Team(Team::A));
        assert_eq!(state.fortresses[4].kind, Kind::Kind1);
    }

    #[test]
    fn test_deploy_sends_half_rounded_down() {
        let (mut state, topology, rules) = setup();
        state.fortresses[10].pawns = 15.7;

        assert_eq!(state.try_deploy(Team::A, 10, 7, &topology, &rules), Ok(()));

        assert!((state.fortresses[10].pawns - 8.7).abs() < 1e-9);
        assert_eq!(state.spawning.len(), 1);
        let batch = state.spawning[0];
        assert_eq!(batch.remaining, 7);
        assert_eq!((batch.from, batch.to), (10, 7));
        let offset = batch.spawn_position.distance_sq(topology.position(10)).sqrt();
        assert!((offset - rules.spawn_offset).abs() < 1e-9);
    }

    #[test]
    fn test_deploy_rejections() {
        let (mut state, topology, rules) = setup();
        assert_eq!(
            state.try_deploy(Team::B, 10, 7, &topology, &rules),
            Err(Rejection::NotOwner)
        );
        assert_eq!(
            state.try_deploy(Team::A, 10, 1, &topology, &rules),
            Err(Rejection::Unreachable)
        );
        assert_eq!(
            state.try_deploy(Team::A, 10, 10, &topology, &rules),
            Err(Rejection::Unreachable)
        );
        assert_eq!(
            state.try_deploy(Team::A, 10, 12, &topology, &rules),
            Err(Rejection::OutOfRange)
        );
        state.fortresses[10].pawns = 1.9;
        assert_eq!(
            state.try_deploy(Team::A, 10, 7, &topology, &rules),
            Err(Rejection::TooFewPawns)
        );
        assert!(state.spawning.is_empty());
        assert!((state.fortresses[10].pawns - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_upgrade_spends_half_capacity() {
        let (mut state, _, rules) = setup();
        // Level 2: capacity 20, cost 10
        assert_eq!(state.try_upgrade(Team::A, 10, &rules), Ok(()));
        assert_eq!(state.fortresses[10].upgrade_timer, Some(rules.upgrade_duration));
        assert!((state.fortresses[10].pawns - 10.0).abs() < 1e-12);

        assert_eq!(
            state.try_upgrade(Team::A, 10, &rules),
            Err(Rejection::AlreadyUpgrading)
        );
    }

    #[test]
    fn test_upgrade_rejected_at_max_level() {
        let (mut state, _, rules) = setup();
        state.fortresses[10].level = Level::MAX;
        state.fortresses[10].pawns = 1000.0;

        assert_eq!(state.try_upgrade(Team::A, 10, &rules), Err(Rejection::MaxLevel));
        assert_eq!(state.fortresses[10].upgrade_timer, None);
    }

    #[test]
    fn test_upgrade_needs_pawns_and_ownership() {
        let (mut state, _, rules) = setup();
        state.fortresses[10].pawns = 9.99;
        assert_eq!(state.try_upgrade(Team::A, 10, &rules), Err(Rejection::TooFewPawns));
        assert_eq!(state.try_upgrade(Team::A, 1, &rules), Err(Rejection::NotOwner));
        assert_eq!(state.try_upgrade(Team::A, 40, &rules), Err(Rejection::OutOfRange));
    }

    #[test]
    fn test_release_follows_period() {
        let (mut state, topology, rules) = setup();
        let mut rng = Rng::new(1);
        state.try_deploy(Team::A, 10, 7, &topology, &rules).unwrap();

        state.tick = 3;
        assert_eq!(state.release_departures(&topology, &rules, &mut rng), 0);
        state.tick = 7;
        assert_eq!(state.release_departures(&topology, &rules, &mut rng), 1);
        assert_eq!(state.moving.len(), 1);
        assert_eq!(state.spawning[0].remaining, 9);

        let pawn = state.moving[0];
        let lateral = pawn.position.distance_sq(state.spawning[0].spawn_position).sqrt();
        assert!(lateral <= rules.jitter / 2.0 + 1e-9);
    }

    #[test]
    fn test_release_drops_exhausted_batches() {
        let (mut state, topology, rules) = setup();
        let mut rng = Rng::new(1);
        state.fortresses[10].pawns = 3.0;
        state.try_deploy(Team::A, 10, 9, &topology, &rules).unwrap();
        assert_eq!(state.spawning[0].remaining, 1);

        state.tick = 0;
        state.release_departures(&topology, &rules, &mut rng);

        assert!(state.spawning.is_empty());
        assert_eq!(state.moving.len(), 1);
    }

    #[test]
    fn test_simultaneous_arrivals_all_resolve() {
        let (mut state, topology, rules) = setup();
        let target = topology.position(9);
        for team in [Team::A, Team::A, Team::B] {
            state.moving.push(MovingPawn {
                team,
                kind: Kind::Kind0,
                from: 10,
                to: 9,
                position: target,
            });
        }
        state.moving.push(MovingPawn {
            team: Team::A,
            kind: Kind::Kind0,
            from: 10,
            to: 7,
            position: topology.position(10),
        });

        let arrivals = state.move_pawns(&topology, &rules);

        assert_eq!(arrivals.len(), 3);
        assert_eq!(state.moving.len(), 1);
        assert_eq!(state.moving[0].to, 7);
        // Neutral level 1 with 10 pawns takes three hits of 0.65
        assert!((state.fortresses[9].pawns - (10.0 - 3.0 * 0.65)).abs() < 1e-9);
    }

    #[test]
    fn test_elimination_outcome() {
        let (mut state, _, _) = setup();
        assert_eq!(state.elimination_outcome(), None);

        state.fortresses[1].owner = Owner::Team(Team::A);
        assert_eq!(state.elimination_outcome(), Some(Outcome::Winner(Team::A)));

        state.fortresses[1].owner = Owner::Neutral;
        state.fortresses[10].owner = Owner::Neutral;
        assert_eq!(state.elimination_outcome(), Some(Outcome::Draw));
    }
}
