//! Perspective view transform.
//!
//! Controllers are written as if they were team A defending the bottom of
//! the board. Team A gets the board as-is; team B gets a flipped copy where
//! fortress `i` shows the content of its mirror `σ(i)` with team labels
//! swapped, so it also sees itself as team A at the bottom.
//!
//! Neighbor lists are attached by position: fortress `i` in a flipped view
//! keeps the roads of board fortress `i`, not those of `σ(i)`. Because `σ`
//! maps roads onto roads this is the correct neighbor set in view indices.

use crate::game::{
    Command, FORTRESS_COUNT, FortressId, GameState, Kind, Level, MovingPawn, Owner, Rules,
    SpawningBatch, Team, Topology,
};

/// One fortress as seen by a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct FortressView {
    /// Holder, relative to the viewing side.
    pub owner: Owner,
    /// Fortress category.
    pub kind: Kind,
    /// Current level.
    pub level: Level,
    /// Standing pawns.
    pub pawns: f64,
    /// Remaining upgrade ticks, if upgrading.
    pub upgrade_timer: Option<u32>,
    /// Capacity at the current level.
    pub capacity: u32,
    /// Fortresses reachable from this position, in view indices.
    pub neighbors: Vec<FortressId>,
}

/// Read-only snapshot handed to a controller once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Label of the viewing side. Always [`Team::A`] in a view given to a
    /// controller.
    pub team: Team,
    /// Ticks completed so far.
    pub tick: u32,
    /// Every fortress, in view indices.
    pub fortresses: [FortressView; FORTRESS_COUNT],
    /// Pawns in transit.
    pub moving: Vec<MovingPawn>,
    /// Batches waiting to depart.
    pub spawning: Vec<SpawningBatch>,
    /// Whether this is the final tick the controller will see.
    pub terminal: bool,
}

impl View {
    /// Snapshot the board unchanged, labelled as seen by `team`.
    #[must_use]
    pub fn absolute(
        state: &GameState,
        topology: &Topology,
        rules: &Rules,
        team: Team,
        terminal: bool,
    ) -> Self {
        let fortresses = std::array::from_fn(|id| {
            let fortress = &state.fortresses[id];
            FortressView {
                owner: fortress.owner,
                kind: fortress.kind,
                level: fortress.level,
                pawns: fortress.pawns,
                upgrade_timer: fortress.upgrade_timer,
                capacity: rules.capacity(fortress.level),
                neighbors: topology.neighbors(id).to_vec(),
            }
        });
        Self {
            team,
            tick: state.tick,
            fortresses,
            moving: state.moving.clone(),
            spawning: state.spawning.clone(),
            terminal,
        }
    }

    /// Snapshot the board from `team`'s perspective.
    ///
    /// Team A receives the identity view, team B the flipped one.
    #[must_use]
    pub fn for_team(
        state: &GameState,
        topology: &Topology,
        rules: &Rules,
        team: Team,
        terminal: bool,
    ) -> Self {
        let view = Self::absolute(state, topology, rules, team, terminal);
        match team {
            Team::A => view,
            Team::B => view.flipped(topology),
        }
    }

    /// Mirror the board through `σ` and swap team labels.
    ///
    /// Applying this twice returns the original view.
    #[must_use]
    pub fn flipped(&self, topology: &Topology) -> Self {
        let fortresses = std::array::from_fn(|id| {
            let source = &self.fortresses[topology.mirror(id)];
            FortressView {
                owner: source.owner.swapped(),
                neighbors: self.fortresses[id].neighbors.clone(),
                ..source.clone()
            }
        });
        let moving = self
            .moving
            .iter()
            .map(|pawn| MovingPawn {
                team: pawn.team.opponent(),
                from: topology.mirror(pawn.from),
                to: topology.mirror(pawn.to),
                ..*pawn
            })
            .collect();
        let spawning = self
            .spawning
            .iter()
            .map(|batch| SpawningBatch {
                team: batch.team.opponent(),
                from: topology.mirror(batch.from),
                to: topology.mirror(batch.to),
                ..*batch
            })
            .collect();

        Self {
            team: self.team.opponent(),
            tick: self.tick,
            fortresses,
            moving,
            spawning,
            terminal: self.terminal,
        }
    }

    /// Whether the viewing side holds fortress `id`.
    #[must_use]
    pub fn is_mine(&self, id: FortressId) -> bool {
        self.fortresses
            .get(id)
            .is_some_and(|f| f.owner.is(self.team))
    }

    /// Whether the opposing side holds fortress `id`.
    #[must_use]
    pub fn is_enemy(&self, id: FortressId) -> bool {
        self.fortresses
            .get(id)
            .is_some_and(|f| f.owner.is(self.team.opponent()))
    }

    /// Fortresses held by the viewing side.
    pub fn mine(&self) -> impl Iterator<Item = FortressId> + '_ {
        (0..FORTRESS_COUNT).filter(|&id| self.is_mine(id))
    }
}

/// Translate a command from `team`'s view into board indices.
///
/// Team A's indices pass through; team B's go back through `σ`. Indices off
/// the board turn the command into [`Command::Wait`].
#[must_use]
pub fn to_board(command: Command, team: Team, topology: &Topology) -> Command {
    command.remap(|id| {
        (id < FORTRESS_COUNT).then(|| match team {
            Team::A => id,
            Team::B => topology.mirror(id),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Vec2;

    fn busy_state() -> GameState {
        let mut state = GameState::standard();
        state.fortresses[3].owner = Owner::Team(Team::B);
        state.fortresses[3].pawns = 4.35;
        state.fortresses[3].upgrade_timer = Some(33);
        state.tick = 77;
        state.moving.push(MovingPawn {
            team: Team::A,
            kind: Kind::Kind0,
            from: 10,
            to: 7,
            position: Vec2::new(500.0, 650.0),
        });
        state.spawning.push(SpawningBatch {
            team: Team::B,
            kind: Kind::Kind1,
            remaining: 4,
            from: 4,
            to: 0,
            spawn_position: Vec2::new(480.0, 220.0),
        });
        state
    }

    #[test]
    fn test_team_a_gets_identity() {
        let (state, topology, rules) = (busy_state(), Topology::standard(), Rules::default());
        let view = View::for_team(&state, &topology, &rules, Team::A, false);

        assert_eq!(view.team, Team::A);
        assert_eq!(view.fortresses[10].owner, Owner::Team(Team::A));
        assert_eq!(view.fortresses[3].upgrade_timer, Some(33));
        assert_eq!(view.moving, state.moving);
        assert_eq!(view.tick, 77);
    }

    #[test]
    fn test_team_b_sees_itself_as_a_at_home() {
        let (state, topology, rules) = (busy_state(), Topology::standard(), Rules::default());
        let view = View::for_team(&state, &topology, &rules, Team::B, true);

        assert_eq!(view.team, Team::A);
        assert!(view.terminal);
        // B's home fortress 1 appears at 10, A's home at 1
        assert_eq!(view.fortresses[10].owner, Owner::Team(Team::A));
        assert_eq!(view.fortresses[1].owner, Owner::Team(Team::B));
        // Fortress 3 content appears at its mirror 8
        assert_eq!(view.fortresses[8].owner, Owner::Team(Team::A));
        assert!((view.fortresses[8].pawns - 4.35).abs() < 1e-12);
        assert_eq!(view.fortresses[8].upgrade_timer, Some(33));

        let pawn = view.moving[0];
        assert_eq!(pawn.team, Team::B);
        assert_eq!((pawn.from, pawn.to), (1, 4));
        assert_eq!(pawn.position, state.moving[0].position);

        let batch = view.spawning[0];
        assert_eq!(batch.team, Team::A);
        assert_eq!((batch.from, batch.to), (7, 11));
        assert_eq!(batch.remaining, 4);
    }

    #[test]
    fn test_flipped_neighbors_follow_position_not_content() {
        let (state, topology, rules) = (busy_state(), Topology::standard(), Rules::default());
        let view = View::for_team(&state, &topology, &rules, Team::B, false);

        // Fortress 0 shows the content of 11 but keeps the roads of 0
        assert_eq!(view.fortresses[0].neighbors, vec![1, 3, 4]);
        assert_eq!(view.fortresses[3].neighbors, vec![0, 4, 6, 7]);
        assert_eq!(view.fortresses[10].neighbors, vec![7, 9, 11]);
    }

    #[test]
    fn test_flip_is_involution() {
        let (state, topology, rules) = (busy_state(), Topology::standard(), Rules::default());
        let view = View::absolute(&state, &topology, &rules, Team::B, false);

        assert_eq!(view.flipped(&topology).flipped(&topology), view);
    }

    #[test]
    fn test_to_board_mirrors_team_b_only() {
        let topology = Topology::standard();
        let deploy = Command::Deploy { subject: 10, target: 7 };

        assert_eq!(to_board(deploy, Team::A, &topology), deploy);
        assert_eq!(
            to_board(deploy, Team::B, &topology),
            Command::Deploy { subject: 1, target: 4 }
        );
        assert_eq!(
            to_board(Command::Upgrade { subject: 12 }, Team::B, &topology),
            Command::Wait
        );
    }

    #[test]
    fn test_view_ownership_helpers() {
        let (state, topology, rules) = (busy_state(), Topology::standard(), Rules::default());
        let view = View::for_team(&state, &topology, &rules, Team::B, false);

        assert_eq!(view.mine().collect::<Vec<_>>(), vec![8, 10]);
        assert!(view.is_enemy(1));
        assert!(!view.is_mine(99));
    }
}
