//! Match engine.
//!
//! Owns the game state and both controllers and advances the match one tick
//! at a time. Each tick runs these phases in order:
//!
//! 1. Move pawns and resolve every arrival
//! 2. Check for an eliminated side (feeds the views' terminal flag)
//! 3. Build both views and ask each controller for a command
//! 4. Apply team A's command, then team B's
//! 5. Release departing pawns
//! 6. Production, decay and upgrade countdown
//! 7. Advance the tick counter and check for termination
//!
//! Terminal matches are sticky: further ticks do nothing.

use crate::controller::Controller;
use crate::game::{
    ArrivalOutcome, Command, FortressId, GameState, MovingPawn, Outcome, Rng, Rules,
    SpawningBatch, Team, Topology, View, advance_upgrades, assert_invariants, decay, produce,
    to_board,
};
use tracing::{debug, trace};

/// Default tick ceiling.
pub const DEFAULT_MAX_TICKS: u32 = 4000;

/// Per-match engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Ticks after which the match ends in a draw.
    pub max_ticks: u32,
    /// Seed of the departure jitter generator.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            seed: 0,
        }
    }
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// A side held no fortresses.
    Elimination,
    /// The tick ceiling was reached with both sides standing.
    TickCeiling,
}

/// Command and combat counters for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideStats {
    /// Deploy orders carried out.
    pub deploys: u32,
    /// Upgrade orders carried out.
    pub upgrades: u32,
    /// Orders the engine ignored.
    pub rejected: u32,
    /// Fortresses taken by this side's pawns.
    pub captures: u32,
}

/// Final result of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Winner, or draw.
    pub outcome: Outcome,
    /// Fortresses held at the end, indexed by [`Team::index`].
    pub fortresses: [usize; 2],
    /// Ticks played.
    pub ticks: u32,
    /// How the match ended.
    pub termination: Termination,
    /// Per-side counters, indexed by [`Team::index`].
    pub stats: [SideStats; 2],
    /// Controller names, indexed by [`Team::index`].
    pub names: [String; 2],
}

impl MatchResult {
    /// Name of the winning controller, if any.
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        match self.outcome {
            Outcome::Winner(team) => Some(&self.names[team.index()]),
            Outcome::Draw => None,
        }
    }
}

/// A running match between two controllers.
pub struct Engine {
    topology: Topology,
    rules: Rules,
    config: EngineConfig,
    state: GameState,
    controllers: [Box<dyn Controller>; 2],
    rng: Rng,
    stats: [SideStats; 2],
    result: Option<MatchResult>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("tick", &self.state.tick)
            .field("blue", &self.controllers[0].name())
            .field("red", &self.controllers[1].name())
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Set up a match on `topology` starting from `state`.
    ///
    /// `blue` plays team A, `red` plays team B.
    #[must_use]
    pub fn new(
        topology: Topology,
        rules: Rules,
        state: GameState,
        blue: Box<dyn Controller>,
        red: Box<dyn Controller>,
        config: EngineConfig,
    ) -> Self {
        debug!(
            blue = blue.name(),
            red = red.name(),
            seed = config.seed,
            max_ticks = config.max_ticks,
            "match start"
        );
        Self {
            topology,
            rules,
            config,
            state,
            controllers: [blue, red],
            rng: Rng::new(config.seed),
            stats: [SideStats::default(); 2],
            result: None,
        }
    }

    /// Set up a match on the reference board with the reference rules.
    #[must_use]
    pub fn standard(
        blue: Box<dyn Controller>,
        red: Box<dyn Controller>,
        config: EngineConfig,
    ) -> Self {
        Self::new(
            Topology::standard(),
            Rules::default(),
            GameState::standard(),
            blue,
            red,
            config,
        )
    }

    /// Advance the match by one tick.
    ///
    /// Returns `true` while the match is still running afterwards. A
    /// finished match is left untouched.
    pub fn tick(&mut self) -> bool {
        if self.result.is_some() || self.conclude() {
            return false;
        }

        let arrivals = self.state.move_pawns(&self.topology, &self.rules);
        for arrival in arrivals {
            if arrival.outcome == ArrivalOutcome::Captured {
                self.stats[arrival.team.index()].captures += 1;
                debug!(
                    tick = self.state.tick,
                    fortress = arrival.fortress,
                    owner = %arrival.team,
                    "fortress captured"
                );
            }
        }

        let terminal = self.state.elimination_outcome().is_some()
            || self.state.tick.saturating_add(1) >= self.config.max_ticks;

        let mut commands = [Command::Wait; 2];
        for team in [Team::A, Team::B] {
            let view = View::for_team(&self.state, &self.topology, &self.rules, team, terminal);
            let command = self.controllers[team.index()].decide(&view);
            commands[team.index()] = to_board(command, team, &self.topology);
        }
        for team in [Team::A, Team::B] {
            self.apply(team, commands[team.index()]);
        }

        self.state
            .release_departures(&self.topology, &self.rules, &mut self.rng);
        produce(&mut self.state.fortresses, self.state.tick, &self.rules);
        decay(&mut self.state.fortresses, self.state.tick, &self.rules);
        for fortress in advance_upgrades(&mut self.state.fortresses) {
            debug!(
                tick = self.state.tick,
                fortress,
                level = self.state.fortresses[fortress].level.get(),
                "upgrade complete"
            );
        }

        self.state.tick += 1;
        assert_invariants(&self.state, &self.topology, &self.rules);

        !self.conclude()
    }

    /// Run up to `ticks` ticks, stopping early if the match ends.
    ///
    /// Returns `true` while the match is still running afterwards.
    pub fn advance(&mut self, ticks: u32) -> bool {
        for _ in 0..ticks {
            if !self.tick() {
                return false;
            }
        }
        self.result.is_none()
    }

    /// Play the match to the end and return its result.
    pub fn run(&mut self) -> MatchResult {
        loop {
            if let Some(result) = &self.result {
                return result.clone();
            }
            self.tick();
        }
    }

    fn apply(&mut self, team: Team, command: Command) {
        let stats = &mut self.stats[team.index()];
        match self
            .state
            .apply_command(team, command, &self.topology, &self.rules)
        {
            Ok(()) => match command {
                Command::Deploy { .. } => stats.deploys += 1,
                Command::Upgrade { .. } => stats.upgrades += 1,
                Command::Wait => {}
            },
            Err(reason) => {
                stats.rejected += 1;
                trace!(
                    tick = self.state.tick,
                    team = %team,
                    command = command.label(),
                    %reason,
                    "command rejected"
                );
            }
        }
    }

    /// Record the result if the match is over. Returns whether it is.
    fn conclude(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }
        let (outcome, termination) = match self.state.elimination_outcome() {
            Some(outcome) => (outcome, Termination::Elimination),
            None if self.state.tick >= self.config.max_ticks => {
                (Outcome::Draw, Termination::TickCeiling)
            }
            None => return false,
        };

        let fortresses = self.state.fortress_counts();
        debug!(
            ?outcome,
            ?termination,
            blue = fortresses[0],
            red = fortresses[1],
            ticks = self.state.tick,
            "match end"
        );
        self.result = Some(MatchResult {
            outcome,
            fortresses,
            ticks: self.state.tick,
            termination,
            stats: self.stats,
            names: [
                self.controllers[0].name().to_owned(),
                self.controllers[1].name().to_owned(),
            ],
        });
        true
    }

    /// Current match state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Board geometry.
    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Rule tables in force.
    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Engine settings.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ticks completed so far.
    #[must_use]
    pub fn tick_count(&self) -> u32 {
        self.state.tick
    }

    /// Every fortress, by board index.
    #[must_use]
    pub fn fortresses(&self) -> &[crate::game::Fortress] {
        &self.state.fortresses
    }

    /// Fortress `id`, if on the board.
    #[must_use]
    pub fn fortress(&self, id: FortressId) -> Option<&crate::game::Fortress> {
        self.state.fortresses.get(id)
    }

    /// Pawns in transit.
    #[must_use]
    pub fn moving(&self) -> &[MovingPawn] {
        &self.state.moving
    }

    /// Batches waiting to depart.
    #[must_use]
    pub fn spawning(&self) -> &[SpawningBatch] {
        &self.state.spawning
    }

    /// Per-side counters so far.
    #[must_use]
    pub fn stats(&self) -> &[SideStats; 2] {
        &self.stats
    }

    /// The result, once the match has ended.
    #[must_use]
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Whether the match has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }
}

/// Play one match on the reference board.
pub fn run_match(
    blue: Box<dyn Controller>,
    red: Box<dyn Controller>,
    config: EngineConfig,
) -> MatchResult {
    Engine::standard(blue, red, config).run()
}
