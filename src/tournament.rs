//! Round-robin tournament between registered controllers.
//!
//! Every pair of entrants meets `rounds` times from each side of the board,
//! so neither gets the home advantage more often than the other. A win is
//! worth three points and a draw one.

use crate::controllers;
use crate::engine::{Engine, EngineConfig, MatchResult};
use crate::game::{GameState, Outcome, Rules, Team, Topology};

/// Default number of meetings per pairing and side.
pub const DEFAULT_ROUNDS: u32 = 3;

/// Tournament settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Meetings per pairing from each side.
    pub rounds: u32,
    /// Tick ceiling per match.
    pub max_ticks: u32,
    /// Seed of the first match; each later match adds one.
    pub seed: u64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            max_ticks: crate::engine::DEFAULT_MAX_TICKS,
            seed: 0,
        }
    }
}

/// Error type for tournament setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentError {
    /// Fewer than two entrants.
    NotEnoughEntrants(usize),
    /// An entrant is not in the registry.
    UnknownController(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEnoughEntrants(n) => write!(f, "need at least 2 entrants, got {n}"),
            Self::UnknownController(name) => write!(f, "unknown controller '{name}'"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// One scheduled match. Sides are indices into the entrant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    /// Entrant playing team A.
    pub blue: usize,
    /// Entrant playing team B.
    pub red: usize,
    /// Seed for the match and its controllers.
    pub seed: u64,
}

/// Every match of a round-robin over `entrants` entrants.
///
/// Each unordered pair plays `rounds` times with the lower index as blue,
/// each followed by the return match with sides swapped.
#[must_use]
pub fn schedule(entrants: usize, config: &TournamentConfig) -> Vec<Pairing> {
    let mut pairings = Vec::new();
    let mut seed = config.seed;
    for first in 0..entrants {
        for second in first + 1..entrants {
            for _ in 0..config.rounds {
                for (blue, red) in [(first, second), (second, first)] {
                    pairings.push(Pairing { blue, red, seed });
                    seed = seed.wrapping_add(1);
                }
            }
        }
    }
    pairings
}

/// Check the entrant list against the registry.
///
/// # Errors
///
/// Returns an error if there are fewer than two entrants or one of them is
/// not registered.
pub fn check_entrants(names: &[String]) -> Result<(), TournamentError> {
    if names.len() < 2 {
        return Err(TournamentError::NotEnoughEntrants(names.len()));
    }
    for name in names {
        if !controllers::names().any(|known| known == name) {
            return Err(TournamentError::UnknownController(name.clone()));
        }
    }
    Ok(())
}

/// Play one scheduled match on the given board.
///
/// Returns `None` if an entrant name is not registered.
#[must_use]
pub fn play(
    pairing: &Pairing,
    names: &[String],
    topology: &Topology,
    state: &GameState,
    rules: &Rules,
    max_ticks: u32,
) -> Option<MatchResult> {
    let [blue, red] = controllers::create_pair(
        names.get(pairing.blue)?,
        names.get(pairing.red)?,
        rules,
        pairing.seed,
    )?;
    let config = EngineConfig {
        max_ticks,
        seed: pairing.seed,
    };
    let mut engine = Engine::new(topology.clone(), *rules, state.clone(), blue, red, config);
    Some(engine.run())
}

/// Tally for one entrant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standing {
    /// Controller name.
    pub name: String,
    /// Matches won.
    pub wins: u32,
    /// Matches drawn.
    pub draws: u32,
    /// Matches lost.
    pub losses: u32,
    /// Fortresses held at the end, summed over all matches.
    pub total_fortresses: u32,
}

impl Standing {
    /// Matches played.
    #[must_use]
    pub fn matches(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    /// Three points per win, one per draw.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.wins * 3 + self.draws
    }

    /// Share of matches won (0.0-1.0).
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        self.per_match(self.wins)
    }

    /// Fortresses held at the end of an average match.
    #[must_use]
    pub fn avg_fortresses(&self) -> f64 {
        self.per_match(self.total_fortresses)
    }

    fn per_match(&self, total: u32) -> f64 {
        match self.matches() {
            0 => 0.0,
            n => f64::from(total) / f64::from(n),
        }
    }
}

/// Tallies for every entrant, in entrant order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    entries: Vec<Standing>,
}

impl Standings {
    /// Empty tallies for `names`.
    #[must_use]
    pub fn new(names: &[String]) -> Self {
        Self {
            entries: names
                .iter()
                .map(|name| Standing {
                    name: name.clone(),
                    ..Standing::default()
                })
                .collect(),
        }
    }

    /// Credit both entrants of `pairing` with `result`.
    pub fn record(&mut self, pairing: &Pairing, result: &MatchResult) {
        for (team, entrant) in [(Team::A, pairing.blue), (Team::B, pairing.red)] {
            let Some(entry) = self.entries.get_mut(entrant) else {
                continue;
            };
            entry.total_fortresses += u32::try_from(result.fortresses[team.index()]).unwrap_or(u32::MAX);
            match result.outcome {
                Outcome::Winner(winner) if winner == team => entry.wins += 1,
                Outcome::Winner(_) => entry.losses += 1,
                Outcome::Draw => entry.draws += 1,
            }
        }
    }

    /// Merge tallies gathered on another thread.
    pub fn merge(&mut self, other: &Self) {
        for (entry, theirs) in self.entries.iter_mut().zip(&other.entries) {
            entry.wins += theirs.wins;
            entry.draws += theirs.draws;
            entry.losses += theirs.losses;
            entry.total_fortresses += theirs.total_fortresses;
        }
    }

    /// Tallies in entrant order.
    #[must_use]
    pub fn entries(&self) -> &[Standing] {
        &self.entries
    }

    /// Matches played in total.
    #[must_use]
    pub fn matches_played(&self) -> u32 {
        // Every match is counted once for each side
        self.entries.iter().map(Standing::matches).sum::<u32>() / 2
    }

    /// Tallies ranked by score, then wins, then average fortresses held.
    #[must_use]
    pub fn ranked(&self) -> Vec<Standing> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| {
            b.score()
                .cmp(&a.score())
                .then(b.wins.cmp(&a.wins))
                .then(b.avg_fortresses().total_cmp(&a.avg_fortresses()))
        });
        ranked
    }
}

/// Play a full round-robin sequentially.
///
/// # Errors
///
/// Returns an error if the entrant list is invalid.
pub fn run_tournament(
    names: &[String],
    topology: &Topology,
    state: &GameState,
    rules: &Rules,
    config: &TournamentConfig,
) -> Result<Standings, TournamentError> {
    check_entrants(names)?;
    let mut standings = Standings::new(names);
    for pairing in schedule(names.len(), config) {
        if let Some(result) = play(&pairing, names, topology, state, rules, config.max_ticks) {
            standings.record(&pairing, &result);
        }
    }
    Ok(standings)
}
