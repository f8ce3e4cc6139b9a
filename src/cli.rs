//! CLI command implementations for Fortress Conquest.

pub(crate) mod list;
pub(crate) mod run;
pub(crate) mod series;
pub(crate) mod tournament;

mod output;

use clap::ValueEnum;
use fortress_conquest::controllers;
use fortress_conquest::tournament::TournamentError;
use fortress_conquest::{ConfigError, Controller, GameState, Rules, Topology, config};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format for match and series results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<TournamentError> for CliError {
    fn from(e: TournamentError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Board, opening and rules for a match, loaded once per command.
#[derive(Debug)]
pub(crate) struct Setup {
    pub(crate) topology: Topology,
    pub(crate) state: GameState,
    pub(crate) rules: Rules,
}

impl Setup {
    /// Load the optional map and rules files, falling back to the
    /// reference board and tables.
    pub(crate) fn load(map: Option<PathBuf>, rules: Option<PathBuf>) -> Result<Self, CliError> {
        let (topology, state) = match map {
            Some(path) => config::load_map(path)?,
            None => (Topology::standard(), GameState::standard()),
        };
        let rules = match rules {
            Some(path) => config::load_rules(path)?,
            None => Rules::default(),
        };
        Ok(Self {
            topology,
            state,
            rules,
        })
    }
}

/// Check that both controller names are registered.
pub(crate) fn check_names(blue: &str, red: &str) -> Result<(), CliError> {
    for name in [blue, red] {
        if controllers::create(name, &Rules::default(), 0).is_none() {
            let known: Vec<_> = controllers::names().collect();
            return Err(CliError::new(format!(
                "Unknown controller '{name}' (known: {})",
                known.join(", ")
            )));
        }
    }
    Ok(())
}

/// Build both controllers for one match.
pub(crate) fn build_pair(
    blue: &str,
    red: &str,
    rules: &Rules,
    seed: u64,
) -> Result<[Box<dyn Controller>; 2], CliError> {
    controllers::create_pair(blue, red, rules, seed)
        .ok_or_else(|| CliError::new(format!("Unknown controller '{blue}' or '{red}'")))
}

/// Use the given seed or derive one from the clock.
// Only the low bits of the clock matter for a seed
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seed_or_now(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// Size the global rayon pool if a thread count was given.
pub(crate) fn configure_threads(threads: Option<usize>) {
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }
}

/// Progress bar counting games, if requested.
pub(crate) fn progress_bar(show: bool, games: u64) -> Result<Option<ProgressBar>, CliError> {
    if !show {
        return Ok(None);
    }
    let pb = ProgressBar::new(games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-"),
    );
    Ok(Some(pb))
}
