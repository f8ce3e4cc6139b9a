//! Tournament command implementation.

use super::output::{JsonTournamentResult, format_tournament_text};
use super::{CliError, OutputFormat, Setup, configure_threads, progress_bar, seed_or_now};
use fortress_conquest::tournament::{self, Standings, TournamentConfig};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

/// Options for a round-robin tournament.
#[derive(Debug)]
pub(crate) struct TournamentOptions {
    pub(crate) controllers: Vec<String>,
    pub(crate) rounds: u32,
    pub(crate) seed: Option<u64>,
    pub(crate) threads: Option<usize>,
    pub(crate) max_ticks: u32,
    pub(crate) map: Option<PathBuf>,
    pub(crate) rules: Option<PathBuf>,
    pub(crate) format: OutputFormat,
    pub(crate) progress: bool,
}

/// Execute the tournament command.
///
/// With no controllers named, every registered controller enters.
///
/// # Errors
///
/// Returns an error if fewer than two controllers enter, one is unknown, or
/// a config file is invalid.
pub(crate) fn execute(options: TournamentOptions) -> Result<(), CliError> {
    let names = if options.controllers.is_empty() {
        fortress_conquest::controllers::names()
            .map(str::to_owned)
            .collect()
    } else {
        options.controllers
    };
    tournament::check_entrants(&names)?;
    let setup = Setup::load(options.map, options.rules)?;

    configure_threads(options.threads);
    let config = TournamentConfig {
        rounds: options.rounds,
        max_ticks: options.max_ticks,
        seed: seed_or_now(options.seed),
    };
    let pairings = tournament::schedule(names.len(), &config);
    let pb = progress_bar(options.progress, pairings.len() as u64)?;

    let start = Instant::now();

    let standings = pairings
        .par_iter()
        .fold(
            || Standings::new(&names),
            |mut local, pairing| {
                if let Some(result) = tournament::play(
                    pairing,
                    &names,
                    &setup.topology,
                    &setup.state,
                    &setup.rules,
                    config.max_ticks,
                ) {
                    local.record(pairing, &result);
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local
            },
        )
        .reduce(
            || Standings::new(&names),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    match options.format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&standings, &config));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonTournamentResult::from_standings(
                &standings, &config,
            ))?;
            println!("{json}");
        }
    }

    Ok(())
}
