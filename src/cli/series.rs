//! Series command implementation.

use super::output::{JsonSeriesResult, SeriesStats, format_series_text};
use super::{
    CliError, OutputFormat, Setup, build_pair, check_names, configure_threads, progress_bar,
    seed_or_now,
};
use fortress_conquest::{Engine, EngineConfig};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

/// Options for a series of matches between one pairing.
#[derive(Debug)]
pub(crate) struct SeriesOptions {
    pub(crate) blue: String,
    pub(crate) red: String,
    pub(crate) games: u64,
    pub(crate) seed: Option<u64>,
    pub(crate) threads: Option<usize>,
    pub(crate) max_ticks: u32,
    pub(crate) map: Option<PathBuf>,
    pub(crate) rules: Option<PathBuf>,
    pub(crate) format: OutputFormat,
    pub(crate) progress: bool,
}

/// Execute the series command.
///
/// # Errors
///
/// Returns an error if a controller is unknown, a config file is invalid,
/// or the progress bar template is rejected.
pub(crate) fn execute(options: SeriesOptions) -> Result<(), CliError> {
    check_names(&options.blue, &options.red)?;
    let setup = Setup::load(options.map, options.rules)?;

    configure_threads(options.threads);
    let base_seed = seed_or_now(options.seed);
    let pb = progress_bar(options.progress, options.games)?;

    let start = Instant::now();

    // Each thread folds into its own stats, merged at the end
    let stats = (0..options.games)
        .into_par_iter()
        .fold(SeriesStats::default, |mut local, i| {
            let seed = base_seed.wrapping_add(i);
            if let Ok([blue, red]) = build_pair(&options.blue, &options.red, &setup.rules, seed) {
                let config = EngineConfig {
                    max_ticks: options.max_ticks,
                    seed,
                };
                let mut engine = Engine::new(
                    setup.topology.clone(),
                    setup.rules,
                    setup.state.clone(),
                    blue,
                    red,
                    config,
                );
                local.add_result(&engine.run());
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(SeriesStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let names = [options.blue, options.red];

    match options.format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_series_text(&stats, &names));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSeriesResult::from_stats(&stats, &names))?;
            println!("{json}");
        }
    }

    Ok(())
}
