//! Run command implementation.

use super::output::{JsonMatchResult, format_text};
use super::{CliError, OutputFormat, Setup, build_pair, check_names, seed_or_now};
use fortress_conquest::{Engine, EngineConfig};
use std::path::PathBuf;

/// Options for a single match.
#[derive(Debug)]
pub(crate) struct RunOptions {
    pub(crate) blue: String,
    pub(crate) red: String,
    pub(crate) seed: Option<u64>,
    pub(crate) max_ticks: u32,
    pub(crate) map: Option<PathBuf>,
    pub(crate) rules: Option<PathBuf>,
    pub(crate) format: OutputFormat,
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if a controller is unknown or a config file is invalid.
pub(crate) fn execute(options: RunOptions) -> Result<(), CliError> {
    check_names(&options.blue, &options.red)?;
    let setup = Setup::load(options.map, options.rules)?;
    let seed = seed_or_now(options.seed);

    let [blue, red] = build_pair(&options.blue, &options.red, &setup.rules, seed)?;
    let config = EngineConfig {
        max_ticks: options.max_ticks,
        seed,
    };
    let mut engine = Engine::new(setup.topology, setup.rules, setup.state, blue, red, config);
    let result = engine.run();

    match options.format {
        OutputFormat::Text => print!("{}", format_text(&result, seed)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonMatchResult::from_match_result(&result, seed))?;
            println!("{json}");
        }
    }

    Ok(())
}
