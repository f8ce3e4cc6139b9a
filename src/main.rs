//! Fortress CLI - Command-line interface for running Fortress Conquest matches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::float_cmp))]

mod cli;

use clap::{Parser, Subcommand};
use fortress_conquest::engine::DEFAULT_MAX_TICKS;
use fortress_conquest::tournament::DEFAULT_ROUNDS;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Fortress Conquest - A deterministic two-player strategy engine
#[derive(Parser, Debug)]
#[command(name = "fortress")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log match events (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single match between two controllers
    Run {
        /// Controller playing blue (bottom side)
        #[arg(long, default_value = "greedy")]
        blue: String,

        /// Controller playing red (top side)
        #[arg(long, default_value = "random")]
        red: String,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Tick ceiling
        #[arg(short = 't', long, default_value_t = DEFAULT_MAX_TICKS)]
        max_ticks: u32,

        /// Map file (JSON)
        #[arg(long)]
        map: Option<PathBuf>,

        /// Rules file (JSON)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Play many seeded matches of one pairing and aggregate the results
    Series {
        /// Controller playing blue (bottom side)
        #[arg(long, default_value = "greedy")]
        blue: String,

        /// Controller playing red (top side)
        #[arg(long, default_value = "random")]
        red: String,

        /// Number of games to run
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Tick ceiling per game
        #[arg(short = 't', long, default_value_t = DEFAULT_MAX_TICKS)]
        max_ticks: u32,

        /// Map file (JSON)
        #[arg(long)]
        map: Option<PathBuf>,

        /// Rules file (JSON)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Round-robin between controllers, each pairing played from both sides
    Tournament {
        /// Controllers to enter (default: every registered controller)
        controllers: Vec<String>,

        /// Meetings per pairing from each side
        #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
        rounds: u32,

        /// Seed of the first match (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Tick ceiling per game
        #[arg(short = 't', long, default_value_t = DEFAULT_MAX_TICKS)]
        max_ticks: u32,

        /// Map file (JSON)
        #[arg(long)]
        map: Option<PathBuf>,

        /// Rules file (JSON)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// List registered controllers
    List,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Run {
            blue,
            red,
            seed,
            max_ticks,
            map,
            rules,
            format,
        } => cli::run::execute(cli::run::RunOptions {
            blue,
            red,
            seed,
            max_ticks,
            map,
            rules,
            format,
        }),

        Commands::Series {
            blue,
            red,
            games,
            seed,
            threads,
            max_ticks,
            map,
            rules,
            format,
            progress,
        } => cli::series::execute(cli::series::SeriesOptions {
            blue,
            red,
            games,
            seed,
            threads,
            max_ticks,
            map,
            rules,
            format,
            progress,
        }),

        Commands::Tournament {
            controllers,
            rounds,
            seed,
            threads,
            max_ticks,
            map,
            rules,
            format,
            progress,
        } => cli::tournament::execute(cli::tournament::TournamentOptions {
            controllers,
            rounds,
            seed,
            threads,
            max_ticks,
            map,
            rules,
            format,
            progress,
        }),

        Commands::List => cli::list::execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
