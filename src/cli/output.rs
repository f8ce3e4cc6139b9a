//! Output formatting utilities for CLI.

// Averages over game counts are fine as f64
#![allow(clippy::cast_precision_loss)]

use fortress_conquest::tournament::{Standings, TournamentConfig};
use fortress_conquest::{MatchResult, Outcome, Team, Termination};
use serde::Serialize;
use std::fmt::Write;

const TEAMS: [Team; 2] = [Team::A, Team::B];

fn team_key(team: Team) -> &'static str {
    match team {
        Team::A => "blue",
        Team::B => "red",
    }
}

fn termination_key(termination: Termination) -> &'static str {
    match termination {
        Termination::Elimination => "elimination",
        Termination::TickCeiling => "tick_ceiling",
    }
}

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult {
    /// Seed used.
    pub(super) seed: u64,
    /// Winning side (null if draw).
    pub(super) winner: Option<&'static str>,
    /// How the match ended.
    pub(super) termination: &'static str,
    /// Ticks played.
    pub(super) ticks: u32,
    /// Per-side results.
    pub(super) sides: Vec<JsonSideResult>,
}

/// JSON-serializable side result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSideResult {
    /// `blue` or `red`.
    pub(super) team: &'static str,
    /// Controller name.
    pub(super) controller: String,
    /// Fortresses held at the end.
    pub(super) fortresses: usize,
    /// Deploys carried out.
    pub(super) deploys: u32,
    /// Upgrades carried out.
    pub(super) upgrades: u32,
    /// Orders ignored by the engine.
    pub(super) rejected: u32,
    /// Fortresses captured.
    pub(super) captures: u32,
}

impl JsonMatchResult {
    /// Create from a `MatchResult`.
    pub(super) fn from_match_result(result: &MatchResult, seed: u64) -> Self {
        Self {
            seed,
            winner: match result.outcome {
                Outcome::Winner(team) => Some(team_key(team)),
                Outcome::Draw => None,
            },
            termination: termination_key(result.termination),
            ticks: result.ticks,
            sides: TEAMS
                .iter()
                .map(|&team| {
                    let stats = result.stats[team.index()];
                    JsonSideResult {
                        team: team_key(team),
                        controller: result.names[team.index()].clone(),
                        fortresses: result.fortresses[team.index()],
                        deploys: stats.deploys,
                        upgrades: stats.upgrades,
                        rejected: stats.rejected,
                        captures: stats.captures,
                    }
                })
                .collect(),
        }
    }
}

/// Format a match result as human-readable text.
pub(super) fn format_text(result: &MatchResult, seed: u64) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Match Result (seed: {seed})");
    match result.outcome {
        Outcome::Winner(team) => {
            let _ = writeln!(output, "  Winner: {team} ({})", result.names[team.index()]);
        }
        Outcome::Draw => output.push_str("  Winner: Draw\n"),
    }
    let ended = match result.termination {
        Termination::Elimination => "elimination",
        Termination::TickCeiling => "tick ceiling",
    };
    let _ = writeln!(output, "  Ticks: {} ({ended})\n", result.ticks);

    for team in TEAMS {
        let stats = result.stats[team.index()];
        let _ = writeln!(
            output,
            "  {:<4} {:<10} {:>2} fortresses, {} captures, {} deploys, {} upgrades, {} rejected",
            team.to_string(),
            result.names[team.index()],
            result.fortresses[team.index()],
            stats.captures,
            stats.deploys,
            stats.upgrades,
            stats.rejected,
        );
    }

    output
}

/// Aggregated results of a series of matches.
#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct SeriesStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Wins per side.
    pub(super) wins: [u64; 2],
    /// Draw count.
    pub(super) draws: u64,
    /// Games decided by elimination.
    pub(super) eliminations: u64,
    /// Captures per side across all games.
    captures: [u64; 2],
    /// Total ticks across all games.
    total_ticks: u64,
}

impl SeriesStats {
    /// Add a match result to the stats.
    pub(super) fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        self.total_ticks += u64::from(result.ticks);
        match result.outcome {
            Outcome::Winner(team) => self.wins[team.index()] += 1,
            Outcome::Draw => self.draws += 1,
        }
        if result.termination == Termination::Elimination {
            self.eliminations += 1;
        }
        for team in TEAMS {
            self.captures[team.index()] += u64::from(result.stats[team.index()].captures);
        }
    }

    /// Merge stats gathered on another thread.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.draws += other.draws;
        self.eliminations += other.eliminations;
        self.total_ticks += other.total_ticks;
        for i in 0..2 {
            self.wins[i] += other.wins[i];
            self.captures[i] += other.captures[i];
        }
    }

    fn per_game(&self, total: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total as f64 / self.games_played as f64
    }

    /// Win rate for a side (0.0-1.0).
    pub(super) fn win_rate(&self, team: Team) -> f64 {
        self.per_game(self.wins[team.index()])
    }

    /// Draw rate (0.0-1.0).
    pub(super) fn draw_rate(&self) -> f64 {
        self.per_game(self.draws)
    }

    /// Average captures per game for a side.
    pub(super) fn avg_captures(&self, team: Team) -> f64 {
        self.per_game(self.captures[team.index()])
    }

    /// Average game length.
    pub(super) fn avg_ticks(&self) -> f64 {
        self.per_game(self.total_ticks)
    }
}

/// JSON-serializable series result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSeriesResult {
    /// Total games played.
    games_played: u64,
    /// Per-side statistics.
    sides: Vec<JsonSeriesSide>,
    /// Number of draws.
    draws: u64,
    /// Draw rate (0.0-1.0).
    draw_rate: f64,
    /// Games decided by elimination.
    eliminations: u64,
    /// Average game length in ticks.
    avg_ticks: f64,
}

/// JSON-serializable per-side series stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonSeriesSide {
    /// `blue` or `red`.
    team: &'static str,
    /// Controller name.
    controller: String,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average captures per game.
    avg_captures: f64,
}

impl JsonSeriesResult {
    /// Create from stats and controller names.
    pub(super) fn from_stats(stats: &SeriesStats, names: &[String; 2]) -> Self {
        let sides = TEAMS
            .iter()
            .map(|&team| JsonSeriesSide {
                team: team_key(team),
                controller: names[team.index()].clone(),
                wins: stats.wins[team.index()],
                win_rate: stats.win_rate(team),
                avg_captures: stats.avg_captures(team),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            sides,
            draws: stats.draws,
            draw_rate: stats.draw_rate(),
            eliminations: stats.eliminations,
            avg_ticks: stats.avg_ticks(),
        }
    }
}

/// Format series stats as human-readable text.
pub(super) fn format_series_text(stats: &SeriesStats, names: &[String; 2]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Series Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for team in TEAMS {
        let _ = writeln!(
            output,
            "  {team} ({}): {:.1}% ({} wins, {:.1} captures/game)",
            names[team.index()],
            stats.win_rate(team) * 100.0,
            stats.wins[team.index()],
            stats.avg_captures(team),
        );
    }
    let _ = writeln!(
        output,
        "  Draws: {} ({:.1}%)\n",
        stats.draws,
        stats.draw_rate() * 100.0
    );

    let _ = writeln!(
        output,
        "Decided by elimination: {} of {}",
        stats.eliminations, stats.games_played
    );
    let _ = writeln!(output, "Average Game Length: {:.0} ticks", stats.avg_ticks());

    output
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Seed of the first match.
    seed: u64,
    /// Meetings per pairing and side.
    rounds: u32,
    /// Total matches played.
    games_played: u32,
    /// Entrants, best first.
    rankings: Vec<JsonTournamentEntry>,
}

/// JSON-serializable tournament entrant.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentEntry {
    /// 1-based rank.
    rank: usize,
    /// Controller name.
    controller: String,
    /// Three points per win, one per draw.
    score: u32,
    /// Matches won.
    wins: u32,
    /// Matches drawn.
    draws: u32,
    /// Matches lost.
    losses: u32,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average fortresses held at the end of a match.
    avg_fortresses: f64,
}

impl JsonTournamentResult {
    /// Create from final standings.
    pub(super) fn from_standings(standings: &Standings, config: &TournamentConfig) -> Self {
        let rankings = standings
            .ranked()
            .into_iter()
            .enumerate()
            .map(|(i, entry)| JsonTournamentEntry {
                rank: i + 1,
                score: entry.score(),
                wins: entry.wins,
                draws: entry.draws,
                losses: entry.losses,
                win_rate: entry.win_rate(),
                avg_fortresses: entry.avg_fortresses(),
                controller: entry.name,
            })
            .collect();

        Self {
            seed: config.seed,
            rounds: config.rounds,
            games_played: standings.matches_played(),
            rankings,
        }
    }
}

/// Format tournament standings as a ranked table.
pub(super) fn format_tournament_text(standings: &Standings, config: &TournamentConfig) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Tournament Results ({} games, {} rounds per side, seed {})",
        standings.matches_played(),
        config.rounds,
        config.seed
    );
    output.push_str("======================================================================\n\n");
    let _ = writeln!(
        output,
        "{:<4} {:<12} {:>5} {:>4} {:>4} {:>4} {:>8} {:>10}",
        "Rank", "Controller", "Score", "W", "D", "L", "Win%", "Avg forts"
    );
    output.push_str("----------------------------------------------------------------------\n");
    for (i, entry) in standings.ranked().iter().enumerate() {
        let _ = writeln!(
            output,
            "{:<4} {:<12} {:>5} {:>4} {:>4} {:>4} {:>7.1}% {:>10.2}",
            i + 1,
            entry.name,
            entry.score(),
            entry.wins,
            entry.draws,
            entry.losses,
            entry.win_rate() * 100.0,
            entry.avg_fortresses(),
        );
    }

    output
}
