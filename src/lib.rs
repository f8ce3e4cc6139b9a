// Allow unwrap and float comparisons in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Fortress Conquest: a deterministic two-player real-time strategy engine.
//!
//! Two controllers compete for twelve fortresses joined by roads. Each tick
//! a controller may deploy half a garrison toward a neighbor or spend pawns
//! on an upgrade; pawns travel, fight on arrival, and fortresses refill
//! over time. A side with no fortresses left loses.
//!
//! Both controllers play from the same perspective: the engine mirrors the
//! board for team B so every controller believes it is team A at the
//! bottom.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI driver / series / tournament  │
//! ├─────────────────────────────────────┤
//! │   Engine (tick loop, results)       │
//! ├──────────────────┬──────────────────┤
//! │   Controllers    │   Views          │
//! ├──────────────────┴──────────────────┤
//! │   Game rules and state              │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod controller;
pub mod controllers;
pub mod engine;
pub mod error;
pub mod game;
pub mod tournament;

pub use config::MapConfig;
pub use controller::{Controller, FnController};
pub use engine::{Engine, EngineConfig, MatchResult, SideStats, Termination, run_match};
pub use error::{ConfigError, ConfigResult};
pub use tournament::{Standings, TournamentConfig, run_tournament};

// Re-export key game types at crate root for convenience
pub use game::{Command, Fortress, GameState, Outcome, Rules, Team, Topology, View};
