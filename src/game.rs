//! Game layer for Fortress Conquest.
//!
//! Implements the rules of a match on the fixed 12-fortress board:
//! - Board geometry and the point symmetry used for perspective flips
//! - Rule tables (capacity, production cooldown, pawn speed and damage)
//! - Fortress, pawn and batch records
//! - Tick phases: movement, arrival combat, commands, departures, upkeep
//! - Per-side views handed to controllers

mod combat;
mod command;
mod economy;
mod fortress;
mod invariants;
mod pawn;
mod rng;
mod rules;
mod state;
mod topology;
mod view;

pub use combat::{ArrivalOutcome, resolve_arrival};
pub use command::Command;
pub use economy::{advance_upgrades, decay, fires, produce};
pub use fortress::{FORTRESS_COUNT, Fortress, FortressId, Kind, Level, Owner, Team};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use pawn::{MovingPawn, SpawningBatch};
pub use rng::Rng;
pub use rules::{KIND_COUNT, LEVEL_COUNT, Rules};
pub use state::{Arrival, GameState, Outcome, Rejection};
pub use topology::{Topology, Vec2};
pub use view::{FortressView, View, to_board};
