//! Built-in controllers and the name-keyed registry.
//!
//! The registry is a static table populated at compile time. Drivers look
//! controllers up by name and get a fresh instance per match.

mod greedy;
mod idle;
mod random;

pub use greedy::Greedy;
pub use idle::Idle;
pub use random::RandomController;

use crate::controller::Controller;
use crate::game::Rules;

/// One registered controller.
#[derive(Debug, Clone, Copy)]
pub struct ControllerEntry {
    /// Lookup key.
    pub name: &'static str,
    /// One-line summary shown by `fortress list`.
    pub description: &'static str,
    build: fn(&Rules, u64) -> Box<dyn Controller>,
}

impl ControllerEntry {
    /// Build a fresh controller for one match.
    #[must_use]
    pub fn build(&self, rules: &Rules, seed: u64) -> Box<dyn Controller> {
        (self.build)(rules, seed)
    }
}

const REGISTRY: &[ControllerEntry] = &[
    ControllerEntry {
        name: "idle",
        description: "Never acts",
        build: |_, _| Box::new(Idle),
    },
    ControllerEntry {
        name: "random",
        description: "Random orders, more likely from fuller fortresses",
        build: |_, seed| Box::new(RandomController::new(seed)),
    },
    ControllerEntry {
        name: "greedy",
        description: "Captures the weakest neighbor it can overwhelm, upgrades safe rear fortresses",
        build: |rules, _| Box::new(Greedy::new(rules)),
    },
];

/// All registered controllers, in display order.
#[must_use]
pub fn registry() -> &'static [ControllerEntry] {
    REGISTRY
}

/// Registered controller names, in display order.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|entry| entry.name)
}

/// Build the controller registered as `name`.
///
/// `seed` feeds controllers that make random choices. Returns `None` for an
/// unknown name.
#[must_use]
pub fn create(name: &str, rules: &Rules, seed: u64) -> Option<Box<dyn Controller>> {
    REGISTRY
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.build(rules, seed))
}

/// Xored into the match seed for team B's controller.
const RED_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Build both controllers for one match.
///
/// Team B's controller draws from a different stream than team A's, so a
/// random controller playing itself does not mirror its opponent move for
/// move. Returns `None` if either name is unknown.
#[must_use]
pub fn create_pair(
    blue: &str,
    red: &str,
    rules: &Rules,
    seed: u64,
) -> Option<[Box<dyn Controller>; 2]> {
    Some([
        create(blue, rules, seed)?,
        create(red, rules, seed ^ RED_SEED_SALT)?,
    ])
}
