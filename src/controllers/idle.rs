//! Controller that never acts.

use crate::controller::Controller;
use crate::game::{Command, View};

/// Always waits. Useful as a baseline opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Controller for Idle {
    fn name(&self) -> &str {
        "idle"
    }

    fn decide(&mut self, _view: &View) -> Command {
        Command::Wait
    }
}
