//! Controller contract.
//!
//! A controller is the decision-making side of a match. The engine calls
//! [`Controller::decide`] exactly once per side per tick with a perspective
//! view in which the controller always plays team A from the bottom of the
//! board. Controllers never see or touch engine state directly.

use crate::game::{Command, View};

/// Decision policy for one side of a match.
pub trait Controller {
    /// Display name of this controller.
    fn name(&self) -> &str;

    /// Choose this tick's command from a read-only view.
    ///
    /// Indices in the returned command are view indices. Commands the
    /// engine cannot apply are ignored.
    fn decide(&mut self, view: &View) -> Command;
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn decide(&mut self, view: &View) -> Command {
        (**self).decide(view)
    }
}

/// Controller backed by a closure.
///
/// Handy for tests and for scripting a fixed command stream.
pub struct FnController<F> {
    name: String,
    decide: F,
}

impl<F> FnController<F>
where
    F: FnMut(&View) -> Command,
{
    /// Wrap `decide` under the given display name.
    pub fn new(name: impl Into<String>, decide: F) -> Self {
        Self {
            name: name.into(),
            decide,
        }
    }
}

impl<F> std::fmt::Debug for FnController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnController")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> Controller for FnController<F>
where
    F: FnMut(&View) -> Command,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, view: &View) -> Command {
        (self.decide)(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Rules, Team, Topology};

    #[test]
    fn test_fn_controller_delegates() {
        let state = GameState::standard();
        let view = View::for_team(&state, &Topology::standard(), &Rules::default(), Team::A, false);

        let mut calls = 0;
        let mut controller = FnController::new("counter", |view: &View| {
            calls += 1;
            Command::Upgrade {
                subject: view.mine().next().unwrap_or_default(),
            }
        });

        assert_eq!(controller.name(), "counter");
        assert_eq!(controller.decide(&view), Command::Upgrade { subject: 10 });
        drop(controller);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_boxed_controller_is_a_controller() {
        let mut boxed: Box<dyn Controller> =
            Box::new(FnController::new("waiter", |_: &View| Command::Wait));
        let view = View::for_team(
            &GameState::standard(),
            &Topology::standard(),
            &Rules::default(),
            Team::B,
            false,
        );
        assert_eq!(boxed.name(), "waiter");
        assert_eq!(boxed.decide(&view), Command::Wait);
    }
}
