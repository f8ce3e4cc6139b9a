//! Property-based tests for the game rules and the engine.
//!
//! These tests check the properties every reachable state must satisfy:
//! production never overfills, deploys conserve pawns, captures are atomic,
//! the perspective flip is an involution and termination is well defined.
//! Run with: cargo test --release prop_engine

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::float_cmp)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use proptest::prelude::*;

use fortress_conquest::game::{
    ArrivalOutcome, FORTRESS_COUNT, Fortress, Kind, Level, MovingPawn, Owner, Rng, SpawningBatch,
    Vec2, check_invariants, decay, produce, resolve_arrival,
};
use fortress_conquest::{
    Command, Engine, EngineConfig, FnController, GameState, Outcome, Rules, Team, Topology, View,
};

fn team() -> impl Strategy<Value = Team> {
    prop_oneof![Just(Team::A), Just(Team::B)]
}

fn owner() -> impl Strategy<Value = Owner> {
    prop_oneof![
        Just(Owner::Neutral),
        Just(Owner::Team(Team::A)),
        Just(Owner::Team(Team::B)),
    ]
}

fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![Just(Kind::Kind0), Just(Kind::Kind1)]
}

fn level() -> impl Strategy<Value = Level> {
    (1u8..=5).prop_map(|l| Level::new(l).unwrap())
}

fn fortress() -> impl Strategy<Value = Fortress> {
    (owner(), kind(), level(), 0.0f64..80.0, proptest::option::of(0u32..=200)).prop_map(
        |(owner, kind, level, pawns, timer)| {
            let mut fortress = Fortress::new(owner, kind, level, pawns);
            if owner != Owner::Neutral && level.is_upgradable() {
                fortress.upgrade_timer = timer;
            }
            fortress
        },
    )
}

/// A pawn or batch on a real road of the reference board.
fn road() -> impl Strategy<Value = (usize, usize)> {
    let edges = Topology::standard().edges();
    (0..edges.len(), any::<bool>()).prop_map(move |(i, forward)| {
        let (a, b) = edges[i];
        if forward { (a, b) } else { (b, a) }
    })
}

fn state() -> impl Strategy<Value = GameState> {
    (
        proptest::array::uniform12(fortress()),
        proptest::collection::vec((team(), kind(), road(), -5.0f64..5.0), 0..20),
        proptest::collection::vec((team(), kind(), road(), 1u32..30), 0..6),
        0u32..5000,
    )
        .prop_map(|(fortresses, moving, spawning, tick)| {
            let topology = Topology::standard();
            let mut state = GameState::new(fortresses);
            state.tick = tick;
            state.moving = moving
                .into_iter()
                .map(|(team, kind, (from, to), offset)| MovingPawn {
                    team,
                    kind,
                    from,
                    to,
                    position: topology.position(from).add(Vec2::new(offset, -offset)),
                })
                .collect();
            state.spawning = spawning
                .into_iter()
                .map(|(team, kind, (from, to), remaining)| SpawningBatch {
                    team,
                    kind,
                    remaining,
                    from,
                    to,
                    spawn_position: topology.position(from),
                })
                .collect();
            state
        })
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Wait),
        (0usize..14, 0usize..14).prop_map(|(subject, target)| Command::Deploy { subject, target }),
        (0usize..14).prop_map(|subject| Command::Upgrade { subject }),
    ]
}

/// Replays a fixed command list, then waits.
fn scripted(name: &'static str, commands: Vec<Command>) -> Box<FnController<impl FnMut(&View) -> Command>> {
    let mut commands = commands.into_iter();
    Box::new(FnController::new(name, move |_: &View| {
        commands.next().unwrap_or_default()
    }))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Production never pushes a garrison past capacity and never raises
    /// one that is already above it.
    #[test]
    fn prop_production_respects_capacity(
        fortresses in proptest::array::uniform12(fortress()),
        tick in 0u32..5000,
    ) {
        let rules = Rules::default();
        let mut after = fortresses;
        produce(&mut after, tick, &rules);
        decay(&mut after, tick, &rules);

        for (before, after) in fortresses.iter().zip(&after) {
            let capacity = f64::from(rules.capacity(before.level));
            if before.pawns <= capacity {
                prop_assert!(after.pawns <= capacity);
                prop_assert!(after.pawns >= before.pawns);
                prop_assert!(after.pawns - before.pawns <= 1.0);
            } else {
                // Over capacity only drains, one pawn at a time
                prop_assert!(after.pawns <= before.pawns);
                prop_assert!(before.pawns - after.pawns <= 1.0);
            }
            if before.owner == Owner::Neutral {
                prop_assert!(after.pawns <= before.pawns);
            }
        }
    }

    /// A deploy removes floor(p/2) pawns at once and releases exactly that
    /// many over the batch's lifetime.
    #[test]
    fn prop_deploy_conserves_pawns(
        pawns in 2.0f64..500.0,
        (from, to) in road(),
        seed in any::<u64>(),
    ) {
        let topology = Topology::standard();
        let rules = Rules::default();
        let mut state = GameState::standard();
        state.fortresses[from] = Fortress::new(Owner::Team(Team::A), Kind::Kind0, Level::MIN, pawns);

        prop_assert_eq!(state.try_deploy(Team::A, from, to, &topology, &rules), Ok(()));
        let sent = (pawns / 2.0).floor();
        prop_assert!((state.fortresses[from].pawns - (pawns - sent)).abs() < 1e-9);

        let mut rng = Rng::new(seed);
        let mut released = 0;
        for tick in 0..(sent as u32 + 1) * rules.departure_period(Kind::Kind0) {
            state.tick = tick;
            released += state.release_departures(&topology, &rules, &mut rng);
        }
        prop_assert_eq!(f64::from(released), sent);
        prop_assert_eq!(state.moving.len(), released as usize);
        prop_assert!(state.spawning.is_empty());
    }

    /// Ownership changes exactly when a hostile arrival drives the garrison
    /// below zero, and a captured fortress is always reset.
    #[test]
    fn prop_capture_is_atomic(
        fortress in fortress(),
        attacker in team(),
        kind in kind(),
    ) {
        let rules = Rules::default();
        let pawn = MovingPawn { team: attacker, kind, from: 10, to: 7, position: Vec2::default() };
        let mut after = fortress;
        let outcome = resolve_arrival(&mut after, &pawn, &rules);

        let hostile = !fortress.owner.is(attacker);
        let falls = hostile && fortress.pawns - rules.damage(kind) < 0.0;
        prop_assert_eq!(outcome == ArrivalOutcome::Captured, falls);
        prop_assert_eq!(after.owner != fortress.owner, falls);
        if falls {
            prop_assert_eq!(after.owner, Owner::Team(attacker));
            prop_assert_eq!(after.level, Level::MIN);
            prop_assert_eq!(after.pawns, 0.0);
            prop_assert_eq!(after.upgrade_timer, None);
        } else {
            prop_assert_eq!(after.level, fortress.level);
            prop_assert_eq!(after.upgrade_timer, fortress.upgrade_timer);
        }
    }

    /// Flipping a view twice gives back the original view.
    #[test]
    fn prop_flip_is_involution(state in state(), viewer in team(), terminal in any::<bool>()) {
        let topology = Topology::standard();
        let rules = Rules::default();
        let view = View::absolute(&state, &topology, &rules, viewer, terminal);

        prop_assert_eq!(view.flipped(&topology).flipped(&topology), view);
    }

    /// Both sides see themselves as team A, and each side's view of its
    /// own holdings matches the board through the symmetry.
    #[test]
    fn prop_views_are_mirror_images(state in state()) {
        let topology = Topology::standard();
        let rules = Rules::default();
        let blue = View::for_team(&state, &topology, &rules, Team::A, false);
        let red = View::for_team(&state, &topology, &rules, Team::B, false);

        prop_assert_eq!(blue.team, Team::A);
        prop_assert_eq!(red.team, Team::A);
        for id in 0..FORTRESS_COUNT {
            let board = &state.fortresses[topology.mirror(id)];
            prop_assert_eq!(red.is_mine(id), board.owner.is(Team::B));
            prop_assert_eq!(red.fortresses[id].pawns, board.pawns);
            prop_assert_eq!(&red.fortresses[id].neighbors, &blue.fortresses[id].neighbors);
        }
    }

    /// The elimination check decides exactly when a side is wiped out, and
    /// the side holding more fortresses wins.
    #[test]
    fn prop_termination_is_exclusive(owners in proptest::array::uniform12(owner())) {
        let mut state = GameState::standard();
        for (fortress, owner) in state.fortresses.iter_mut().zip(owners) {
            fortress.owner = owner;
        }
        let [a, b] = state.fortress_counts();

        match state.elimination_outcome() {
            None => prop_assert!(a > 0 && b > 0),
            Some(Outcome::Winner(Team::A)) => prop_assert!(b == 0 && a > 0),
            Some(Outcome::Winner(Team::B)) => prop_assert!(a == 0 && b > 0),
            Some(Outcome::Draw) => prop_assert!(a == 0 && b == 0),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Arbitrary command streams never break an invariant, and the match
    /// ends within the tick ceiling.
    #[test]
    fn prop_arbitrary_commands_keep_invariants(
        blue in proptest::collection::vec(command(), 0..300),
        red in proptest::collection::vec(command(), 0..300),
        seed in any::<u64>(),
    ) {
        let mut engine = Engine::standard(
            scripted("blue", blue),
            scripted("red", red),
            EngineConfig { max_ticks: 400, seed },
        );

        while engine.tick() {
            let violations = check_invariants(engine.state(), engine.topology(), engine.rules());
            prop_assert!(violations.is_empty(), "{:?}", violations);
        }
        let result = engine.result().unwrap();
        prop_assert!(result.ticks <= 400);
        prop_assert_eq!(result.fortresses, engine.state().fortress_counts());
    }
}
