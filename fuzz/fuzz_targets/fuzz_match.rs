#![no_main]

use arbitrary::Arbitrary;
use fortress_conquest::game::check_invariants;
use fortress_conquest::{Command, Engine, EngineConfig, FnController, View};
use libfuzzer_sys::fuzz_target;

/// No garrison can grow this large within the capped tick count.
const HARNESS_MAX_PAWNS: f64 = 100_000.0;

/// One raw command as a controller might emit it, indices unchecked.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum RawCommand {
    Wait,
    Deploy { subject: u8, target: u8 },
    Upgrade { subject: u8 },
}

impl From<RawCommand> for Command {
    fn from(raw: RawCommand) -> Self {
        match raw {
            RawCommand::Wait => Command::Wait,
            RawCommand::Deploy { subject, target } => Command::Deploy {
                subject: usize::from(subject % 16),
                target: usize::from(target % 16),
            },
            RawCommand::Upgrade { subject } => Command::Upgrade {
                subject: usize::from(subject % 16),
            },
        }
    }
}

#[derive(Arbitrary, Debug)]
struct MatchInput {
    seed: u64,
    max_ticks: u16,
    blue: Vec<RawCommand>,
    red: Vec<RawCommand>,
}

fuzz_target!(|input: MatchInput| {
    let max_ticks = u32::from(input.max_ticks % 1500);
    let mut blue = input.blue.into_iter().map(Command::from);
    let mut red = input.red.into_iter().map(Command::from);

    let mut engine = Engine::standard(
        Box::new(FnController::new("blue", move |_: &View| blue.next().unwrap_or_default())),
        Box::new(FnController::new("red", move |_: &View| red.next().unwrap_or_default())),
        EngineConfig { max_ticks, seed: input.seed },
    );

    while engine.tick() {
        let violations = check_invariants(engine.state(), engine.topology(), engine.rules());
        assert!(violations.is_empty(), "tick {}: {violations:?}", engine.tick_count());
        for (id, fortress) in engine.fortresses().iter().enumerate() {
            assert!(fortress.pawns <= HARNESS_MAX_PAWNS, "fortress {id} holds {}", fortress.pawns);
        }
    }

    let Some(result) = engine.result() else {
        panic!("engine stopped without a result");
    };
    assert!(result.ticks <= max_ticks);
    assert_eq!(result.fortresses, engine.state().fortress_counts());
    // Terminal state is sticky
    assert!(!engine.tick());
});
