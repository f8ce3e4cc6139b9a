#![no_main]

use arbitrary::Arbitrary;
use fortress_conquest::game::{
    ArrivalOutcome, Fortress, Kind, Level, MovingPawn, Owner, Team, Vec2, resolve_arrival,
};
use fortress_conquest::Rules;
use libfuzzer_sys::fuzz_target;

/// Structured input for arrival fuzzing.
#[derive(Arbitrary, Debug)]
struct ArrivalInput {
    /// 0 neutral, 1 team A, 2 team B.
    owner: u8,
    /// Defender garrison in hundredths of a pawn.
    garrison: u32,
    level: u8,
    upgrade_timer: Option<u16>,
    attacker_is_b: bool,
    attacker_kind1: bool,
    /// Number of pawns arriving back to back.
    arrivals: u8,
}

fuzz_target!(|input: ArrivalInput| {
    let owner = match input.owner % 3 {
        0 => Owner::Neutral,
        1 => Owner::Team(Team::A),
        _ => Owner::Team(Team::B),
    };
    let Some(level) = Level::new(input.level % 5 + 1) else {
        return;
    };
    let rules = Rules::default();
    let mut fortress = Fortress::new(
        owner,
        Kind::Kind0,
        level,
        f64::from(input.garrison.min(10_000_000)) / 100.0,
    );
    if owner != Owner::Neutral && level.is_upgradable() {
        fortress.upgrade_timer = input.upgrade_timer.map(|t| u32::from(t) % 201);
    }

    let team = if input.attacker_is_b { Team::B } else { Team::A };
    let kind = if input.attacker_kind1 { Kind::Kind1 } else { Kind::Kind0 };
    let pawn = MovingPawn { team, kind, from: 10, to: 7, position: Vec2::default() };

    let mut captured = false;
    for _ in 0..input.arrivals {
        let before = fortress;
        let outcome = resolve_arrival(&mut fortress, &pawn, &rules);

        assert!(fortress.pawns.is_finite());
        assert!(fortress.pawns >= 0.0, "garrison went negative: {fortress:?}");
        match outcome {
            ArrivalOutcome::Reinforced => {
                assert!(before.owner.is(team));
                assert!((fortress.pawns - before.pawns - 1.0).abs() < 1e-9);
            }
            ArrivalOutcome::Damaged => {
                assert!(!before.owner.is(team));
                assert_eq!(fortress.owner, before.owner);
                assert_eq!(fortress.level, before.level);
            }
            ArrivalOutcome::Captured => {
                assert!(!captured, "captured twice");
                captured = true;
                assert_eq!(fortress.owner, Owner::Team(team));
                assert_eq!(fortress.level, Level::MIN);
                assert_eq!(fortress.pawns, 0.0);
                assert_eq!(fortress.upgrade_timer, None);
            }
        }
    }
});
