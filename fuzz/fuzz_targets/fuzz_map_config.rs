#![no_main]

use fortress_conquest::config::{MapConfig, rules_from_json};
use fortress_conquest::game::check_invariants;
use fortress_conquest::Rules;
use libfuzzer_sys::fuzz_target;

// Loaders must reject bad input with an error, never panic, and anything
// they accept must be a valid starting position.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = rules_from_json(text);

    if let Ok(map) = MapConfig::from_json(text)
        && let Ok((topology, state)) = map.build()
    {
        let violations = check_invariants(&state, &topology, &Rules::default());
        assert!(violations.is_empty(), "{violations:?}");
    }
});
