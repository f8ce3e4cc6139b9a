//! Deterministic PRNG shared by the engine and the scripted controllers.

// Intentional casts between the raw u64 stream and the requested ranges
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

/// Xorshift64 generator. Same seed, same stream, on every platform.
#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a generator from `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Xorshift is stuck at zero forever
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in `[0, max)`, or 0 when `max` is 0.
    pub fn below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as usize
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        // 53 high bits give every representable step in [0, 1)
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
