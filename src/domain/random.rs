use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
///
/// Production code uses an OS-seeded generator; tests plug in a seeded or
/// scripted source so simulator runs are reproducible.
pub trait RandomSource: Send {
    // ---
    fn next_f64(&mut self) -> f64;
}

/// [`RandomSource`] backed by `rand`'s standard generator.
pub struct StdRandom {
    // ---
    rng: StdRng,
}

impl StdRandom {
    // ---
    pub fn from_entropy() -> Self {
        // ---
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        // ---
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    // ---
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
pub struct ScriptedRandom {
    // ---
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    // ---
    pub fn new(draws: Vec<f64>) -> Self {
        // ---
        Self { draws, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    // ---
    fn next_f64(&mut self) -> f64 {
        // ---
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
