//! Randomness seam for the simulation
//!
//! Gameplay code only sees `SimRng`, so runs are reproducible from a seed and
//! tests can script exact rolls.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform rolls in `[0, 1)`
pub trait SimRng {
    fn next_f32(&mut self) -> f32;

    /// Uniform value in `[lo, hi)`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }
}

impl SimRng for Pcg32 {
    fn next_f32(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded PCG generator for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Deterministic generators for tests and scripted replays. Not used by play.
pub mod testing {
    use super::SimRng;

    /// Replays a fixed list of rolls, cycling when exhausted.
    ///
    /// An empty list behaves like `constant(0.0)`.
    #[derive(Debug, Clone)]
    pub struct ScriptedRng {
        rolls: Vec<f32>,
        cursor: usize,
    }

    impl ScriptedRng {
        pub fn new(rolls: impl Into<Vec<f32>>) -> Self {
            let mut rolls = rolls.into();
            if rolls.is_empty() {
                rolls.push(0.0);
            }
            Self { rolls, cursor: 0 }
        }

        /// Always returns the same roll
        pub fn constant(roll: f32) -> Self {
            Self::new(vec![roll])
        }
    }

    impl SimRng for ScriptedRng {
        fn next_f32(&mut self) -> f32 {
            let roll = self.rolls[self.cursor % self.rolls.len()];
            self.cursor += 1;
            roll
        }
    }
}
