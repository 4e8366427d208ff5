//! # Random Sources
//!
//! Every roll in this crate draws from one injected [`RandomSource`]. Within
//! one event the draws happen in a fixed order, so a seeded source replays
//! an event exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random numbers in `[0, 1)`.
///
/// Randomness is not optional: a source that cannot produce a value has no
/// meaningful fallback and should panic rather than return garbage.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[low, high)`. `low > high` is allowed and mirrors.
    fn range(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_unit()
    }

    /// Uniform index in `0..len`. Returns 0 for `len == 0`; callers check
    /// emptiness first.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn index(&mut self, len: usize) -> usize {
        let i = (self.next_unit() * len as f32) as usize;
        i.min(len.saturating_sub(1))
    }
}

/// Seeded ChaCha8 stream. Same seed, same rewards.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    draws: u64,
}

impl SeededRandom {
    /// Creates a stream from a 64-bit seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Number of values drawn so far.
    #[inline]
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.draws += 1;
        self.rng.gen::<f32>()
    }
}

/// Replays a fixed list of draws. Meant for tests and tuning tools that
/// need to force a specific outcome.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
    repeat: bool,
}

impl ScriptedRandom {
    /// Plays `values` once.
    #[must_use]
    pub fn new(values: &[f32]) -> Self {
        Self {
            values: values.to_vec(),
            cursor: 0,
            repeat: false,
        }
    }

    /// Plays `values` in a loop.
    #[must_use]
    pub fn repeating(values: &[f32]) -> Self {
        Self {
            repeat: true,
            ..Self::new(values)
        }
    }

    /// Number of values drawn so far.
    #[inline]
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.cursor
    }

    /// Values not yet drawn (always the full script when repeating).
    #[must_use]
    pub fn remaining(&self) -> usize {
        if self.repeat {
            self.values.len()
        } else {
            self.values.len().saturating_sub(self.cursor)
        }
    }
}

impl RandomSource for ScriptedRandom {
    /// # Panics
    ///
    /// Panics when a non-repeating script is exhausted, or when the script is
    /// empty.
    fn next_unit(&mut self) -> f32 {
        let slot = if self.repeat && !self.values.is_empty() {
            self.cursor % self.values.len()
        } else {
            self.cursor
        };
        let Some(&value) = self.values.get(slot) else {
            panic!(
                "scripted random source exhausted after {} draws",
                self.cursor
            );
        };
        self.cursor += 1;
        value
    }
}
