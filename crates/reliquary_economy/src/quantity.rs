//! # Quantity Resolution
//!
//! How many units of a reward drop, using compounding probability:
//!
//! ```text
//! result = min, p = p0
//! while result < max:
//!     draw r in [0, 1)
//!     r >= p  -> stop
//!     result += 1, p /= decay
//! ```
//!
//! Each success makes the next one `decay` times less likely, which bounds
//! the expected count without a hard cap below `max`.

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};
use crate::random::RandomSource;

/// Compounding-probability roll in `[min, max]`.
///
/// A draw succeeds when it is strictly below the current probability, so
/// `p = 0` never succeeds and `p >= 1` always does. No draws are made when
/// `max - min < 1`.
///
/// `decay_factor` must be positive; that is enforced by
/// [`DropConfig::validate`], not here.
pub fn resolve_quantity<R>(
    rng: &mut R,
    min: u32,
    max: u32,
    initial_probability: f32,
    decay_factor: f32,
) -> u32
where
    R: RandomSource + ?Sized,
{
    let mut result = min;
    if max <= min {
        return result;
    }

    let mut p = initial_probability;
    while result < max {
        if rng.next_unit() >= p {
            break;
        }
        p /= decay_factor;
        result += 1;
    }
    result
}

/// Tuning for one reward category's drop count.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropConfig {
    /// Guaranteed units.
    pub min_count: u32,
    /// Hard cap on units.
    pub max_count: u32,
    /// Chance of the first unit above `min_count`.
    pub initial_probability: f32,
    /// Divisor applied to the chance after every success.
    pub decay_factor: f32,
}

impl DropConfig {
    /// Creates a config. Call [`validate`](Self::validate) before rolling.
    #[must_use]
    pub const fn new(min_count: u32, max_count: u32, initial_probability: f32, decay_factor: f32) -> Self {
        Self {
            min_count,
            max_count,
            initial_probability,
            decay_factor,
        }
    }

    /// Exactly `count` units, no draws.
    #[must_use]
    pub const fn fixed(count: u32) -> Self {
        Self::new(count, count, 1.0, 1.0)
    }

    /// Checks the config can be rolled.
    ///
    /// # Errors
    ///
    /// [`EconomyError::InvalidRollConfig`] if `min_count > max_count`, the
    /// probability is negative or not finite, or the decay factor is not a
    /// positive finite number.
    pub fn validate(&self) -> EconomyResult<()> {
        if self.min_count > self.max_count {
            return Err(EconomyError::InvalidRollConfig(format!(
                "min_count {} exceeds max_count {}",
                self.min_count, self.max_count
            )));
        }
        validate_probability("initial_probability", self.initial_probability)?;
        validate_decay(self.decay_factor)
    }

    /// Rolls a unit count.
    pub fn resolve<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
        resolve_quantity(
            rng,
            self.min_count,
            self.max_count,
            self.initial_probability,
            self.decay_factor,
        )
    }

    /// Analytic mean of [`resolve`](Self::resolve). Handy for tuning tables.
    #[must_use]
    pub fn expected_count(&self) -> f64 {
        expected_roll(
            self.min_count,
            self.max_count,
            self.initial_probability,
            self.decay_factor,
        )
    }
}

/// Mean of [`resolve_quantity`] for the given parameters.
///
/// `E = min + sum_k prod_{i<k} clamp(p0 / decay^i, 0, 1)` for
/// `k = 1..=max-min`.
#[must_use]
pub fn expected_roll(min: u32, max: u32, initial_probability: f32, decay_factor: f32) -> f64 {
    let mut expected = f64::from(min);
    let mut reach = 1.0_f64;
    let mut p = f64::from(initial_probability);
    for _ in min..max {
        reach *= p.clamp(0.0, 1.0);
        if reach == 0.0 {
            break;
        }
        expected += reach;
        p /= f64::from(decay_factor);
    }
    expected
}

pub(crate) fn validate_probability(field: &str, value: f32) -> EconomyResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EconomyError::InvalidRollConfig(format!(
            "{field} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_decay(decay_factor: f32) -> EconomyResult<()> {
    if !decay_factor.is_finite() || decay_factor <= 0.0 {
        return Err(EconomyError::InvalidRollConfig(format!(
            "decay_factor must be a positive finite number, got {decay_factor}"
        )));
    }
    Ok(())
}
