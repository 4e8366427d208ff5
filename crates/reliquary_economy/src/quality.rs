//! # Quality Resolution
//!
//! Two ways of picking how good a reward is:
//!
//! - [`QualityRollConfig`] - compounding "better roll" on top of a baseline
//!   tier index, used for enemy drops.
//! - [`WeightedQualitySelector`] - level-scaled chances over the fixed
//!   [`QualityTier`] ladder, used for player upgrades.
//!
//! ## Threshold Order
//!
//! The weighted selector builds cumulative thresholds from the top down:
//!
//! ```text
//! Legendary | Epic | Major | Normal | ........ Minor (remainder) ........
//! 0 ------- t1 --- t2 ---- t3 ----- t4 --------------------------------- 1
//! ```
//!
//! Chances are independent tuning values and need not sum to 1. If they
//! overflow, the lower tiers become unreachable; if they underflow, the rest
//! is Minor's share. Existing tuning data relies on exactly this reading.

use serde::{Deserialize, Serialize};
use std::fmt;

use reliquary_shared::lerp;

use crate::error::{EconomyError, EconomyResult};
use crate::quantity::{resolve_quantity, validate_decay, validate_probability};
use crate::random::RandomSource;

/// Reward strength ladder, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum QualityTier {
    /// Gray. Whatever probability mass is left.
    Minor = 0,
    /// White.
    Normal = 1,
    /// Light blue.
    Major = 2,
    /// Purple.
    Epic = 3,
    /// Gold.
    Legendary = 4,
}

impl QualityTier {
    /// Every tier, weakest first.
    pub const ALL: [Self; 5] = [
        Self::Minor,
        Self::Normal,
        Self::Major,
        Self::Epic,
        Self::Legendary,
    ];

    /// Tiers with an explicit chance, in threshold order.
    pub const WEIGHTED: [Self; 4] = [Self::Legendary, Self::Epic, Self::Major, Self::Normal];

    /// Position on the ladder (Minor = 0).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tier at `index`, if any.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Minor),
            1 => Some(Self::Normal),
            2 => Some(Self::Major),
            3 => Some(Self::Epic),
            4 => Some(Self::Legendary),
            _ => None,
        }
    }

    /// Multiplier applied to an upgrade's base value.
    #[inline]
    #[must_use]
    pub const fn value_modifier(self) -> f32 {
        match self {
            Self::Minor => 0.6,
            Self::Normal => 1.0,
            Self::Major => 1.5,
            Self::Epic => 2.0,
            Self::Legendary => 3.0,
        }
    }

    /// Display colour as linear RGB.
    #[inline]
    #[must_use]
    pub const fn color(self) -> [f32; 3] {
        match self {
            Self::Minor => [0.7, 0.7, 0.7],
            Self::Normal => [1.0, 1.0, 1.0],
            Self::Major => [0.0, 0.7, 1.0],
            Self::Epic => [0.6, 0.2, 1.0],
            Self::Legendary => [1.0, 0.8, 0.0],
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Normal => "Normal",
            Self::Major => "Major",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }

    /// How much an upgrade of this tier adds, for descriptions.
    #[must_use]
    pub const fn magnitude_phrase(self) -> &'static str {
        match self {
            Self::Minor => "by a small amount",
            Self::Normal => "by a moderate amount",
            Self::Major => "by a large amount",
            Self::Epic => "by a very large amount",
            Self::Legendary => "by an enormous amount",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Compounding quality roll (enemy drops)
// ============================================================================

/// "Better drop" roll on top of a baseline tier index.
///
/// Each success bumps the tier by one, up to the highest tier the catalog
/// offers for the category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityRollConfig {
    /// Tier index every unit starts from.
    pub baseline_tier: u32,
    /// Chance of one tier better than the baseline.
    pub better_probability: f32,
    /// Divisor applied to the chance after every upgrade.
    pub decay_factor: f32,
}

impl Default for QualityRollConfig {
    fn default() -> Self {
        Self {
            baseline_tier: 0,
            better_probability: 0.0,
            decay_factor: 2.0,
        }
    }
}

impl QualityRollConfig {
    /// Checks the decay factor and probability are usable.
    ///
    /// # Errors
    ///
    /// [`EconomyError::InvalidRollConfig`] for a non-positive decay or a
    /// NaN/negative probability.
    pub fn validate(&self) -> EconomyResult<()> {
        validate_probability("better_probability", self.better_probability)?;
        validate_decay(self.decay_factor)
    }

    /// Clamps the baseline into `0..tier_count` and the probability into
    /// `[0, 1]`. Applied once at load.
    #[must_use]
    pub fn normalized(self, tier_count: usize) -> Self {
        let highest = highest_index(tier_count);
        Self {
            baseline_tier: self.baseline_tier.min(highest),
            better_probability: self.better_probability.clamp(0.0, 1.0),
            decay_factor: self.decay_factor,
        }
    }

    /// Rolls a tier index for a catalog with `tier_count` variants.
    ///
    /// The result is always a valid index (`tier_count == 0` yields 0).
    pub fn resolve<R: RandomSource + ?Sized>(&self, rng: &mut R, tier_count: usize) -> u32 {
        let highest = highest_index(tier_count);
        let tier = resolve_quantity(
            rng,
            self.baseline_tier,
            highest,
            self.better_probability,
            self.decay_factor,
        );
        tier.min(highest)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn highest_index(tier_count: usize) -> u32 {
    tier_count.saturating_sub(1).min(u32::MAX as usize) as u32
}

// ============================================================================
// Level-scaled weighted selection (player upgrades)
// ============================================================================

/// Chance of one tier at level 0 and at the scaling bound.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierChance {
    /// Chance at level 0.
    pub base_chance: f32,
    /// Chance at or past the scaling bound.
    pub max_chance: f32,
}

impl TierChance {
    /// Creates a chance pair.
    #[must_use]
    pub const fn new(base_chance: f32, max_chance: f32) -> Self {
        Self {
            base_chance,
            max_chance,
        }
    }

    /// Interpolated chance for a level factor in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn at(&self, level_factor: f32) -> f32 {
        lerp(self.base_chance, self.max_chance, level_factor)
    }
}

/// Tuning for [`WeightedQualitySelector`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightedQualityConfig {
    /// Level at which every chance reaches its `max_chance`.
    pub max_level_for_scaling: u32,
    /// Normal tier chances.
    pub normal: TierChance,
    /// Major tier chances.
    pub major: TierChance,
    /// Epic tier chances.
    pub epic: TierChance,
    /// Legendary tier chances.
    pub legendary: TierChance,
}

impl Default for WeightedQualityConfig {
    fn default() -> Self {
        Self {
            max_level_for_scaling: 30,
            normal: TierChance::new(0.25, 0.20),
            major: TierChance::new(0.05, 0.35),
            epic: TierChance::new(0.0, 0.25),
            legendary: TierChance::new(0.0, 0.10),
        }
    }
}

impl WeightedQualityConfig {
    /// Chance pair of a weighted tier. Minor has none.
    #[must_use]
    pub const fn chance(&self, tier: QualityTier) -> Option<TierChance> {
        match tier {
            QualityTier::Minor => None,
            QualityTier::Normal => Some(self.normal),
            QualityTier::Major => Some(self.major),
            QualityTier::Epic => Some(self.epic),
            QualityTier::Legendary => Some(self.legendary),
        }
    }

    /// Checks the level bound and that every chance lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// [`EconomyError::InvalidQualityConfig`] describing the first bad value.
    pub fn validate(&self) -> EconomyResult<()> {
        if self.max_level_for_scaling == 0 {
            return Err(EconomyError::InvalidQualityConfig(
                "max_level_for_scaling must be at least 1".to_string(),
            ));
        }
        for tier in QualityTier::WEIGHTED {
            let Some(chance) = self.chance(tier) else {
                continue;
            };
            for (label, value) in [("base_chance", chance.base_chance), ("max_chance", chance.max_chance)] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(EconomyError::InvalidQualityConfig(format!(
                        "{tier} {label} must be within [0, 1], got {value}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Picks an upgrade tier, with better tiers getting likelier as the player
/// levels up.
#[derive(Clone, Debug)]
pub struct WeightedQualitySelector {
    config: WeightedQualityConfig,
}

impl WeightedQualitySelector {
    /// Creates a selector from validated tuning.
    ///
    /// # Errors
    ///
    /// Propagates [`WeightedQualityConfig::validate`].
    pub fn new(config: WeightedQualityConfig) -> EconomyResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The tuning in use.
    #[must_use]
    pub const fn config(&self) -> &WeightedQualityConfig {
        &self.config
    }

    /// Progress toward the scaling bound, clamped to `[0, 1]`.
    #[must_use]
    pub fn level_factor(&self, level: u32) -> f32 {
        (level as f32 / self.config.max_level_for_scaling as f32).clamp(0.0, 1.0)
    }

    /// Interpolated chance of every weighted tier at `level`, in threshold
    /// order.
    #[must_use]
    pub fn chances_at(&self, level: u32) -> [(QualityTier, f32); 4] {
        let factor = self.level_factor(level);
        QualityTier::WEIGHTED.map(|tier| {
            let chance = self.config.chance(tier).map_or(0.0, |c| c.at(factor));
            (tier, chance)
        })
    }

    /// Cumulative thresholds at `level`, in threshold order.
    #[must_use]
    pub fn thresholds_at(&self, level: u32) -> [(QualityTier, f32); 4] {
        let mut cumulative = 0.0;
        self.chances_at(level).map(|(tier, chance)| {
            cumulative += chance;
            (tier, cumulative)
        })
    }

    /// Share of draws that land on Minor at `level`.
    #[must_use]
    pub fn minor_share(&self, level: u32) -> f32 {
        let top = self.thresholds_at(level)[3].1;
        (1.0 - top).max(0.0)
    }

    /// Draws one tier for a player at `level`. Exactly one draw.
    pub fn select<R: RandomSource + ?Sized>(&self, rng: &mut R, level: u32) -> QualityTier {
        let roll = rng.next_unit();
        self.thresholds_at(level)
            .into_iter()
            .find(|&(_, threshold)| roll < threshold)
            .map_or(QualityTier::Minor, |(tier, _)| tier)
    }
}

impl Default for WeightedQualitySelector {
    fn default() -> Self {
        Self {
            config: WeightedQualityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};
    use std::collections::HashMap;

    const SAMPLES: u32 = 10_000;
    const TOLERANCE: f64 = 0.03;

    fn frequencies(selector: &WeightedQualitySelector, level: u32, seed: u64) -> HashMap<QualityTier, f64> {
        let mut rng = SeededRandom::new(seed);
        let mut counts: HashMap<QualityTier, u32> = HashMap::new();
        for _ in 0..SAMPLES {
            *counts.entry(selector.select(&mut rng, level)).or_insert(0) += 1;
        }
        QualityTier::ALL
            .into_iter()
            .map(|tier| {
                let n = counts.get(&tier).copied().unwrap_or(0);
                (tier, f64::from(n) / f64::from(SAMPLES))
            })
            .collect()
    }

    fn assert_close(actual: f64, expected: f32, tier: QualityTier) {
        let expected = f64::from(expected);
        assert!(
            (actual - expected).abs() <= TOLERANCE,
            "{tier}: observed {actual:.4}, configured {expected:.4}"
        );
    }

    #[test]
    fn test_level_zero_uses_base_chances() {
        let selector = WeightedQualitySelector::default();
        let config = *selector.config();
        let freq = frequencies(&selector, 0, 1);

        for tier in QualityTier::WEIGHTED {
            assert_close(freq[&tier], config.chance(tier).unwrap().base_chance, tier);
        }
        assert_close(freq[&QualityTier::Minor], 0.70, QualityTier::Minor);
        // Zero base chance means never, not rarely
        assert_eq!(freq[&QualityTier::Legendary], 0.0);
        assert_eq!(freq[&QualityTier::Epic], 0.0);
    }

    #[test]
    fn test_bound_and_beyond_use_max_chances() {
        let selector = WeightedQualitySelector::default();
        let config = *selector.config();

        for (level, seed) in [(30, 2), (500, 3)] {
            let freq = frequencies(&selector, level, seed);
            for tier in QualityTier::WEIGHTED {
                assert_close(freq[&tier], config.chance(tier).unwrap().max_chance, tier);
            }
            assert_close(freq[&QualityTier::Minor], 0.10, QualityTier::Minor);
        }
    }

    #[test]
    fn test_chances_interpolate() {
        let selector = WeightedQualitySelector::default();
        let chances = selector.chances_at(15);
        // Halfway: legendary 0.05, epic 0.125, major 0.2, normal 0.225
        let expected = [0.05, 0.125, 0.2, 0.225];
        for ((_, got), want) in chances.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "{got} vs {want}");
        }
        assert!((selector.minor_share(15) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_order_is_top_down() {
        let selector = WeightedQualitySelector::default();
        // At the bound: legendary [0, .1), epic [.1, .35), major [.35, .7), normal [.7, .9)
        let mut rng = ScriptedRandom::new(&[0.05, 0.2, 0.5, 0.8, 0.95]);
        let picks: Vec<_> = (0..5).map(|_| selector.select(&mut rng, 30)).collect();
        assert_eq!(
            picks,
            vec![
                QualityTier::Legendary,
                QualityTier::Epic,
                QualityTier::Major,
                QualityTier::Normal,
                QualityTier::Minor,
            ]
        );
        assert_eq!(rng.draws(), 5);
    }

    #[test]
    fn test_overflowing_chances_starve_lower_tiers() {
        let config = WeightedQualityConfig {
            max_level_for_scaling: 10,
            normal: TierChance::new(0.5, 0.5),
            major: TierChance::new(0.5, 0.5),
            epic: TierChance::new(0.6, 0.6),
            legendary: TierChance::new(0.0, 0.0),
        };
        let selector = WeightedQualitySelector::new(config).unwrap();
        let freq = frequencies(&selector, 5, 4);

        assert_eq!(freq[&QualityTier::Normal], 0.0);
        assert_eq!(freq[&QualityTier::Minor], 0.0);
        assert_close(freq[&QualityTier::Epic], 0.6, QualityTier::Epic);
        assert_close(freq[&QualityTier::Major], 0.4, QualityTier::Major);
    }

    #[test]
    fn test_validate_rejects_bad_tuning() {
        let zero_bound = WeightedQualityConfig {
            max_level_for_scaling: 0,
            ..WeightedQualityConfig::default()
        };
        assert!(WeightedQualitySelector::new(zero_bound).is_err());

        let out_of_range = WeightedQualityConfig {
            epic: TierChance::new(0.0, 1.5),
            ..WeightedQualityConfig::default()
        };
        assert!(matches!(
            out_of_range.validate(),
            Err(EconomyError::InvalidQualityConfig(_))
        ));

        let nan = WeightedQualityConfig {
            normal: TierChance::new(f32::NAN, 0.2),
            ..WeightedQualityConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_quality_roll_stays_in_catalog_range() {
        let roll = QualityRollConfig {
            baseline_tier: 1,
            better_probability: 1.0,
            decay_factor: 1.0,
        };
        let mut rng = SeededRandom::new(5);
        assert_eq!(roll.resolve(&mut rng, 3), 2);
        assert_eq!(roll.resolve(&mut rng, 5), 4);

        // Baseline past the catalog is clamped, not an out-of-bounds lookup
        let high = QualityRollConfig {
            baseline_tier: 9,
            ..roll
        };
        assert_eq!(high.resolve(&mut rng, 3), 2);
        assert_eq!(high.normalized(3).baseline_tier, 2);
    }

    #[test]
    fn test_quality_roll_baseline_without_luck() {
        let roll = QualityRollConfig::default();
        let mut rng = SeededRandom::new(6);
        for _ in 0..100 {
            assert_eq!(roll.resolve(&mut rng, 3), 0);
        }
    }

    #[test]
    fn test_normalized_clamps_probability() {
        let roll = QualityRollConfig {
            baseline_tier: 0,
            better_probability: 4.0,
            decay_factor: 2.0,
        };
        assert_eq!(roll.normalized(3).better_probability, 1.0);
    }

    #[test]
    fn test_tier_tables_are_total() {
        for (i, tier) in QualityTier::ALL.into_iter().enumerate() {
            assert_eq!(tier.index(), i);
            assert_eq!(QualityTier::from_index(i), Some(tier));
            assert!(tier.value_modifier() > 0.0);
        }
        assert_eq!(QualityTier::from_index(5), None);
        assert_eq!(QualityTier::Legendary.to_string(), "Legendary");
    }
}
