//! # Reward Generator
//!
//! Turns a triggering event into spawned rewards:
//!
//! ```text
//! event -> per category: quantity roll -> quality roll per unit
//!       -> catalog lookup -> registry.acquire -> burst impulse
//! ```
//!
//! The generator is immutable after construction. Every event is a pure
//! function of the config, the random stream and the registry it is given.

use reliquary_core::{PoolRegistry, PrototypeKey, SpawnHost};
use reliquary_shared::{Quaternion, Vec3};
use serde::{Deserialize, Serialize};

use crate::catalog::{RewardCatalog, RewardEffect};
use crate::config::{CategoryConfig, RewardConfig};
use crate::error::{EconomyError, EconomyResult};
use crate::quality::{QualityRollConfig, WeightedQualitySelector};
use crate::quantity::DropConfig;
use crate::random::RandomSource;
use crate::upgrades::{Upgrade, UpgradeCatalog};

/// Outward impulse given to every dropped unit.
///
/// Each axis is drawn uniformly between `lower` and `upper`, the result is
/// normalized and scaled by `force`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Impulse magnitude.
    pub force: f32,
    /// Per-axis lower bound of the direction.
    pub lower: Vec3,
    /// Per-axis upper bound of the direction.
    pub upper: Vec3,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            force: 1.0,
            lower: Vec3::new(-1.0, 1.0, 1.0),
            upper: Vec3::new(1.0, 3.0, 1.0),
        }
    }
}

impl BurstConfig {
    /// Checks the bounds are finite and ordered and the force is usable.
    ///
    /// # Errors
    ///
    /// [`EconomyError::InvalidBurstConfig`] describing the first problem.
    pub fn validate(&self) -> EconomyResult<()> {
        if !self.force.is_finite() || self.force < 0.0 {
            return Err(EconomyError::InvalidBurstConfig(format!(
                "force must be a non-negative finite number, got {}",
                self.force
            )));
        }
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(EconomyError::InvalidBurstConfig(
                "direction bounds must be finite".to_string(),
            ));
        }
        let lower = self.lower.to_array();
        let upper = self.upper.to_array();
        for (axis, (lo, hi)) in ["x", "y", "z"].iter().zip(lower.iter().zip(upper.iter())) {
            if lo > hi {
                return Err(EconomyError::InvalidBurstConfig(format!(
                    "lower.{axis} ({lo}) exceeds upper.{axis} ({hi})"
                )));
            }
        }
        Ok(())
    }

    /// Draws one impulse. Always consumes exactly three draws (x, y, z).
    ///
    /// A direction that degenerates to zero yields [`Vec3::ZERO`].
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let x = rng.range(self.lower.x, self.upper.x);
        let y = rng.range(self.lower.y, self.upper.y);
        let z = rng.range(self.lower.z, self.upper.z);
        Vec3::new(x, y, z).normalized() * self.force
    }
}

/// One resolved unit before anything is spawned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannedDrop<'a> {
    /// Category the unit belongs to.
    pub category: &'a str,
    /// Resolved tier index into the category's variants.
    pub tier: u32,
    /// Prototype to spawn.
    pub key: &'a PrototypeKey,
    /// Effect the unit grants on pickup.
    pub effect: RewardEffect,
}

/// One unit that was spawned for an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnedReward<'a, H> {
    /// Category the unit belongs to.
    pub category: &'a str,
    /// Resolved tier index.
    pub tier: u32,
    /// Prototype that was spawned.
    pub key: &'a PrototypeKey,
    /// Effect the unit grants on pickup.
    pub effect: RewardEffect,
    /// Host handle of the instance.
    pub handle: H,
    /// Impulse applied (zero if none was applied).
    pub impulse: Vec3,
}

#[derive(Clone, Debug)]
struct CategoryRoll {
    name: String,
    drop: DropConfig,
    quality: QualityRollConfig,
}

/// Coordinates the resolvers, the catalog and the pool registry.
#[derive(Clone, Debug)]
pub struct RewardGenerator {
    rolls: Vec<CategoryRoll>,
    catalog: RewardCatalog,
    burst: BurstConfig,
    upgrades: UpgradeCatalog,
    upgrade_selector: Option<WeightedQualitySelector>,
    options_per_level: usize,
    disabled: Vec<EconomyError>,
}

impl Default for RewardGenerator {
    fn default() -> Self {
        Self::from_config(&RewardConfig::default())
    }
}

impl RewardGenerator {
    /// Builds a generator from tuning.
    ///
    /// Never fails. Rejected categories are dropped, a rejected burst falls
    /// back to the default burst and rejected upgrade weights fall back to
    /// uniform offers. Every rejection is logged and kept in
    /// [`disabled`](Self::disabled).
    #[must_use]
    pub fn from_config(config: &RewardConfig) -> Self {
        let mut catalog = RewardCatalog::new();
        let mut rolls = Vec::with_capacity(config.categories.len());
        let mut disabled = Vec::new();

        for category in &config.categories {
            match admit(&mut catalog, category) {
                Ok(roll) => rolls.push(roll),
                Err(err) => {
                    tracing::warn!(category = %category.name, error = %err, "reward category disabled");
                    disabled.push(EconomyError::CategoryDisabled {
                        category: category.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let burst = match config.burst.validate() {
            Ok(()) => config.burst,
            Err(err) => {
                tracing::warn!(error = %err, "burst rejected, using default");
                disabled.push(err);
                BurstConfig::default()
            }
        };

        let upgrade_selector = if config.upgrades.weighted {
            match WeightedQualitySelector::new(config.upgrades.quality) {
                Ok(selector) => Some(selector),
                Err(err) => {
                    tracing::warn!(error = %err, "upgrade weights rejected, offers will be uniform");
                    disabled.push(err);
                    None
                }
            }
        } else {
            None
        };

        tracing::info!(
            categories = rolls.len(),
            disabled = disabled.len(),
            "reward generator ready"
        );

        Self {
            rolls,
            catalog,
            burst,
            upgrades: UpgradeCatalog::with_defaults(&config.upgrades.base_values),
            upgrade_selector,
            options_per_level: config.upgrades.options_per_level,
            disabled,
        }
    }

    /// Replaces the upgrade catalog (e.g. to add special upgrades).
    #[must_use]
    pub fn with_upgrade_catalog(mut self, upgrades: UpgradeCatalog) -> Self {
        self.upgrades = upgrades;
        self
    }

    /// Everything rejected at load time.
    #[must_use]
    pub fn disabled(&self) -> &[EconomyError] {
        &self.disabled
    }

    /// Enabled category names, in roll order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rolls.iter().map(|r| r.name.as_str())
    }

    /// Catalog of enabled categories.
    #[must_use]
    pub fn catalog(&self) -> &RewardCatalog {
        &self.catalog
    }

    /// Burst in effect.
    #[must_use]
    pub fn burst(&self) -> &BurstConfig {
        &self.burst
    }

    /// Upgrade catalog used for level-up offers.
    #[must_use]
    pub fn upgrade_catalog(&self) -> &UpgradeCatalog {
        &self.upgrades
    }

    /// Resolves what an event would drop without spawning anything.
    ///
    /// Consumes the same quantity and quality draws as
    /// [`on_event`](Self::on_event) but no burst draws, so the two do not
    /// stay in step on a shared stream.
    pub fn plan<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<PlannedDrop<'_>> {
        let mut planned = Vec::new();
        for roll in &self.rolls {
            self.plan_category(roll, rng, &mut planned);
        }
        planned
    }

    /// Spawns the rewards for one event at `position`.
    ///
    /// Categories are processed in configured order. Within a category all
    /// units are rolled first, then each is acquired and pushed.
    pub fn on_event<S, R>(
        &self,
        host: &mut S,
        registry: &mut PoolRegistry<S::Handle>,
        rng: &mut R,
        position: Vec3,
    ) -> Vec<SpawnedReward<'_, S::Handle>>
    where
        S: SpawnHost + ?Sized,
        R: RandomSource + ?Sized,
    {
        let mut spawned = Vec::new();
        let mut planned = Vec::new();

        for roll in &self.rolls {
            planned.clear();
            self.plan_category(roll, rng, &mut planned);

            for drop in &planned {
                let handle = registry.acquire(host, drop.key, position, Quaternion::IDENTITY);
                let impulse = self.burst.sample(rng);
                if impulse != Vec3::ZERO {
                    host.apply_impulse(handle, impulse);
                }
                spawned.push(SpawnedReward {
                    category: drop.category,
                    tier: drop.tier,
                    key: drop.key,
                    effect: drop.effect,
                    handle,
                    impulse,
                });
            }
        }

        tracing::debug!(spawned = spawned.len(), "reward event resolved");
        spawned
    }

    /// Upgrades offered on level-up.
    ///
    /// Weighted by `level` when upgrade weights are configured, otherwise
    /// distinct uniform picks.
    pub fn offer_upgrades<R: RandomSource + ?Sized>(&self, rng: &mut R, level: u32) -> Vec<&Upgrade> {
        match &self.upgrade_selector {
            Some(selector) => {
                self.upgrades
                    .random_upgrades_weighted(rng, selector, self.options_per_level, level)
            }
            None => self.upgrades.random_upgrades(rng, self.options_per_level),
        }
    }

    fn plan_category<'a, R: RandomSource + ?Sized>(
        &'a self,
        roll: &'a CategoryRoll,
        rng: &mut R,
        out: &mut Vec<PlannedDrop<'a>>,
    ) {
        let tier_count = self.catalog.tier_count(&roll.name);
        let count = roll.drop.resolve(rng);

        let start = out.len();
        for _ in 0..count {
            let tier = roll.quality.resolve(rng, tier_count);
            let Some(variant) = self.catalog.lookup(&roll.name, tier) else {
                continue;
            };
            out.push(PlannedDrop {
                category: &roll.name,
                tier,
                key: &variant.key,
                effect: variant.effect,
            });
        }
        debug_assert_eq!(out.len() - start, count as usize);
    }
}

fn admit(catalog: &mut RewardCatalog, category: &CategoryConfig) -> EconomyResult<CategoryRoll> {
    category.drop.validate()?;
    category.quality.validate()?;
    catalog.insert(&category.name, category.variants.clone())?;
    Ok(CategoryRoll {
        name: category.name.clone(),
        drop: category.drop,
        quality: category.quality.normalized(category.variants.len()),
    })
}
