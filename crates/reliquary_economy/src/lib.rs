//! # RELIQUARY Economy
//!
//! Decides what drops when something happens: how many units, how good
//! each one is, and which pooled prototype represents it.
//!
//! ## Design Principles
//!
//! 1. **Injected randomness** - every draw comes from a [`RandomSource`],
//!    in a fixed order, so a seeded stream replays an event exactly
//! 2. **Stateless events** - the [`RewardGenerator`] is immutable after
//!    load; an event only touches the registry and the host
//! 3. **External configuration** - all tuning lives in TOML and is validated
//!    once at load; a bad category is disabled, not fatal
//!
//! ## Example
//!
//! ```rust,ignore
//! use reliquary_core::PoolRegistry;
//! use reliquary_economy::{RewardConfig, RewardGenerator, SeededRandom};
//!
//! let config = RewardConfig::from_toml_file("data/rewards.toml")?;
//! let rewards = RewardGenerator::from_config(&config);
//! let mut registry = PoolRegistry::new();
//! let mut rng = SeededRandom::new(run_seed);
//!
//! // Enemy died
//! rewards.on_event(&mut host, &mut registry, &mut rng, enemy_position);
//!
//! // Player levelled up
//! let offers = rewards.offer_upgrades(&mut rng, player_level);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod quality;
pub mod quantity;
pub mod random;
pub mod upgrades;

pub use catalog::{RewardCatalog, RewardEffect, RewardStat, RewardVariant};
pub use config::{CategoryConfig, RewardConfig, UpgradeConfig};
pub use error::{EconomyError, EconomyResult};
pub use generator::{BurstConfig, PlannedDrop, RewardGenerator, SpawnedReward};
pub use quality::{
    QualityRollConfig, QualityTier, TierChance, WeightedQualityConfig, WeightedQualitySelector,
};
pub use quantity::{expected_roll, resolve_quantity, DropConfig};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use upgrades::{Upgrade, UpgradeBaseValues, UpgradeCatalog, UpgradeKind};
