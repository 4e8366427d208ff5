//! # Reward Tuning
//!
//! Everything the reward system reads at startup, as one TOML document:
//!
//! ```toml
//! [[categories]]
//! name = "experience"
//! variants = [
//!     { key = "exp-small", effect = { stat = "experience", amount = 1.0 } },
//!     { key = "exp-big", effect = { stat = "experience", amount = 10.0 } },
//! ]
//! drop = { min_count = 3, max_count = 3, initial_probability = 1.0, decay_factor = 2.0 }
//! quality = { baseline_tier = 0, better_probability = 0.0, decay_factor = 2.0 }
//!
//! [burst]
//! force = 1.0
//!
//! [upgrades]
//! options_per_level = 3
//! ```
//!
//! Missing sections fall back to the shipped defaults. Parsing only checks
//! shape; numeric validation happens when the
//! [`RewardGenerator`](crate::RewardGenerator) is built, so one bad category
//! does not take the others down.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::{RewardStat, RewardVariant};
use crate::error::{EconomyError, EconomyResult};
use crate::generator::BurstConfig;
use crate::quality::{QualityRollConfig, WeightedQualityConfig};
use crate::quantity::DropConfig;
use crate::upgrades::UpgradeBaseValues;

/// One reward category (experience, health, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Unique category name.
    pub name: String,
    /// Prototype and pickup effect per quality tier, weakest first.
    pub variants: Vec<RewardVariant>,
    /// How many units drop.
    pub drop: DropConfig,
    /// How good each unit is.
    #[serde(default)]
    pub quality: QualityRollConfig,
}

impl CategoryConfig {
    /// Category whose variants all modify `stat`, with the default quality
    /// roll. `variants` are `(prototype, amount)` pairs, weakest first.
    #[must_use]
    pub fn new(name: &str, stat: RewardStat, variants: &[(&str, f32)], drop: DropConfig) -> Self {
        Self {
            name: name.to_string(),
            variants: variants
                .iter()
                .map(|&(key, amount)| RewardVariant::new(key, stat, amount))
                .collect(),
            drop,
            quality: QualityRollConfig::default(),
        }
    }
}

/// Level-up upgrade offers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeConfig {
    /// Upgrades shown per level-up.
    pub options_per_level: usize,
    /// Use level-scaled tier weights; otherwise pick uniformly.
    pub weighted: bool,
    /// Tier chances and the level bound.
    pub quality: WeightedQualityConfig,
    /// Base values for the generated upgrade lines.
    pub base_values: UpgradeBaseValues,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            options_per_level: 3,
            weighted: true,
            quality: WeightedQualityConfig::default(),
            base_values: UpgradeBaseValues::default(),
        }
    }
}

/// Complete reward tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Drop categories, rolled in this order on every event.
    pub categories: Vec<CategoryConfig>,
    /// Drop scatter impulse.
    pub burst: BurstConfig,
    /// Level-up offers.
    pub upgrades: UpgradeConfig,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryConfig::new(
                    "experience",
                    RewardStat::Experience,
                    &[("exp-small", 1.0), ("exp-medium", 5.0), ("exp-big", 10.0)],
                    DropConfig::new(3, 3, 1.0, 2.0),
                ),
                CategoryConfig::new(
                    "health",
                    RewardStat::CurrentHealth,
                    &[("health-small", 10.0), ("health-medium", 25.0), ("health-big", 50.0)],
                    DropConfig::new(0, 3, 0.5, 2.0),
                ),
            ],
            burst: BurstConfig::default(),
            upgrades: UpgradeConfig::default(),
        }
    }
}

impl RewardConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// [`EconomyError::InvalidConfig`] if the document is malformed.
    pub fn from_toml_str(source: &str) -> EconomyResult<Self> {
        toml::from_str(source).map_err(|e| EconomyError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// [`EconomyError::ConfigIo`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_toml_file(path: impl AsRef<Path>) -> EconomyResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| EconomyError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(
            path = %path.display(),
            categories = config.categories.len(),
            "reward tuning loaded"
        );
        Ok(config)
    }

    /// Serializes back to TOML, e.g. to dump the defaults as a template.
    ///
    /// # Errors
    ///
    /// [`EconomyError::InvalidConfig`] if a value cannot be represented
    /// (non-finite floats).
    pub fn to_toml_string(&self) -> EconomyResult<String> {
        toml::to_string(self).map_err(|e| EconomyError::InvalidConfig(e.to_string()))
    }

    /// Category by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.name == name)
    }
}
