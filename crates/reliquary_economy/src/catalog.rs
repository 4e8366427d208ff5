//! # Reward Catalog
//!
//! Maps `(category, tier index)` to the prototype that gets spawned and the
//! effect it grants on pickup. Tier indices are positions in a category's
//! variant list, weakest first (`exp-small`, `exp-medium`, `exp-big`).

use reliquary_core::PrototypeKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{EconomyError, EconomyResult};

/// Player stat a pickup modifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardStat {
    /// Heals (or hurts, if negative) the player.
    CurrentHealth,
    /// Experience towards the next level.
    Experience,
}

impl fmt::Display for RewardStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CurrentHealth => "current_health",
            Self::Experience => "experience",
        })
    }
}

/// What a pickup does when collected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardEffect {
    /// Stat to modify.
    pub stat: RewardStat,
    /// Amount added to the stat.
    pub amount: f32,
}

impl RewardEffect {
    /// Creates an effect.
    #[must_use]
    pub const fn new(stat: RewardStat, amount: f32) -> Self {
        Self { stat, amount }
    }
}

/// One tier of a reward category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardVariant {
    /// Prototype to spawn.
    pub key: PrototypeKey,
    /// Effect granted on pickup.
    pub effect: RewardEffect,
}

impl RewardVariant {
    /// Creates a variant.
    #[must_use]
    pub fn new(key: &str, stat: RewardStat, amount: f32) -> Self {
        Self {
            key: PrototypeKey::new(key),
            effect: RewardEffect::new(stat, amount),
        }
    }
}

/// Spawnable variants per reward category.
#[derive(Clone, Debug, Default)]
pub struct RewardCatalog {
    categories: HashMap<String, Vec<RewardVariant>>,
}

impl RewardCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `variants` (weakest first) under `category`.
    ///
    /// # Errors
    ///
    /// - [`EconomyError::EmptyCategory`] if there are no variants or one of
    ///   them is a blank key.
    /// - [`EconomyError::InvalidRollConfig`] if an effect amount is not
    ///   finite.
    /// - [`EconomyError::DuplicateCategory`] if the name is taken.
    pub fn insert(&mut self, category: &str, variants: Vec<RewardVariant>) -> EconomyResult<()> {
        if variants.is_empty() || variants.iter().any(|v| v.key.is_empty()) {
            return Err(EconomyError::EmptyCategory(category.to_string()));
        }
        if let Some(bad) = variants.iter().find(|v| !v.effect.amount.is_finite()) {
            return Err(EconomyError::InvalidRollConfig(format!(
                "{} grants a non-finite {} amount",
                bad.key, bad.effect.stat
            )));
        }
        if self.categories.contains_key(category) {
            return Err(EconomyError::DuplicateCategory(category.to_string()));
        }
        self.categories.insert(category.to_string(), variants);
        Ok(())
    }

    /// Variants of `category`, weakest first.
    #[must_use]
    pub fn variants(&self, category: &str) -> Option<&[RewardVariant]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Number of tiers `category` offers (0 if unknown).
    #[must_use]
    pub fn tier_count(&self, category: &str) -> usize {
        self.categories.get(category).map_or(0, Vec::len)
    }

    /// Variant for `tier`, clamped into the category's range.
    ///
    /// Returns `None` only for an unknown category.
    #[must_use]
    pub fn lookup(&self, category: &str, tier: u32) -> Option<&RewardVariant> {
        let variants = self.categories.get(category)?;
        let index = usize::try_from(tier).unwrap_or(usize::MAX).min(variants.len() - 1);
        variants.get(index)
    }

    /// True if `category` is registered.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True if no category is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience() -> Vec<RewardVariant> {
        vec![
            RewardVariant::new("exp-small", RewardStat::Experience, 1.0),
            RewardVariant::new("exp-medium", RewardStat::Experience, 5.0),
            RewardVariant::new("exp-big", RewardStat::Experience, 10.0),
        ]
    }

    #[test]
    fn test_lookup_clamps_tier() {
        let mut catalog = RewardCatalog::new();
        catalog.insert("experience", experience()).unwrap();

        assert_eq!(catalog.lookup("experience", 0).unwrap().key.as_str(), "exp-small");
        assert_eq!(catalog.lookup("experience", 2).unwrap().key.as_str(), "exp-big");
        assert_eq!(catalog.lookup("experience", 40).unwrap().key.as_str(), "exp-big");
        assert_eq!(catalog.tier_count("experience"), 3);
        assert!(catalog.lookup("gold", 0).is_none());
    }

    #[test]
    fn test_lookup_returns_effect() {
        let mut catalog = RewardCatalog::new();
        catalog.insert("experience", experience()).unwrap();
        catalog
            .insert(
                "health",
                vec![RewardVariant::new("health-small", RewardStat::CurrentHealth, 10.0)],
            )
            .unwrap();

        let medium = catalog.lookup("experience", 1).unwrap();
        assert_eq!(medium.effect, RewardEffect::new(RewardStat::Experience, 5.0));

        let heal = catalog.lookup("health", 3).unwrap();
        assert_eq!(heal.effect.stat, RewardStat::CurrentHealth);
        assert_eq!(heal.effect.amount, 10.0);
    }

    #[test]
    fn test_insert_rejects_empty_and_duplicates() {
        let mut catalog = RewardCatalog::new();
        assert_eq!(
            catalog.insert("health", Vec::new()),
            Err(EconomyError::EmptyCategory("health".to_string()))
        );
        assert!(catalog
            .insert(
                "health",
                vec![
                    RewardVariant::new("health-small", RewardStat::CurrentHealth, 10.0),
                    RewardVariant::new("", RewardStat::CurrentHealth, 25.0),
                ],
            )
            .is_err());
        assert!(matches!(
            catalog.insert(
                "health",
                vec![RewardVariant::new("health-nan", RewardStat::CurrentHealth, f32::NAN)],
            ),
            Err(EconomyError::InvalidRollConfig(_))
        ));

        catalog
            .insert(
                "health",
                vec![RewardVariant::new("health-small", RewardStat::CurrentHealth, 10.0)],
            )
            .unwrap();
        assert_eq!(
            catalog.insert(
                "health",
                vec![RewardVariant::new("health-big", RewardStat::CurrentHealth, 50.0)],
            ),
            Err(EconomyError::DuplicateCategory("health".to_string()))
        );
        assert_eq!(catalog.len(), 1);
    }
}
