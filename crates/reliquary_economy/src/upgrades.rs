//! # Upgrade Catalog
//!
//! Stat upgrades offered on level-up. Every stat gets one entry per
//! [`QualityTier`]; special upgrades skip the quality system entirely.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::quality::{QualityTier, WeightedQualitySelector};
use crate::random::RandomSource;

/// Stat an upgrade raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Maximum (and current) health.
    MaxHealth,
    /// Movement speed.
    Speed,
    /// Outgoing damage.
    Strength,
    /// Damage reduction.
    Defense,
    /// Jump force.
    JumpForce,
    /// Radius for collecting common pickups.
    CommonPickupRange,
}

impl UpgradeKind {
    /// Every kind, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::MaxHealth,
        Self::Speed,
        Self::Strength,
        Self::Defense,
        Self::JumpForce,
        Self::CommonPickupRange,
    ];

    /// Name and base description of the generated upgrade line.
    #[must_use]
    pub const fn template(self) -> (&'static str, &'static str) {
        match self {
            Self::MaxHealth => ("Health Boost", "Increases maximum health"),
            Self::Speed => ("Speed Increase", "Increases movement speed"),
            Self::Strength => ("Strength Training", "Increases strength"),
            Self::Defense => ("Defensive Stance", "Increases defense"),
            Self::JumpForce => ("Jump Enhancement", "Increases jump force"),
            Self::CommonPickupRange => ("Magnet Upgrade", "Increases pickup range"),
        }
    }
}

/// Base value of each generated upgrade line, before quality scaling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeBaseValues {
    /// Health added by a Normal health upgrade.
    pub max_health: f32,
    /// Speed added by a Normal speed upgrade.
    pub speed: f32,
    /// Strength added by a Normal strength upgrade.
    pub strength: f32,
    /// Defense added by a Normal defense upgrade.
    pub defense: f32,
    /// Jump force added by a Normal jump upgrade.
    pub jump_force: f32,
    /// Pickup radius added by a Normal magnet upgrade.
    pub pickup_range: f32,
}

impl Default for UpgradeBaseValues {
    fn default() -> Self {
        Self {
            max_health: 20.0,
            speed: 1.0,
            strength: 5.0,
            defense: 3.0,
            jump_force: 5.0,
            pickup_range: 1.0,
        }
    }
}

impl UpgradeBaseValues {
    /// Base value for `kind`.
    #[must_use]
    pub const fn for_kind(&self, kind: UpgradeKind) -> f32 {
        match kind {
            UpgradeKind::MaxHealth => self.max_health,
            UpgradeKind::Speed => self.speed,
            UpgradeKind::Strength => self.strength,
            UpgradeKind::Defense => self.defense,
            UpgradeKind::JumpForce => self.jump_force,
            UpgradeKind::CommonPickupRange => self.pickup_range,
        }
    }
}

/// One offerable upgrade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    /// Name without the quality prefix.
    pub name: String,
    /// Player-facing description.
    pub description: String,
    /// Stat it raises.
    pub kind: UpgradeKind,
    /// Tier, or `None` for special upgrades outside the quality system.
    pub quality: Option<QualityTier>,
    /// Base amount, before the quality modifier.
    pub value: f32,
}

impl Upgrade {
    /// `"Epic Health Boost"`, or just the name for special upgrades.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.quality {
            Some(tier) => format!("{tier} {}", self.name),
            None => self.name.clone(),
        }
    }

    /// Quality multiplier (1.0 for special upgrades).
    #[must_use]
    pub fn quality_modifier(&self) -> f32 {
        self.quality.map_or(1.0, QualityTier::value_modifier)
    }

    /// Amount actually applied to the stat.
    #[must_use]
    pub fn adjusted_value(&self) -> f32 {
        self.value * self.quality_modifier()
    }

    /// Display colour (white for special upgrades).
    #[must_use]
    pub fn quality_color(&self) -> [f32; 3] {
        self.quality.unwrap_or(QualityTier::Normal).color()
    }
}

impl fmt::Display for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{})", self.display_name(), self.adjusted_value())
    }
}

/// All upgrades the game can offer.
#[derive(Clone, Debug, Default)]
pub struct UpgradeCatalog {
    upgrades: Vec<Upgrade>,
}

impl UpgradeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stat line in every quality tier.
    #[must_use]
    pub fn with_defaults(base: &UpgradeBaseValues) -> Self {
        let mut catalog = Self::new();
        for kind in UpgradeKind::ALL {
            let (name, description) = kind.template();
            catalog.add_with_all_qualities(name, description, kind, base.for_kind(kind));
        }
        catalog
    }

    /// Adds one entry per quality tier for a stat line.
    pub fn add_with_all_qualities(&mut self, name: &str, base_description: &str, kind: UpgradeKind, value: f32) {
        for tier in QualityTier::ALL {
            self.upgrades.push(Upgrade {
                name: name.to_string(),
                description: format!("{base_description} {}", tier.magnitude_phrase()),
                kind,
                quality: Some(tier),
                value,
            });
        }
    }

    /// Adds an upgrade outside the quality system.
    pub fn add_special(&mut self, name: &str, description: &str, kind: UpgradeKind, value: f32) {
        self.upgrades.push(Upgrade {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            quality: None,
            value,
        });
    }

    /// Every upgrade, in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Upgrade] {
        &self.upgrades
    }

    /// Number of upgrades.
    #[must_use]
    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    /// True if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }

    /// Upgrades raising `kind`.
    pub fn by_kind(&self, kind: UpgradeKind) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.iter().filter(move |u| u.kind == kind)
    }

    /// Upgrades of tier `quality`.
    pub fn by_quality(&self, quality: QualityTier) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.iter().filter(move |u| u.quality == Some(quality))
    }

    /// Up to `count` distinct upgrades, uniformly at random.
    pub fn random_upgrades<R: RandomSource + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<&Upgrade> {
        let mut available: Vec<&Upgrade> = self.upgrades.iter().collect();
        let picks = count.min(available.len());
        let mut selected = Vec::with_capacity(picks);
        for _ in 0..picks {
            let index = rng.index(available.len());
            selected.push(available.swap_remove(index));
        }
        selected
    }

    /// `count` upgrades whose tiers follow the level-scaled weights.
    ///
    /// Per pick: one draw for the tier, one for the upgrade within it. A
    /// tier with no entries falls back to a uniform pick over the whole
    /// catalog. Picks may repeat.
    pub fn random_upgrades_weighted<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        selector: &WeightedQualitySelector,
        count: usize,
        level: u32,
    ) -> Vec<&Upgrade> {
        if self.upgrades.is_empty() {
            return Vec::new();
        }

        let mut selected = Vec::with_capacity(count);
        for _ in 0..count {
            let tier = selector.select(rng, level);
            let candidates: Vec<&Upgrade> = self.by_quality(tier).collect();
            let pick = if candidates.is_empty() {
                tracing::debug!(tier = %tier, "no upgrades in tier, falling back to whole catalog");
                &self.upgrades[rng.index(self.upgrades.len())]
            } else {
                candidates[rng.index(candidates.len())]
            };
            selected.push(pick);
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::{TierChance, WeightedQualityConfig};
    use crate::random::{ScriptedRandom, SeededRandom};
    use std::collections::HashSet;

    #[test]
    fn test_defaults_cover_every_stat_and_tier() {
        let catalog = UpgradeCatalog::with_defaults(&UpgradeBaseValues::default());
        assert_eq!(catalog.len(), 30);
        for kind in UpgradeKind::ALL {
            assert_eq!(catalog.by_kind(kind).count(), 5);
        }
        for tier in QualityTier::ALL {
            assert_eq!(catalog.by_quality(tier).count(), 6);
        }
    }

    #[test]
    fn test_upgrade_presentation() {
        let catalog = UpgradeCatalog::with_defaults(&UpgradeBaseValues::default());
        let epic_health = catalog
            .by_kind(UpgradeKind::MaxHealth)
            .find(|u| u.quality == Some(QualityTier::Epic))
            .unwrap();

        assert_eq!(epic_health.display_name(), "Epic Health Boost");
        assert_eq!(epic_health.description, "Increases maximum health by a very large amount");
        assert!((epic_health.adjusted_value() - 40.0).abs() < f32::EPSILON);
        assert_eq!(epic_health.quality_color(), [0.6, 0.2, 1.0]);
    }

    #[test]
    fn test_special_upgrades_skip_quality() {
        let mut catalog = UpgradeCatalog::new();
        catalog.add_special("Featherfall", "Slows your descent", UpgradeKind::JumpForce, 2.5);
        let special = &catalog.all()[0];

        assert_eq!(special.display_name(), "Featherfall");
        assert_eq!(special.quality_modifier(), 1.0);
        assert_eq!(special.adjusted_value(), 2.5);
        assert_eq!(catalog.by_quality(QualityTier::Normal).count(), 0);
    }

    #[test]
    fn test_random_upgrades_are_distinct() {
        let catalog = UpgradeCatalog::with_defaults(&UpgradeBaseValues::default());
        let mut rng = SeededRandom::new(21);
        for _ in 0..50 {
            let picks = catalog.random_upgrades(&mut rng, 3);
            assert_eq!(picks.len(), 3);
            let names: HashSet<String> = picks.iter().map(|u| u.display_name()).collect();
            assert_eq!(names.len(), 3);
        }
        // Asking for more than exists returns everything once
        assert_eq!(catalog.random_upgrades(&mut rng, 100).len(), 30);
    }

    #[test]
    fn test_weighted_picks_follow_selected_tier() {
        let catalog = UpgradeCatalog::with_defaults(&UpgradeBaseValues::default());
        let selector = WeightedQualitySelector::default();
        // Tier draw 0.05 at the bound is Legendary; second draw picks within it
        let mut rng = ScriptedRandom::new(&[0.05, 0.0]);
        let picks = catalog.random_upgrades_weighted(&mut rng, &selector, 1, 30);

        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].quality, Some(QualityTier::Legendary));
        assert_eq!(picks[0].kind, UpgradeKind::MaxHealth);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_weighted_falls_back_when_tier_is_empty() {
        let mut catalog = UpgradeCatalog::new();
        catalog.add_special("Featherfall", "Slows your descent", UpgradeKind::JumpForce, 2.5);
        catalog.add_special("Long Arms", "Grab from further away", UpgradeKind::CommonPickupRange, 1.0);

        // Every draw lands on Legendary, which has no entries here
        let config = WeightedQualityConfig {
            legendary: TierChance::new(1.0, 1.0),
            ..WeightedQualityConfig::default()
        };
        let selector = WeightedQualitySelector::new(config).unwrap();
        let mut rng = ScriptedRandom::new(&[0.5, 0.75]);
        let picks = catalog.random_upgrades_weighted(&mut rng, &selector, 1, 0);

        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].name, "Long Arms");
    }

    #[test]
    fn test_empty_catalog_offers_nothing() {
        let catalog = UpgradeCatalog::new();
        let mut rng = ScriptedRandom::new(&[]);
        let selector = WeightedQualitySelector::default();
        assert!(catalog.random_upgrades(&mut rng, 3).is_empty());
        assert!(catalog.random_upgrades_weighted(&mut rng, &selector, 3, 10).is_empty());
        assert_eq!(rng.draws(), 0);
    }
}
