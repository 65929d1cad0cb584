//! Rarity tiers and the weighted rarity roll.
//!
//! The distribution is recomputed on every roll from the rarity-boost
//! upgrade level and the active event, then cached on the state so the
//! presentation layer can display the current chances.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_RARITY_COMMON, BASE_RARITY_EPIC, BASE_RARITY_LEGENDARY, BASE_RARITY_RARE,
    LUCK_RARITY_FACTOR, RARITY_BOOST_COMMON_SHIFT, RARITY_BOOST_PER_LEVEL, RARITY_COMMON_FLOOR,
};
use crate::events::EventKind;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RarityTier {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl RarityTier {
    /// All tiers in roll order. The cumulative walk in [`resolve_rarity`]
    /// depends on this ordering.
    pub const ALL: [RarityTier; 4] = [
        RarityTier::Common,
        RarityTier::Rare,
        RarityTier::Epic,
        RarityTier::Legendary,
    ];

    /// Display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
            RarityTier::Legendary => "Legendary",
        }
    }

    /// Inclusive value range for a gain of this tier, before mutation.
    pub fn value_range(&self) -> (u64, u64) {
        match self {
            RarityTier::Common => (1, 5),
            RarityTier::Rare => (10, 25),
            RarityTier::Epic => (50, 100),
            RarityTier::Legendary => (200, 500),
        }
    }
}

/// A probability distribution over the four rarity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityChances {
    pub common: f64,
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
}

impl RarityChances {
    /// The unboosted base distribution.
    pub fn base() -> Self {
        Self {
            common: BASE_RARITY_COMMON,
            rare: BASE_RARITY_RARE,
            epic: BASE_RARITY_EPIC,
            legendary: BASE_RARITY_LEGENDARY,
        }
    }

    pub fn get(&self, tier: RarityTier) -> f64 {
        match tier {
            RarityTier::Common => self.common,
            RarityTier::Rare => self.rare,
            RarityTier::Epic => self.epic,
            RarityTier::Legendary => self.legendary,
        }
    }

    pub fn sum(&self) -> f64 {
        self.common + self.rare + self.epic + self.legendary
    }
}

impl Default for RarityChances {
    fn default() -> Self {
        Self::base()
    }
}

/// Computes the adjusted distribution for the current boost level and
/// active event.
///
/// Common is pushed down by the boost but never below the 0.4 floor; the
/// freed probability mass is split across rare/epic/legendary preserving
/// their base proportions.
pub fn adjusted_chances(state: &GameState) -> RarityChances {
    let mut boost = 1.0 + state.upgrades.rarity_boost.level as f64 * RARITY_BOOST_PER_LEVEL;
    if state.active_event == Some(EventKind::Luck) {
        boost *= LUCK_RARITY_FACTOR;
    }

    let common = (BASE_RARITY_COMMON - (boost - 1.0) * RARITY_BOOST_COMMON_SHIFT)
        .max(RARITY_COMMON_FLOOR);
    let remaining = 1.0 - common;
    let base_rest = BASE_RARITY_RARE + BASE_RARITY_EPIC + BASE_RARITY_LEGENDARY;

    RarityChances {
        common,
        rare: BASE_RARITY_RARE / base_rest * remaining,
        epic: BASE_RARITY_EPIC / base_rest * remaining,
        legendary: BASE_RARITY_LEGENDARY / base_rest * remaining,
    }
}

/// Rolls one rarity tier and caches the adjusted distribution on the
/// state for display.
///
/// Walks the tiers in fixed order accumulating probability; the first
/// tier whose cumulative sum reaches the draw wins. Falls back to common
/// if floating-point rounding leaves a residual.
pub fn resolve_rarity<R: Rng>(state: &mut GameState, rng: &mut R) -> RarityTier {
    let chances = adjusted_chances(state);
    state.rarity_chances = chances;

    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for tier in RarityTier::ALL {
        cumulative += chances.get(tier);
        if roll <= cumulative {
            return tier;
        }
    }

    RarityTier::Common
}
