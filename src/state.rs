//! The persisted game state aggregate.
//!
//! One `GameState` value owns everything the simulator persists; the
//! engine mutates it through the economy/event/achievement modules and
//! the persistence layer serializes it verbatim (achievements as an
//! ordered list of string ids).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementId;
use crate::constants::{
    AUTO_CLICKER_BASE_COST, BASE_SPAWN_PERIOD_MS, FALLING_SPEED_SECONDS, MIN_RUSH_SPAWN_PERIOD_MS,
    MIN_SPAWN_PERIOD_MS, RARITY_BOOST_BASE_COST, RUSH_SPAWN_DIVISOR, SPAWN_PERIOD_STEP_MS,
    SPAWN_RATE_BASE_COST,
};
use crate::events::EventKind;
use crate::rarity::RarityChances;

/// The three purchasable upgrade kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeKind {
    SpawnRate,
    RarityBoost,
    AutoClicker,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [
        UpgradeKind::SpawnRate,
        UpgradeKind::RarityBoost,
        UpgradeKind::AutoClicker,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::SpawnRate => "Spawn Rate",
            UpgradeKind::RarityBoost => "Rarity Boost",
            UpgradeKind::AutoClicker => "Auto Clicker",
        }
    }

    /// Cost of the first purchase.
    pub fn base_cost(&self) -> u64 {
        match self {
            UpgradeKind::SpawnRate => SPAWN_RATE_BASE_COST,
            UpgradeKind::RarityBoost => RARITY_BOOST_BASE_COST,
            UpgradeKind::AutoClicker => AUTO_CLICKER_BASE_COST,
        }
    }
}

/// Level and next-purchase cost of one upgrade. The cost is stored
/// incrementally (multiplied on each purchase), not recomputed from the
/// level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    pub level: u32,
    pub cost: u64,
}

impl Upgrade {
    fn at_base(kind: UpgradeKind) -> Self {
        Self {
            level: 0,
            cost: kind.base_cost(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrades {
    pub spawn_rate: Upgrade,
    pub rarity_boost: Upgrade,
    pub auto_clicker: Upgrade,
}

impl Upgrades {
    pub fn new() -> Self {
        Self {
            spawn_rate: Upgrade::at_base(UpgradeKind::SpawnRate),
            rarity_boost: Upgrade::at_base(UpgradeKind::RarityBoost),
            auto_clicker: Upgrade::at_base(UpgradeKind::AutoClicker),
        }
    }

    pub fn get(&self, kind: UpgradeKind) -> &Upgrade {
        match kind {
            UpgradeKind::SpawnRate => &self.spawn_rate,
            UpgradeKind::RarityBoost => &self.rarity_boost,
            UpgradeKind::AutoClicker => &self.auto_clicker,
        }
    }

    pub fn get_mut(&mut self, kind: UpgradeKind) -> &mut Upgrade {
        match kind {
            UpgradeKind::SpawnRate => &mut self.spawn_rate,
            UpgradeKind::RarityBoost => &mut self.rarity_boost,
            UpgradeKind::AutoClicker => &mut self.auto_clicker,
        }
    }

    /// Back to level 0 at base costs (prestige).
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Upgrades {
    fn default() -> Self {
        Self::new()
    }
}

/// Full state of one gym simulator session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    /// Spendable currency. Never negative.
    pub gains: u64,
    /// Gains earned since the last prestige. Reset to 0 on prestige.
    pub current_run_gains: u64,
    /// Global output multiplier; grows only via prestige.
    pub multiplier: f64,
    pub prestige_count: u32,
    /// Best `current_run_gains` recorded at prestige time.
    pub best_run: u64,
    /// Lifetime manual collections.
    pub total_clicks: u64,
    /// Distinct mutation kinds ever discovered (0..=4).
    pub mutation_count: u32,
    /// Unlocked achievement ids. Append-only; serializes as an ordered list.
    pub achievements: BTreeSet<AchievementId>,
    pub upgrades: Upgrades,
    /// Derived from the auto-clicker level; recomputed on load.
    pub gains_per_second: u64,
    /// Seconds an item falls before it expires.
    pub falling_speed: f64,
    pub active_event: Option<EventKind>,
    /// Engine-clock ms at which the active event expires.
    pub event_end_time: Option<u64>,
    /// Last distribution computed by the rarity roll (for display).
    pub rarity_chances: RarityChances,
    /// Unix seconds of the last successful save.
    pub last_saved_at: i64,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            gains: 0,
            current_run_gains: 0,
            multiplier: 1.0,
            prestige_count: 0,
            best_run: 0,
            total_clicks: 0,
            mutation_count: 0,
            achievements: BTreeSet::new(),
            upgrades: Upgrades::new(),
            gains_per_second: 0,
            falling_speed: FALLING_SPEED_SECONDS,
            active_event: None,
            event_end_time: None,
            rarity_chances: RarityChances::base(),
            last_saved_at: 0,
        }
    }

    /// Current spawn period derived from the spawn-rate level and the
    /// active event. Base 2000ms, minus 150ms per level (floor 200ms);
    /// a rush event quarters the result (floor 100ms).
    pub fn spawn_period_ms(&self) -> u64 {
        let level = self.upgrades.spawn_rate.level as u64;
        let mut period = BASE_SPAWN_PERIOD_MS;
        if level > 0 {
            period = period
                .saturating_sub(level * SPAWN_PERIOD_STEP_MS)
                .max(MIN_SPAWN_PERIOD_MS);
        }
        if self.active_event == Some(EventKind::Rush) {
            period = (period / RUSH_SPAWN_DIVISOR).max(MIN_RUSH_SPAWN_PERIOD_MS);
        }
        period
    }

    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.contains(&id)
    }

    /// Inserts `id` into the achievement set. Returns true only on the
    /// first unlock.
    pub fn unlock_achievement(&mut self, id: AchievementId) -> bool {
        self.achievements.insert(id)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
