//! Achievement rules and the idempotent unlock sweep.
//!
//! The rule list is fixed and ordered; each rule pairs an id with a
//! predicate over the game state. Unlocked ids live in the state's
//! achievement set, which only ever grows — prestige does not touch it.
//! The four `mutation-*` ids have no predicate: the spawner grants them
//! directly on first discovery of each mutation kind.

use serde::{Deserialize, Serialize};

use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first-click")]
    FirstClick,
    #[serde(rename = "click-100")]
    Click100,
    #[serde(rename = "gains-1000")]
    Gains1000,
    #[serde(rename = "gains-10000")]
    Gains10000,
    #[serde(rename = "gains-100000")]
    Gains100000,
    #[serde(rename = "prestige-1")]
    Prestige1,
    #[serde(rename = "prestige-5")]
    Prestige5,
    #[serde(rename = "mutation-1")]
    Mutation1,
    #[serde(rename = "mutation-all")]
    MutationAll,
    #[serde(rename = "legendary")]
    LegendaryClick,
    #[serde(rename = "mutation-gold")]
    MutationGold,
    #[serde(rename = "mutation-rainbow")]
    MutationRainbow,
    #[serde(rename = "mutation-cosmic")]
    MutationCosmic,
    #[serde(rename = "mutation-plasma")]
    MutationPlasma,
}

impl AchievementId {
    /// Display name shown in the unlock notification.
    pub fn name(&self) -> &'static str {
        match self {
            AchievementId::FirstClick => "First Steps",
            AchievementId::Click100 => "Dedicated",
            AchievementId::Gains1000 => "Gym Enthusiast",
            AchievementId::Gains10000 => "Gym Addict",
            AchievementId::Gains100000 => "Gym Legend",
            AchievementId::Prestige1 => "New Beginning",
            AchievementId::Prestige5 => "Reborn",
            AchievementId::Mutation1 => "Mutated",
            AchievementId::MutationAll => "Evolution Complete",
            AchievementId::LegendaryClick => "Legendary Find",
            AchievementId::MutationGold => "Gold Rush",
            AchievementId::MutationRainbow => "Over the Rainbow",
            AchievementId::MutationCosmic => "Cosmic Power",
            AchievementId::MutationPlasma => "Plasma Charged",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::FirstClick => "Click your first gain",
            AchievementId::Click100 => "Click 100 gains",
            AchievementId::Gains1000 => "Reach 1,000 total gains",
            AchievementId::Gains10000 => "Reach 10,000 total gains",
            AchievementId::Gains100000 => "Reach 100,000 total gains",
            AchievementId::Prestige1 => "Prestige for the first time",
            AchievementId::Prestige5 => "Prestige 5 times",
            AchievementId::Mutation1 => "Discover your first mutation",
            AchievementId::MutationAll => "Discover all mutations",
            AchievementId::LegendaryClick => "Click a legendary gain",
            AchievementId::MutationGold => "Discover the gold mutation",
            AchievementId::MutationRainbow => "Discover the rainbow mutation",
            AchievementId::MutationCosmic => "Discover the cosmic mutation",
            AchievementId::MutationPlasma => "Discover the plasma mutation",
        }
    }
}

/// A sweep-evaluated achievement rule.
pub struct AchievementRule {
    pub id: AchievementId,
    pub requirement: fn(&GameState) -> bool,
}

fn req_first_click(state: &GameState) -> bool {
    state.total_clicks >= 1
}

fn req_click_100(state: &GameState) -> bool {
    state.total_clicks >= 100
}

fn req_gains_1000(state: &GameState) -> bool {
    state.gains >= 1_000
}

fn req_gains_10000(state: &GameState) -> bool {
    state.gains >= 10_000
}

fn req_gains_100000(state: &GameState) -> bool {
    state.gains >= 100_000
}

fn req_prestige_1(state: &GameState) -> bool {
    state.prestige_count >= 1
}

fn req_prestige_5(state: &GameState) -> bool {
    state.prestige_count >= 5
}

fn req_mutation_1(state: &GameState) -> bool {
    state.mutation_count >= 1
}

fn req_mutation_all(state: &GameState) -> bool {
    state.mutation_count >= 4
}

// Intentionally unreachable placeholder, kept to match product data.
fn req_legendary_click(_state: &GameState) -> bool {
    false
}

/// The fixed rule list, evaluated in order by [`sweep`].
pub const RULES: [AchievementRule; 10] = [
    AchievementRule {
        id: AchievementId::FirstClick,
        requirement: req_first_click,
    },
    AchievementRule {
        id: AchievementId::Click100,
        requirement: req_click_100,
    },
    AchievementRule {
        id: AchievementId::Gains1000,
        requirement: req_gains_1000,
    },
    AchievementRule {
        id: AchievementId::Gains10000,
        requirement: req_gains_10000,
    },
    AchievementRule {
        id: AchievementId::Gains100000,
        requirement: req_gains_100000,
    },
    AchievementRule {
        id: AchievementId::Prestige1,
        requirement: req_prestige_1,
    },
    AchievementRule {
        id: AchievementId::Prestige5,
        requirement: req_prestige_5,
    },
    AchievementRule {
        id: AchievementId::Mutation1,
        requirement: req_mutation_1,
    },
    AchievementRule {
        id: AchievementId::MutationAll,
        requirement: req_mutation_all,
    },
    AchievementRule {
        id: AchievementId::LegendaryClick,
        requirement: req_legendary_click,
    },
];

/// Evaluates every rule not yet unlocked and inserts the qualifying ids.
/// Returns the newly unlocked ids in rule order; ids already in the set
/// are never returned again.
pub fn sweep(state: &mut GameState) -> Vec<AchievementId> {
    let mut unlocked = Vec::new();
    for rule in &RULES {
        if !state.achievements.contains(&rule.id) && (rule.requirement)(state) {
            state.achievements.insert(rule.id);
            unlocked.push(rule.id);
        }
    }
    unlocked
}
