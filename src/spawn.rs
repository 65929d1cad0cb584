//! Falling item generation and the on-screen item set.
//!
//! Every spawn is either a gain (rarity roll, value roll, optional
//! mutation) or junk food. Mutation discovery bookkeeping happens at
//! spawn time so a mutated gain that falls off screen still counts as
//! discovered.

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::achievements::AchievementId;
use crate::constants::{JUNK_FOOD_CHANCE, MAX_ACTIVE_ITEMS, MUTATION_CHANCE};
use crate::events::EventKind;
use crate::rarity::{self, RarityTier};
use crate::state::GameState;

/// Multiplicative gain mutations, rarest last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutation {
    Gold,
    Rainbow,
    Cosmic,
    Plasma,
}

impl Mutation {
    pub const ALL: [Mutation; 4] = [
        Mutation::Gold,
        Mutation::Rainbow,
        Mutation::Cosmic,
        Mutation::Plasma,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Gold => "Gold",
            Mutation::Rainbow => "Rainbow",
            Mutation::Cosmic => "Cosmic",
            Mutation::Plasma => "Plasma",
        }
    }

    /// Value multiplier applied when the gain is collected.
    pub fn multiplier(&self) -> u64 {
        match self {
            Mutation::Gold => 2,
            Mutation::Rainbow => 3,
            Mutation::Cosmic => 5,
            Mutation::Plasma => 10,
        }
    }

    /// The per-mutation discovery achievement.
    pub fn achievement(&self) -> AchievementId {
        match self {
            Mutation::Gold => AchievementId::MutationGold,
            Mutation::Rainbow => AchievementId::MutationRainbow,
            Mutation::Cosmic => AchievementId::MutationCosmic,
            Mutation::Plasma => AchievementId::MutationPlasma,
        }
    }

    fn pick_random<R: Rng>(rng: &mut R) -> Mutation {
        Mutation::ALL[rng.gen_range(0..Mutation::ALL.len())]
    }
}

/// Junk food varieties; collecting one costs a fraction of banked gains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JunkFood {
    Hamburger,
    Fries,
    Pizza,
    Donut,
}

impl JunkFood {
    pub const ALL: [JunkFood; 4] = [
        JunkFood::Hamburger,
        JunkFood::Fries,
        JunkFood::Pizza,
        JunkFood::Donut,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            JunkFood::Hamburger => "Hamburger",
            JunkFood::Fries => "Fries",
            JunkFood::Pizza => "Pizza",
            JunkFood::Donut => "Donut",
        }
    }

    /// Fraction of banked gains lost on collection.
    pub fn loss_fraction(&self) -> f64 {
        match self {
            JunkFood::Hamburger => 0.10,
            JunkFood::Fries => 0.05,
            JunkFood::Pizza => 0.15,
            JunkFood::Donut => 0.08,
        }
    }

    fn pick_random<R: Rng>(rng: &mut R) -> JunkFood {
        JunkFood::ALL[rng.gen_range(0..JunkFood::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemKind {
    #[serde(rename_all = "camelCase")]
    Gain {
        rarity: RarityTier,
        /// Base value before mutation and prestige multipliers.
        value: u64,
        mutation: Option<Mutation>,
    },
    JunkFood(JunkFood),
}

/// One item currently falling on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallingItem {
    pub id: Uuid,
    pub kind: ItemKind,
    pub spawned_at: u64,
    pub expires_at: u64,
}

/// A freshly generated item, plus any mutation discovered in the process.
#[derive(Debug, Clone)]
pub struct SpawnedItem {
    pub item: FallingItem,
    /// Set when this spawn was the first sighting of its mutation kind.
    pub discovered_mutation: Option<Mutation>,
}

/// Rolls one new falling item.
///
/// 15% of spawns are junk food. Gains roll a rarity tier, a value in the
/// tier's range, and a 5% mutation chance (forced while a mutation event
/// is active). First discovery of a mutation kind unlocks its
/// achievement and bumps the discovery count.
pub fn generate_item<R: Rng>(state: &mut GameState, now_ms: u64, rng: &mut R) -> SpawnedItem {
    let lifetime_ms = (state.falling_speed * 1000.0) as u64;
    let mut discovered_mutation = None;

    let kind = if rng.gen_bool(JUNK_FOOD_CHANCE) {
        ItemKind::JunkFood(JunkFood::pick_random(rng))
    } else {
        let rarity = rarity::resolve_rarity(state, rng);
        let (min, max) = rarity.value_range();
        let value = rng.gen_range(min..=max);

        let mutated = state.active_event == Some(EventKind::Mutation) || rng.gen_bool(MUTATION_CHANCE);
        let mutation = if mutated {
            let m = Mutation::pick_random(rng);
            if state.unlock_achievement(m.achievement()) {
                state.mutation_count += 1;
                discovered_mutation = Some(m);
            }
            Some(m)
        } else {
            None
        };

        ItemKind::Gain {
            rarity,
            value,
            mutation,
        }
    };

    SpawnedItem {
        item: FallingItem {
            id: Uuid::new_v4(),
            kind,
            spawned_at: now_ms,
            expires_at: now_ms + lifetime_ms,
        },
        discovered_mutation,
    }
}

/// The set of items currently on screen, capped at 50.
#[derive(Debug, Clone, Default)]
pub struct ActiveItems {
    items: Vec<FallingItem>,
}

impl ActiveItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when the screen cap is reached and spawns should be skipped.
    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_ACTIVE_ITEMS
    }

    pub fn push(&mut self, item: FallingItem) {
        self.items.push(item);
    }

    /// Removes and returns the item with `id`, if present.
    pub fn take(&mut self, id: Uuid) -> Option<FallingItem> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Removes and returns every item whose lifetime has elapsed.
    pub fn expire(&mut self, now_ms: u64) -> Vec<FallingItem> {
        let mut expired = Vec::new();
        self.items.retain(|item| {
            if item.expires_at <= now_ms {
                expired.push(*item);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Clears the screen, returning everything that was on it.
    pub fn drain(&mut self) -> Vec<FallingItem> {
        std::mem::take(&mut self.items)
    }

    pub fn as_slice(&self) -> &[FallingItem] {
        &self.items
    }
}
