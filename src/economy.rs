//! Currency flow: collects, upgrade purchases, auto-clicker income and
//! prestige.
//!
//! All currency math happens here so the rounding policy lives in one
//! place. Gains are integers; the prestige multiplier is applied at
//! collection time and floored for manual collects, rounded for
//! auto-clicker income.

use crate::constants::{
    PRESTIGE_MULTIPLIER_STEP, PRESTIGE_RUN_GAINS_REQUIREMENT, UPGRADE_COST_GROWTH,
};
use crate::error::EngineError;
use crate::spawn::{ItemKind, JunkFood};
use crate::state::{GameState, UpgradeKind};

/// What happened when a falling item was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// A gain was banked for `amount` (multiplier applied).
    Gain { amount: u64 },
    /// Junk food was eaten, losing `lost` gains.
    Junk { junk: JunkFood, lost: u64 },
}

/// Applies one collected item to the state.
///
/// Gains credit `floor(value * multiplier)` to both the bank and the
/// current run, and count as a click. Junk food costs
/// `max(1, floor(gains * fraction))` of banked gains, clamped at zero,
/// and does not count as a click.
pub fn collect(state: &mut GameState, kind: &ItemKind) -> CollectOutcome {
    match kind {
        ItemKind::Gain {
            value, mutation, ..
        } => {
            let base = match mutation {
                Some(m) => value * m.multiplier(),
                None => *value,
            };
            let amount = (base as f64 * state.multiplier).floor() as u64;
            state.gains += amount;
            state.current_run_gains += amount;
            state.total_clicks += 1;
            CollectOutcome::Gain { amount }
        }
        ItemKind::JunkFood(junk) => {
            let lost = ((state.gains as f64 * junk.loss_fraction()).floor() as u64).max(1);
            let lost = lost.min(state.gains);
            state.gains -= lost;
            CollectOutcome::Junk { junk: *junk, lost }
        }
    }
}

/// Passive income per auto-clicker tick, before the multiplier: 2^(L-1)
/// at level L, zero at level 0. Levels beyond what fits in a u64 (only
/// reachable through a hand-edited save) saturate instead of panicking.
pub fn gains_per_second(level: u32) -> u64 {
    if level == 0 {
        0
    } else {
        2u64.checked_pow(level - 1).unwrap_or(u64::MAX)
    }
}

/// Credits one second of auto-clicker income. Returns the amount banked
/// (zero at level 0). Does not count as a click.
pub fn auto_tick(state: &mut GameState) -> u64 {
    let base = gains_per_second(state.upgrades.auto_clicker.level);
    if base == 0 {
        return 0;
    }
    let amount = (base as f64 * state.multiplier).round() as u64;
    state.gains = state.gains.saturating_add(amount);
    state.current_run_gains = state.current_run_gains.saturating_add(amount);
    amount
}

/// Buys one level of `kind`, deducting its current cost.
///
/// The next cost is `floor(cost * 1.8)`. Buying the auto-clicker also
/// refreshes the cached gains-per-second figure.
pub fn buy_upgrade(state: &mut GameState, kind: UpgradeKind) -> Result<u32, EngineError> {
    let cost = state.upgrades.get(kind).cost;
    if state.gains < cost {
        return Err(EngineError::InsufficientFunds {
            kind,
            cost,
            gains: state.gains,
        });
    }

    state.gains -= cost;
    let upgrade = state.upgrades.get_mut(kind);
    upgrade.level += 1;
    upgrade.cost = (upgrade.cost as f64 * UPGRADE_COST_GROWTH).floor() as u64;
    let new_level = upgrade.level;

    if kind == UpgradeKind::AutoClicker {
        state.gains_per_second = gains_per_second(new_level);
    }

    Ok(new_level)
}

pub fn can_prestige(state: &GameState) -> bool {
    state.current_run_gains >= PRESTIGE_RUN_GAINS_REQUIREMENT
}

/// Resets the run in exchange for a permanently higher multiplier.
///
/// Banked gains, run gains, upgrades and passive income all reset;
/// achievements, mutation discoveries, click totals and the best-run
/// record persist. Returns the new multiplier.
pub fn perform_prestige(state: &mut GameState) -> Result<f64, EngineError> {
    if !can_prestige(state) {
        return Err(EngineError::PrestigeRequirementNotMet {
            current_run_gains: state.current_run_gains,
            required: PRESTIGE_RUN_GAINS_REQUIREMENT,
        });
    }

    state.best_run = state.best_run.max(state.current_run_gains);
    state.prestige_count += 1;
    state.multiplier = 1.0 + PRESTIGE_MULTIPLIER_STEP * state.prestige_count as f64;

    state.gains = 0;
    state.current_run_gains = 0;
    state.upgrades.reset();
    state.gains_per_second = 0;
    state.falling_speed = crate::constants::FALLING_SPEED_SECONDS;
    state.active_event = None;
    state.event_end_time = None;

    Ok(state.multiplier)
}
