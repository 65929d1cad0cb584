//! Engine error type for caller-initiated operations.

use std::fmt;

use uuid::Uuid;

use crate::state::UpgradeKind;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// An upgrade purchase was attempted with too few gains banked.
    InsufficientFunds {
        kind: UpgradeKind,
        cost: u64,
        gains: u64,
    },
    /// Prestige was attempted before the run-gains requirement was met.
    PrestigeRequirementNotMet { current_run_gains: u64, required: u64 },
    /// A collect referenced an item id that is not on screen.
    UnknownItem(Uuid),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InsufficientFunds { kind, cost, gains } => write!(
                f,
                "not enough gains for {}: need {}, have {}",
                kind.name(),
                cost,
                gains
            ),
            EngineError::PrestigeRequirementNotMet {
                current_run_gains,
                required,
            } => write!(
                f,
                "prestige requires {} gains this run, have {}",
                required, current_run_gains
            ),
            EngineError::UnknownItem(id) => write!(f, "no active item with id {}", id),
        }
    }
}

impl std::error::Error for EngineError {}
