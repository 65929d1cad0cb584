//! Timed global modifier events.
//!
//! At most one event is active at a time. Luck doubles the rarity boost
//! (consumed by the rarity roll), rush quarters the spawn period, and
//! mutation forces every new gain to mutate. Schedule wiring (expiry
//! timers, spawn restarts) lives in the engine; this module owns the
//! state transitions.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::EVENT_DURATION_MS;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Luck,
    Rush,
    Mutation,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Luck, EventKind::Rush, EventKind::Mutation];

    /// Display name for this event.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Luck => "Luck",
            EventKind::Rush => "Rush",
            EventKind::Mutation => "Mutation",
        }
    }

    /// Picks one event kind uniformly at random.
    pub fn pick_random<R: Rng>(rng: &mut R) -> EventKind {
        EventKind::ALL[rng.gen_range(0..EventKind::ALL.len())]
    }
}

/// Activates `kind` for the fixed event duration. Returns false (no-op)
/// while another event is already active.
pub fn start_event(state: &mut GameState, kind: EventKind, now_ms: u64) -> bool {
    if state.active_event.is_some() {
        return false;
    }
    state.active_event = Some(kind);
    state.event_end_time = Some(now_ms + EVENT_DURATION_MS);
    true
}

/// Reverts to the idle state, returning the event that was active.
pub fn end_event(state: &mut GameState) -> Option<EventKind> {
    state.event_end_time = None;
    state.active_event.take()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn start_sets_kind_and_end_time() {
        let mut state = GameState::new();
        assert!(start_event(&mut state, EventKind::Luck, 5_000));
        assert_eq!(state.active_event, Some(EventKind::Luck));
        assert_eq!(state.event_end_time, Some(5_000 + EVENT_DURATION_MS));
    }

    #[test]
    fn start_is_noop_while_active() {
        let mut state = GameState::new();
        assert!(start_event(&mut state, EventKind::Rush, 0));
        assert!(!start_event(&mut state, EventKind::Luck, 1_000));
        assert_eq!(state.active_event, Some(EventKind::Rush));
        assert_eq!(state.event_end_time, Some(EVENT_DURATION_MS));
    }

    #[test]
    fn end_reverts_to_idle() {
        let mut state = GameState::new();
        start_event(&mut state, EventKind::Mutation, 0);
        assert_eq!(end_event(&mut state), Some(EventKind::Mutation));
        assert_eq!(state.active_event, None);
        assert_eq!(state.event_end_time, None);
    }

    #[test]
    fn end_on_idle_returns_none() {
        let mut state = GameState::new();
        assert_eq!(end_event(&mut state), None);
    }

    #[test]
    fn pick_random_covers_all_kinds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut seen = [false; 3];
        for _ in 0..100 {
            match EventKind::pick_random(&mut rng) {
                EventKind::Luck => seen[0] = true,
                EventKind::Rush => seen[1] = true,
                EventKind::Mutation => seen[2] = true,
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
