//! The engine: task orchestration over the game state.
//!
//! The engine owns the state, the on-screen items and the scheduler,
//! and is driven entirely by the caller's millisecond clock via
//! [`Engine::tick`]. Every state change surfaces as an [`EngineEvent`]
//! so presentation layers can render without inspecting internals.

use rand::Rng;
use uuid::Uuid;

use crate::achievements::{self, AchievementId};
use crate::constants::{
    ACHIEVEMENT_SWEEP_PERIOD_MS, AUTOSAVE_PERIOD_MS, AUTO_CLICKER_PERIOD_MS,
    EVENT_ATTEMPT_PERIOD_MS, EVENT_DURATION_MS, FIRST_EVENT_DELAY_MS,
};
use crate::economy::{self, CollectOutcome};
use crate::error::EngineError;
use crate::events::{self, EventKind};
use crate::persistence::SaveStore;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::spawn::{self, ActiveItems, FallingItem, JunkFood, Mutation};
use crate::state::{GameState, UpgradeKind};

/// Scheduled work items, dispatched by [`Engine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Spawn,
    AutoClick,
    EventAttempt,
    EventExpiry,
    AchievementSweep,
    Autosave,
}

/// Everything the engine reports to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ItemSpawned { item: FallingItem },
    ItemExpired { id: Uuid },
    GainCollected { id: Uuid, amount: u64 },
    JunkFoodEaten { id: Uuid, junk: JunkFood, lost: u64 },
    AutoGains { amount: u64 },
    UpgradePurchased { kind: UpgradeKind, new_level: u32 },
    PrestigeCompleted { multiplier: f64, prestige_count: u32 },
    AchievementUnlocked { id: AchievementId, name: &'static str },
    MutationDiscovered { mutation: Mutation },
    EventStarted { kind: EventKind },
    EventEnded { kind: EventKind },
    /// A save attempt failed; play continues in memory.
    SaveFailed { reason: String },
}

/// Events produced by one clock advance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub events: Vec<EngineEvent>,
}

pub struct Engine {
    state: GameState,
    items: ActiveItems,
    scheduler: Scheduler<Task>,
    store: Option<SaveStore>,
    spawn_task: Option<TaskHandle>,
    auto_click_task: Option<TaskHandle>,
    event_expiry_task: Option<TaskHandle>,
    now_ms: u64,
    running: bool,
}

impl Engine {
    /// An engine with no save backing; state lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            state: GameState::new(),
            items: ActiveItems::new(),
            scheduler: Scheduler::new(),
            store: None,
            spawn_task: None,
            auto_click_task: None,
            event_expiry_task: None,
            now_ms: 0,
            running: false,
        }
    }

    /// An engine persisting through `store`. The saved state is loaded
    /// on [`init`](Engine::init), not here.
    pub fn with_store(store: SaveStore) -> Self {
        let mut engine = Self::in_memory();
        engine.store = Some(store);
        engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn items(&self) -> &[FallingItem] {
        self.items.as_slice()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts (or restarts) a session at clock time `now_ms`: loads the
    /// save if one is backing the engine, clears any event left over
    /// from a previous session, and installs the recurring tasks.
    pub fn init(&mut self, now_ms: u64) {
        self.now_ms = now_ms;

        if let Some(store) = &self.store {
            self.state = store.load();
        }
        // A persisted event deadline refers to a previous session's clock.
        events::end_event(&mut self.state);

        self.items = ActiveItems::new();
        self.scheduler.cancel_all();
        self.event_expiry_task = None;
        self.running = true;

        self.spawn_task =
            Some(self.scheduler.schedule_every(Task::Spawn, now_ms, self.state.spawn_period_ms()));
        self.auto_click_task = if self.state.upgrades.auto_clicker.level > 0 {
            Some(self.scheduler.schedule_every(Task::AutoClick, now_ms, AUTO_CLICKER_PERIOD_MS))
        } else {
            None
        };
        self.scheduler.schedule_every(Task::EventAttempt, now_ms, EVENT_ATTEMPT_PERIOD_MS);
        self.scheduler.schedule_once(Task::EventAttempt, now_ms + FIRST_EVENT_DELAY_MS);
        self.scheduler.schedule_every(Task::AchievementSweep, now_ms, ACHIEVEMENT_SWEEP_PERIOD_MS);
        self.scheduler.schedule_every(Task::Autosave, now_ms, AUTOSAVE_PERIOD_MS);
    }

    /// Advances the clock to `now_ms`, expiring items and running every
    /// scheduled task that came due.
    pub fn tick<R: Rng>(&mut self, now_ms: u64, rng: &mut R) -> TickResult {
        let mut result = TickResult::default();
        if !self.running {
            return result;
        }
        self.now_ms = now_ms;

        for item in self.items.expire(now_ms) {
            result.events.push(EngineEvent::ItemExpired { id: item.id });
        }

        // Tasks are dispatched one at a time so a firing that cancels or
        // reschedules another task (a rush start quartering the spawn
        // period, say) takes effect for the rest of this tick.
        while let Some(task) = self.scheduler.poll_next(now_ms) {
            match task {
                Task::Spawn => self.run_spawn(rng, &mut result.events),
                Task::AutoClick => {
                    let amount = economy::auto_tick(&mut self.state);
                    if amount > 0 {
                        result.events.push(EngineEvent::AutoGains { amount });
                        self.sweep_achievements(&mut result.events);
                    }
                }
                Task::EventAttempt => self.try_start_event(rng, &mut result.events),
                Task::EventExpiry => self.end_active_event(&mut result.events),
                Task::AchievementSweep => {
                    let before = result.events.len();
                    self.sweep_achievements(&mut result.events);
                    if result.events.len() > before {
                        self.save(&mut result.events);
                    }
                }
                Task::Autosave => self.save(&mut result.events),
            }
        }

        result
    }

    /// Collects the on-screen item with `id`.
    pub fn collect(&mut self, id: Uuid) -> Result<TickResult, EngineError> {
        let item = self.items.take(id).ok_or(EngineError::UnknownItem(id))?;

        let mut result = TickResult::default();
        match economy::collect(&mut self.state, &item.kind) {
            CollectOutcome::Gain { amount } => {
                result.events.push(EngineEvent::GainCollected { id, amount });
            }
            CollectOutcome::Junk { junk, lost } => {
                result.events.push(EngineEvent::JunkFoodEaten { id, junk, lost });
            }
        }
        self.sweep_achievements(&mut result.events);
        self.save(&mut result.events);
        Ok(result)
    }

    /// Buys one level of `kind` and rewires any timing that depends on
    /// it: spawn-rate purchases reschedule the spawner, and the first
    /// auto-clicker level starts passive income.
    pub fn buy_upgrade(&mut self, kind: UpgradeKind) -> Result<TickResult, EngineError> {
        let new_level = economy::buy_upgrade(&mut self.state, kind)?;

        let mut result = TickResult::default();
        result.events.push(EngineEvent::UpgradePurchased { kind, new_level });

        match kind {
            UpgradeKind::SpawnRate => self.restart_spawning(),
            UpgradeKind::AutoClicker => {
                if new_level == 1 && self.running && self.auto_click_task.is_none() {
                    self.auto_click_task = Some(self.scheduler.schedule_every(
                        Task::AutoClick,
                        self.now_ms,
                        AUTO_CLICKER_PERIOD_MS,
                    ));
                }
            }
            UpgradeKind::RarityBoost => {}
        }

        self.sweep_achievements(&mut result.events);
        self.save(&mut result.events);
        Ok(result)
    }

    /// Prestiges the run: clears the screen and any active event, resets
    /// the run state, and restarts spawning at the base rate.
    pub fn prestige(&mut self) -> Result<TickResult, EngineError> {
        if !economy::can_prestige(&self.state) {
            return Err(EngineError::PrestigeRequirementNotMet {
                current_run_gains: self.state.current_run_gains,
                required: crate::constants::PRESTIGE_RUN_GAINS_REQUIREMENT,
            });
        }

        let mut result = TickResult::default();
        self.end_active_event(&mut result.events);

        let multiplier = economy::perform_prestige(&mut self.state)?;

        for item in self.items.drain() {
            result.events.push(EngineEvent::ItemExpired { id: item.id });
        }
        if let Some(handle) = self.auto_click_task.take() {
            self.scheduler.cancel(handle);
        }
        self.restart_spawning();

        result.events.push(EngineEvent::PrestigeCompleted {
            multiplier,
            prestige_count: self.state.prestige_count,
        });
        self.sweep_achievements(&mut result.events);
        self.save(&mut result.events);
        Ok(result)
    }

    /// Stops the session: cancels every task, clears the screen and
    /// writes a final save. Further ticks are inert until
    /// [`init`](Engine::init), and items from the old session can no
    /// longer be collected.
    pub fn teardown(&mut self) -> TickResult {
        let mut result = TickResult::default();
        self.end_active_event(&mut result.events);
        for item in self.items.drain() {
            result.events.push(EngineEvent::ItemExpired { id: item.id });
        }
        self.scheduler.cancel_all();
        self.spawn_task = None;
        self.auto_click_task = None;
        self.event_expiry_task = None;
        self.running = false;
        self.save(&mut result.events);
        result
    }

    fn run_spawn<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<EngineEvent>) {
        if self.items.is_full() {
            return;
        }

        let spawned = spawn::generate_item(&mut self.state, self.now_ms, rng);
        if let Some(mutation) = spawned.discovered_mutation {
            events.push(EngineEvent::MutationDiscovered { mutation });
            let id = mutation.achievement();
            events.push(EngineEvent::AchievementUnlocked { id, name: id.name() });
            self.sweep_achievements(events);
            self.save(events);
        }
        events.push(EngineEvent::ItemSpawned { item: spawned.item });
        self.items.push(spawned.item);
    }

    fn try_start_event<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<EngineEvent>) {
        let kind = EventKind::pick_random(rng);
        if !events::start_event(&mut self.state, kind, self.now_ms) {
            return;
        }

        self.event_expiry_task =
            Some(self.scheduler.schedule_once(Task::EventExpiry, self.now_ms + EVENT_DURATION_MS));
        if kind == EventKind::Rush {
            self.restart_spawning();
        }
        events.push(EngineEvent::EventStarted { kind });
    }

    fn end_active_event(&mut self, events: &mut Vec<EngineEvent>) {
        if let Some(handle) = self.event_expiry_task.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(kind) = events::end_event(&mut self.state) {
            if kind == EventKind::Rush {
                self.restart_spawning();
            }
            events.push(EngineEvent::EventEnded { kind });
        }
    }

    /// Replaces the spawn task with one at the current spawn period.
    fn restart_spawning(&mut self) {
        if !self.running {
            return;
        }
        if let Some(handle) = self.spawn_task.take() {
            self.scheduler.cancel(handle);
        }
        self.spawn_task =
            Some(self.scheduler.schedule_every(Task::Spawn, self.now_ms, self.state.spawn_period_ms()));
    }

    fn sweep_achievements(&mut self, events: &mut Vec<EngineEvent>) {
        for id in achievements::sweep(&mut self.state) {
            events.push(EngineEvent::AchievementUnlocked { id, name: id.name() });
        }
    }

    fn save(&mut self, events: &mut Vec<EngineEvent>) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&mut self.state) {
                events.push(EngineEvent::SaveFailed { reason: e.to_string() });
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn tick_before_init_is_inert() {
        let mut engine = Engine::in_memory();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = engine.tick(10_000, &mut rng);
        assert!(result.events.is_empty());
        assert!(engine.items().is_empty());
    }

    #[test]
    fn first_spawn_arrives_one_period_after_init() {
        let mut engine = Engine::in_memory();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        engine.init(0);

        assert!(engine.tick(1_999, &mut rng).events.is_empty());
        let result = engine.tick(2_000, &mut rng);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, EngineEvent::ItemSpawned { .. })));
        assert_eq!(engine.items().len(), 1);
    }

    #[test]
    fn collect_unknown_id_is_an_error() {
        let mut engine = Engine::in_memory();
        engine.init(0);
        let id = Uuid::new_v4();
        assert_eq!(engine.collect(id), Err(EngineError::UnknownItem(id)));
    }

    #[test]
    fn teardown_makes_ticks_inert() {
        let mut engine = Engine::in_memory();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        engine.init(0);
        engine.teardown();

        let result = engine.tick(60_000, &mut rng);
        assert!(result.events.is_empty());
        assert!(!engine.is_running());
    }
}
