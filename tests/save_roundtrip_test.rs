use gymsim::achievements::AchievementId;
use gymsim::persistence::SaveStore;
use gymsim::state::GameState;
use gymsim::Engine;

use std::fs;
use std::path::PathBuf;

fn temp_save_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("gymsim-save-{}-{}", std::process::id(), name));
    path
}

#[test]
fn a_session_survives_a_restart() {
    let path = temp_save_path("restart.json");
    let store = SaveStore::at_path(&path);

    let mut state = GameState::new();
    state.gains = 50_000;
    state.current_run_gains = 30_000;
    state.prestige_count = 3;
    state.multiplier = 1.6;
    state.total_clicks = 500;
    state.mutation_count = 2;
    state.upgrades.auto_clicker.level = 4;
    state.unlock_achievement(AchievementId::FirstClick);
    state.unlock_achievement(AchievementId::Prestige1);
    state.unlock_achievement(AchievementId::MutationGold);
    store.save(&mut state).unwrap();

    let mut engine = Engine::with_store(SaveStore::at_path(&path));
    engine.init(0);

    let loaded = engine.state();
    assert_eq!(loaded.gains, 50_000);
    assert_eq!(loaded.prestige_count, 3);
    assert_eq!(loaded.multiplier, 1.6);
    assert_eq!(loaded.total_clicks, 500);
    assert_eq!(loaded.mutation_count, 2);
    assert!(loaded.has_achievement(AchievementId::MutationGold));
    // Derived from the upgrade level on load: 2^(4-1).
    assert_eq!(loaded.gains_per_second, 8);

    let _ = fs::remove_file(&path);
}

#[test]
fn a_persisted_event_does_not_leak_into_a_new_session() {
    use gymsim::events::EventKind;

    let path = temp_save_path("stale-event.json");
    let store = SaveStore::at_path(&path);

    let mut state = GameState::new();
    state.active_event = Some(EventKind::Rush);
    state.event_end_time = Some(999_999);
    store.save(&mut state).unwrap();

    let mut engine = Engine::with_store(SaveStore::at_path(&path));
    engine.init(0);
    // The old deadline belonged to another session's clock.
    assert_eq!(engine.state().active_event, None);
    assert_eq!(engine.state().event_end_time, None);

    let _ = fs::remove_file(&path);
}

#[test]
fn a_corrupt_save_starts_a_fresh_session() {
    let path = temp_save_path("corrupt.json");
    fs::write(&path, "definitely not json").unwrap();

    let mut engine = Engine::with_store(SaveStore::at_path(&path));
    engine.init(0);

    assert_eq!(engine.state().gains, 0);
    assert_eq!(engine.state().prestige_count, 0);
    assert!(engine.state().achievements.is_empty());
}
