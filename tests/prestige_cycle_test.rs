//! Drives a full run from zero gains through prestige, clicking every
//! gain that spawns.

use gymsim::achievements::AchievementId;
use gymsim::engine::EngineEvent;
use gymsim::spawn::ItemKind;
use gymsim::Engine;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn a_run_of_collects_earns_a_prestige() {
    let mut engine = Engine::in_memory();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    engine.init(0);

    let mut now = 0u64;
    while engine.state().current_run_gains < 1_000 {
        now += 500;
        assert!(now < 3_600_000, "run never reached the prestige threshold");
        engine.tick(now, &mut rng);

        // Click every gain on screen; leave junk food to expire.
        let gains: Vec<_> = engine
            .items()
            .iter()
            .filter(|item| matches!(item.kind, ItemKind::Gain { .. }))
            .map(|item| item.id)
            .collect();
        for id in gains {
            engine.collect(id).unwrap();
        }
    }

    assert!(engine.state().total_clicks > 0);
    assert!(engine.state().has_achievement(AchievementId::FirstClick));

    let run_gains = engine.state().current_run_gains;
    let clicks = engine.state().total_clicks;
    let result = engine.prestige().unwrap();

    assert!(result.events.contains(&EngineEvent::PrestigeCompleted {
        multiplier: 1.2,
        prestige_count: 1,
    }));
    assert!(result.events.iter().any(|e| matches!(
        e,
        EngineEvent::AchievementUnlocked {
            id: AchievementId::Prestige1,
            ..
        }
    )));

    let state = engine.state();
    assert_eq!(state.prestige_count, 1);
    assert_eq!(state.multiplier, 1.2);
    assert_eq!(state.best_run, run_gains);
    assert_eq!(state.gains, 0);
    assert_eq!(state.current_run_gains, 0);
    assert_eq!(state.upgrades.spawn_rate.level, 0);
    assert_eq!(state.gains_per_second, 0);
    // Lifetime progress survives the reset.
    assert_eq!(state.total_clicks, clicks);
    assert!(state.has_achievement(AchievementId::FirstClick));
    assert!(engine.items().is_empty());

    // A second prestige needs a fresh thousand run gains.
    assert!(engine.prestige().is_err());
}
