// Spawn timing
pub const BASE_SPAWN_PERIOD_MS: u64 = 2000;
pub const SPAWN_PERIOD_STEP_MS: u64 = 150;
pub const MIN_SPAWN_PERIOD_MS: u64 = 200;
pub const RUSH_SPAWN_DIVISOR: u64 = 4;
pub const MIN_RUSH_SPAWN_PERIOD_MS: u64 = 100;
pub const MAX_ACTIVE_ITEMS: usize = 50;
pub const FALLING_SPEED_SECONDS: f64 = 3.0;

// Upgrades
pub const SPAWN_RATE_BASE_COST: u64 = 50;
pub const RARITY_BOOST_BASE_COST: u64 = 100;
pub const AUTO_CLICKER_BASE_COST: u64 = 200;
pub const UPGRADE_COST_GROWTH: f64 = 1.8;
pub const AUTO_CLICKER_PERIOD_MS: u64 = 1000;

// Prestige
pub const PRESTIGE_RUN_GAINS_REQUIREMENT: u64 = 1000;
pub const PRESTIGE_MULTIPLIER_STEP: f64 = 0.2;

// Base rarity distribution
pub const BASE_RARITY_COMMON: f64 = 0.70;
pub const BASE_RARITY_RARE: f64 = 0.20;
pub const BASE_RARITY_EPIC: f64 = 0.08;
pub const BASE_RARITY_LEGENDARY: f64 = 0.02;
pub const RARITY_COMMON_FLOOR: f64 = 0.4;
pub const RARITY_BOOST_PER_LEVEL: f64 = 0.1;
pub const RARITY_BOOST_COMMON_SHIFT: f64 = 0.3;
pub const LUCK_RARITY_FACTOR: f64 = 2.0;

// Mutations and junk food
pub const MUTATION_CHANCE: f64 = 0.05;
pub const JUNK_FOOD_CHANCE: f64 = 0.15;

// Timed events
pub const EVENT_ATTEMPT_PERIOD_MS: u64 = 30_000;
pub const FIRST_EVENT_DELAY_MS: u64 = 10_000;
pub const EVENT_DURATION_MS: u64 = 10_000;

// Background sweeps
pub const ACHIEVEMENT_SWEEP_PERIOD_MS: u64 = 5_000;
pub const AUTOSAVE_PERIOD_MS: u64 = 30_000;

// Persistence
pub const SAVE_FILE_NAME: &str = "save.json";
