//! Gym Simulator engine: a deterministic idle-clicker core.
//!
//! Gains fall, get clicked (or rot into junk food), fund upgrades, and
//! eventually prestige into a permanent multiplier. The engine is
//! headless: callers drive it with a millisecond clock and an `Rng`,
//! and render from the [`EngineEvent`] stream and the public state.
//!
//! ```no_run
//! use gymsim::Engine;
//!
//! let mut engine = Engine::in_memory();
//! engine.init(0);
//! let mut rng = rand::thread_rng();
//! let result = engine.tick(2_000, &mut rng);
//! for event in result.events {
//!     println!("{:?}", event);
//! }
//! ```

pub mod achievements;
pub mod constants;
pub mod economy;
pub mod engine;
pub mod error;
pub mod events;
pub mod format;
pub mod persistence;
pub mod rarity;
pub mod scheduler;
pub mod spawn;
pub mod state;

pub use engine::{Engine, EngineEvent, TickResult};
pub use error::EngineError;
pub use state::{GameState, UpgradeKind};
