//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Registries are mutated in place; removals are batched per frame
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod crates;
pub mod effects;
pub mod enemies;
pub mod level;
pub mod logic;
pub mod player;
pub mod projectiles;
pub mod registry;
pub mod score;
pub mod state;
pub mod tick;
pub mod units;

pub use clock::Clock;
pub use collision::{Direction, Rect, has_crossed_midline, has_exited};
pub use crates::Crates;
pub use effects::{Effect, EffectQueue, EffectSink, TextTone};
pub use enemies::{Enemies, Field};
pub use level::LevelState;
pub use logic::{FrameReport, InteractionEngine};
pub use player::{Destroyer, PlayerOptions};
pub use projectiles::{Bullets, Torpedoes};
pub use registry::{Registry, RemovalSet};
pub use score::ScoreTracker;
pub use state::{GamePhase, GameState};
pub use tick::{FrameOutcome, TickInput, tick};
pub use units::{
    Bullet, BulletKind, Crate, CrateKind, GunType, Ship, ShipKind, Torpedo, TorpedoKind,
};
