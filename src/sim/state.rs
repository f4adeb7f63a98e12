//! Game state: the registries, the player and session bookkeeping
//!
//! The state owns every registry outright. Per-frame systems borrow it
//! mutably one at a time, so no registry ever holds a reference to another.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::crates::Crates;
use super::effects::EffectQueue;
use super::enemies::{Enemies, Field};
use super::level::LevelState;
use super::player::{Destroyer, PlayerOptions};
use super::projectiles::{Bullets, Torpedoes};
use super::score::ScoreTracker;
use crate::error::ConfigError;
use crate::settings::{LevelTuning, Settings};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player hull reached zero hit points
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub level: LevelState,
    pub score: ScoreTracker,
    pub player: Destroyer,
    pub options: PlayerOptions,
    pub enemies: Enemies,
    pub bullets: Bullets,
    pub torpedoes: Torpedoes,
    pub crates: Crates,
    /// Cosmetic triggers raised since the renderer last drained them
    pub effects: EffectQueue,
    pub phase: GamePhase,
    /// Frames simulated so far
    pub frame: u64,
}

impl GameState {
    /// Validate the settings and set up a fresh session with one ship afloat
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let level = LevelState::new(settings.initial_level, settings.ceiling());
        let tuning = settings.level(level.current())?;

        let enemies = Enemies::new(tuning, &mut rng);
        let crates = Crates::new(
            tuning,
            settings.crate_timeout,
            settings.max_crates,
            &mut rng,
        );
        let center = Vec2::new(settings.width / 2.0, settings.height / 2.0);
        let player = Destroyer::new(settings.player_max_hp, center);

        let mut state = Self {
            settings,
            seed,
            rng,
            level,
            score: ScoreTracker::new(),
            player,
            options: PlayerOptions::default(),
            enemies,
            bullets: Bullets::new(),
            torpedoes: Torpedoes::new(),
            crates,
            effects: EffectQueue::new(),
            phase: GamePhase::Playing,
            frame: 0,
        };

        let field = state.field();
        let tuning = state.settings.level(state.level.current())?;
        state.enemies.spawn_now(field, tuning, &mut state.rng);

        log::info!(
            "New session: seed {}, level {}/{}",
            seed,
            state.level.current(),
            state.level.ceiling()
        );
        Ok(state)
    }

    /// Play-field geometry used by placement
    pub fn field(&self) -> Field {
        Field {
            bounds: self.settings.bounds(),
            hud_margin: self.settings.hud_margin,
        }
    }

    /// Tuning row for the current level
    pub fn tuning(&self) -> Result<&LevelTuning, ConfigError> {
        self.settings.level(self.level.current())
    }

    pub fn screen_center(&self) -> Vec2 {
        self.settings.bounds().center()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
