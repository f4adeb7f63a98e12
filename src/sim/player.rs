//! The player's destroyer and its timed weapon overrides
//!
//! The destroyer sits at the screen centre and only rotates its turret.
//! Firing is gated by a reload timer and a regenerating power reservoir.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::{normalize_bearing, project_point};

/// Hull footprint (bow pointing up)
pub const PLAYER_SIZE: Vec2 = Vec2::new(60.0, 160.0);
/// Distance from hull centre to the muzzle
pub const TOWER_LENGTH: f32 = 40.0;
pub const MAX_POWER: f32 = 1000.0;

/// Weapon defaults when no override is active
pub const BASE_RELOAD_TIME: f32 = 0.5;
pub const BASE_SHOT_COST: f32 = 100.0;
pub const BASE_POWER_REGEN: f32 = 100.0;

/// Rapid-fire crate values
pub const RAPID_FIRE_SECONDS: f32 = 10.0;
pub const RAPID_FIRE_RELOAD: f32 = 0.1;
pub const RAPID_FIRE_SHOT_COST: f32 = 0.0;
pub const RAPID_FIRE_REGEN: f32 = 500.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destroyer {
    pub hp: i32,
    pub max_hp: i32,
    /// Turret bearing in degrees (0 = up, clockwise)
    pub bearing: f32,
    pub power: f32,
    pub max_power: f32,
    /// Seconds since the last shot
    pub reload_elapsed: f32,
    pub center: Vec2,
}

impl Destroyer {
    pub fn new(max_hp: i32, center: Vec2) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            bearing: 0.0,
            power: MAX_POWER,
            max_power: MAX_POWER,
            reload_elapsed: BASE_RELOAD_TIME,
            center,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, PLAYER_SIZE)
    }

    pub fn is_sunk(&self) -> bool {
        self.hp <= 0
    }

    /// Rotate the turret by `degrees` (positive = clockwise)
    pub fn turn(&mut self, degrees: f32) {
        self.bearing = normalize_bearing(self.bearing + degrees);
    }

    /// Regenerate power and run the reload timer
    pub fn update(&mut self, dt: f32, options: &PlayerOptions) {
        self.power = (self.power + options.power_regen() * dt).min(self.max_power);
        self.reload_elapsed += dt;
    }

    /// Muzzle position at the current turret bearing
    pub fn muzzle(&self) -> Vec2 {
        project_point(self.center, self.bearing, TOWER_LENGTH + 3.0)
    }

    /// Try to fire; returns the muzzle position when a round leaves the gun
    pub fn fire(&mut self, options: &PlayerOptions) -> Option<Vec2> {
        let cost = options.shot_cost();
        if self.reload_elapsed < options.reload_time() || self.power < cost {
            return None;
        }
        self.reload_elapsed = 0.0;
        self.power -= cost;
        Some(self.muzzle())
    }

    /// Heal, capped at max hit points
    pub fn increase_hp(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn increase_max_hp(&mut self, amount: i32) {
        self.max_hp += amount;
    }

    pub fn reset_hp(&mut self) {
        self.hp = self.max_hp;
    }

    /// Take damage, floored at zero
    pub fn reduce_hp(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }
}

/// A value that can be overridden for a limited time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Timed {
    base: f32,
    /// (value, seconds remaining)
    active: Option<(f32, f32)>,
}

impl Timed {
    fn new(base: f32) -> Self {
        Self { base, active: None }
    }

    fn value(&self) -> f32 {
        self.active.map_or(self.base, |(value, _)| value)
    }

    fn set(&mut self, value: f32, seconds: f32) {
        self.active = Some((value, seconds));
    }

    fn tick(&mut self, dt: f32) {
        if let Some((_, remaining)) = &mut self.active {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.active = None;
            }
        }
    }
}

/// Temporary weapon overrides granted by crates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerOptions {
    reload_time: Timed,
    shot_cost: Timed,
    power_regen: Timed,
    /// Seconds left on the on-screen countdown
    countdown: Option<f32>,
    last_announced: Option<u32>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            reload_time: Timed::new(BASE_RELOAD_TIME),
            shot_cost: Timed::new(BASE_SHOT_COST),
            power_regen: Timed::new(BASE_POWER_REGEN),
            countdown: None,
            last_announced: None,
        }
    }
}

impl PlayerOptions {
    pub fn reload_time(&self) -> f32 {
        self.reload_time.value()
    }

    pub fn shot_cost(&self) -> f32 {
        self.shot_cost.value()
    }

    pub fn power_regen(&self) -> f32 {
        self.power_regen.value()
    }

    pub fn set_reload_time(&mut self, value: f32, seconds: f32) {
        self.reload_time.set(value, seconds);
    }

    pub fn set_shot_cost(&mut self, value: f32, seconds: f32) {
        self.shot_cost.set(value, seconds);
    }

    pub fn set_power_regen(&mut self, value: f32, seconds: f32) {
        self.power_regen.set(value, seconds);
    }

    pub fn set_countdown(&mut self, seconds: f32) {
        self.countdown = Some(seconds);
        self.last_announced = None;
    }

    /// Apply the rapid-fire package
    pub fn rapid_fire(&mut self) {
        self.set_reload_time(RAPID_FIRE_RELOAD, RAPID_FIRE_SECONDS);
        self.set_shot_cost(RAPID_FIRE_SHOT_COST, RAPID_FIRE_SECONDS);
        self.set_power_regen(RAPID_FIRE_REGEN, RAPID_FIRE_SECONDS);
        self.set_countdown(RAPID_FIRE_SECONDS);
    }

    /// Expire overrides. Returns the whole seconds left on the countdown
    /// whenever that number changes.
    pub fn check(&mut self, dt: f32) -> Option<u32> {
        self.reload_time.tick(dt);
        self.shot_cost.tick(dt);
        self.power_regen.tick(dt);

        let remaining = self.countdown.as_mut()?;
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.countdown = None;
            self.last_announced = None;
            return None;
        }

        let secs = remaining.ceil() as u32;
        if self.last_announced == Some(secs) {
            return None;
        }
        self.last_announced = Some(secs);
        Some(secs)
    }
}
