//! Destroyer - entity simulation core for a top-down naval shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (registries, collisions, scoring, levels)
//! - `settings`: Data-driven tuning tables
//! - `platform`: Collaborator contracts for rendering, input and menus
//! - `error`: Configuration errors

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{LevelTuning, RatioTable, Settings, WaitRange};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default play field size
    pub const WINDOW_WIDTH: f32 = 1280.0;
    pub const WINDOW_HEIGHT: f32 = 1024.0;
    /// HUD font size, also the top margin kept free of ships
    pub const HUD_MARGIN: f32 = 16.0;
    /// Extra gap between the HUD margin and the topmost spawn row
    pub const EDGE_MARGIN: f32 = 10.0;

    /// Ships spawning at the left edge start this far off screen
    pub const SPAWN_OFFSET: f32 = 150.0;
    /// Minimum vertical clearance between spawned ships
    pub const PLACEMENT_MARGIN: f32 = 40.0;
    /// Rejection-sampling cap for ship and crate placement
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;
    /// Speed multiplier added per level (speed * (1 + factor * level))
    pub const LEVEL_SPEED_FACTOR: f32 = 0.1;

    /// Crates keep this distance from the left/right/bottom edges
    pub const CRATE_EDGE_MARGIN: f32 = 50.0;
    /// Distance of each dropped mine from the crate
    pub const MINE_SPACING: f32 = 40.0;

    /// Turret rotation per frame while a turn intent is held (degrees)
    pub const TURRET_TURN_STEP: f32 = 2.0;

    /// Cosmetic parameters
    pub const EXPLOSION_SIZE: f32 = 20.0;
    pub const FADE_SECONDS: f32 = 0.5;
    pub const MUZZLE_FLASH_SECONDS: f32 = 0.15;
    pub const LEVEL_UP_FONT_SIZE: u32 = 50;
    pub const COUNTDOWN_FONT_SIZE: u32 = 18;
}

/// Normalize a bearing to [0, 360)
#[inline]
pub fn normalize_bearing(bearing: f32) -> f32 {
    bearing.rem_euclid(360.0)
}

/// Compass bearing in degrees from `from` to `to`.
///
/// Screen coordinates: 0° points up (negative y), angles grow clockwise.
/// Returns `None` when the two points coincide or are not finite.
pub fn bearing_to(from: Vec2, to: Vec2) -> Option<f32> {
    let delta = to - from;
    if !delta.is_finite() || delta.length_squared() < f32::EPSILON {
        return None;
    }
    Some(normalize_bearing(delta.x.atan2(-delta.y).to_degrees()))
}

/// Unit vector for a compass bearing
#[inline]
pub fn heading(bearing: f32) -> Vec2 {
    let rad = bearing.to_radians();
    Vec2::new(rad.sin(), -rad.cos())
}

/// Point `distance` away from `origin` along `bearing`
#[inline]
pub fn project_point(origin: Vec2, bearing: f32, distance: f32) -> Vec2 {
    origin + heading(bearing) * distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearing_cardinals() {
        let c = Vec2::new(100.0, 100.0);
        assert!((bearing_to(c, Vec2::new(100.0, 0.0)).unwrap() - 0.0).abs() < 0.01);
        assert!((bearing_to(c, Vec2::new(200.0, 100.0)).unwrap() - 90.0).abs() < 0.01);
        assert!((bearing_to(c, Vec2::new(100.0, 200.0)).unwrap() - 180.0).abs() < 0.01);
        assert!((bearing_to(c, Vec2::new(0.0, 100.0)).unwrap() - 270.0).abs() < 0.01);
    }

    #[test]
    fn test_bearing_degenerate() {
        let c = Vec2::new(5.0, 5.0);
        assert!(bearing_to(c, c).is_none());
        assert!(bearing_to(c, Vec2::new(f32::NAN, 0.0)).is_none());
    }

    #[test]
    fn test_project_point_round_trip() {
        let origin = Vec2::new(640.0, 512.0);
        let target = project_point(origin, 45.0, 100.0);
        let back = bearing_to(origin, target).unwrap();
        assert!((back - 45.0).abs() < 0.01);
        assert!(((target - origin).length() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_normalize_bearing() {
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(725.0), 5.0);
    }
}
