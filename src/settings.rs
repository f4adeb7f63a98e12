//! Game settings and tuning tables
//!
//! Per-level balance lives in one validated table indexed by the current
//! level. A table that does not validate is rejected at startup.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Rect;

/// Number of hostile ship types (submarine, gunboat, torpedo boat, fregatte)
pub const SHIP_TYPE_COUNT: usize = 4;
/// Number of crate types
pub const CRATE_TYPE_COUNT: usize = 6;

/// Highest value of a percentage draw (draws are uniform in 1..=100)
pub const RATIO_DRAW_MAX: u32 = 100;

/// Ordered half-open percentage ranges, one per type.
///
/// A draw `d` selects type `i` when `start_i <= d < end_i`. The ranges
/// must be contiguous and cover `[1, 101)`; an empty range gives its
/// type a zero chance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatioTable(pub Vec<(u32, u32)>);

impl RatioTable {
    pub fn new(ranges: &[(u32, u32)]) -> Self {
        Self(ranges.to_vec())
    }

    /// Check that the ranges partition [1, 101) without gaps or overlap
    pub fn validate(&self, table: &str, expected: usize) -> Result<(), ConfigError> {
        let partition_error = |message: String| ConfigError::RatioPartition {
            table: table.to_string(),
            message,
        };

        if self.0.len() != expected {
            return Err(ConfigError::RatioCount {
                table: table.to_string(),
                expected,
                actual: self.0.len(),
            });
        }

        let mut cursor = 1;
        for (i, &(start, end)) in self.0.iter().enumerate() {
            if start != cursor {
                return Err(partition_error(format!(
                    "range {i} starts at {start}, expected {cursor}"
                )));
            }
            if end < start {
                return Err(partition_error(format!(
                    "range {i} ends at {end} before its start {start}"
                )));
            }
            cursor = end;
        }

        if cursor != RATIO_DRAW_MAX + 1 {
            return Err(partition_error(format!(
                "ranges end at {cursor}, expected {}",
                RATIO_DRAW_MAX + 1
            )));
        }
        Ok(())
    }

    /// Map a percentage draw onto a type index
    pub fn select(&self, draw: u32) -> Option<usize> {
        self.0
            .iter()
            .position(|&(start, end)| start <= draw && draw < end)
    }

    /// Draw uniformly from 1..=100 and map it to a type index
    pub fn draw(&self, rng: &mut impl Rng) -> Option<usize> {
        self.select(rng.random_range(1..=RATIO_DRAW_MAX))
    }
}

/// Half-open wait range in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitRange {
    pub min: f32,
    pub max: f32,
}

impl WaitRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, table: &str) -> Result<(), ConfigError> {
        if !(self.min >= 0.0 && self.min < self.max) {
            return Err(ConfigError::EmptyWaitRange {
                table: table.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Uniform draw from [min, max)
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        rng.random_range(self.min..self.max)
    }
}

/// Balance values for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTuning {
    /// Ships sunk during this level before advancing
    pub level_up_after: u32,
    /// Maximum concurrent hostile ships
    pub max_enemies: usize,
    /// Seconds between enemy spawns
    pub enemy_wait: WaitRange,
    /// Ship type weights (submarine, gunboat, torpedo boat, fregatte)
    pub ship_ratios: RatioTable,
    /// Seconds between crate drops
    pub crate_wait: WaitRange,
}

impl LevelTuning {
    fn validate(&self, level: usize) -> Result<(), ConfigError> {
        self.ship_ratios
            .validate(&format!("level {level} ship"), SHIP_TYPE_COUNT)?;
        self.enemy_wait.validate(&format!("level {level} enemy"))?;
        self.crate_wait.validate(&format!("level {level} crate"))?;
        if self.max_enemies == 0 {
            return Err(ConfigError::NonPositive {
                field: "max_enemies",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Play field ===
    pub width: f32,
    pub height: f32,
    /// Top band reserved for the HUD
    pub hud_margin: f32,

    // === Player ===
    pub player_max_hp: i32,

    // === Limits ===
    /// Torpedoes allowed on screen at once
    pub max_torpedoes: usize,
    /// Crates allowed on screen at once
    pub max_crates: usize,
    /// Seconds before an untouched crate disappears
    pub crate_timeout: f32,

    // === Progression ===
    /// Level the session starts on
    pub initial_level: u32,
    /// Crate type weights (repair, armor, full heal, bomb, mines, rapid fire)
    pub crate_ratios: RatioTable,
    /// One row per level; the last row is the ceiling
    pub levels: Vec<LevelTuning>,
}

impl Default for Settings {
    fn default() -> Self {
        let level = |max_enemies, enemy_max, ratios: [(u32, u32); 4], crate_wait: (f32, f32)| {
            LevelTuning {
                level_up_after: 20,
                max_enemies,
                enemy_wait: WaitRange::new(1.0, enemy_max),
                ship_ratios: RatioTable::new(&ratios),
                crate_wait: WaitRange::new(crate_wait.0, crate_wait.1),
            }
        };

        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            hud_margin: HUD_MARGIN,

            player_max_hp: 5000,

            max_torpedoes: 1,
            max_crates: 2,
            crate_timeout: 8.0,

            initial_level: 0,
            crate_ratios: RatioTable::new(&[
                (1, 20),
                (20, 30),
                (30, 35),
                (35, 60),
                (60, 80),
                (80, 101),
            ]),
            levels: vec![
                level(5, 3.0, [(1, 30), (30, 70), (70, 100), (100, 101)], (20.0, 25.0)),
                level(5, 3.0, [(1, 30), (30, 40), (40, 100), (100, 101)], (20.0, 25.0)),
                level(6, 3.0, [(1, 30), (30, 45), (45, 100), (100, 101)], (20.0, 25.0)),
                level(6, 3.0, [(1, 1), (1, 45), (45, 100), (100, 101)], (20.0, 25.0)),
                level(7, 3.0, [(1, 30), (30, 45), (45, 100), (100, 101)], (15.0, 20.0)),
                level(7, 3.0, [(1, 30), (30, 50), (50, 100), (100, 101)], (15.0, 20.0)),
                level(8, 2.0, [(1, 30), (30, 50), (50, 100), (100, 101)], (15.0, 20.0)),
                level(8, 2.0, [(1, 30), (30, 60), (60, 100), (100, 101)], (10.0, 15.0)),
                level(10, 2.0, [(1, 30), (30, 60), (60, 100), (100, 101)], (10.0, 15.0)),
                level(10, 2.0, [(1, 30), (30, 60), (60, 100), (100, 101)], (10.0, 15.0)),
            ],
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tables that would silently mis-weight spawns
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("player_max_hp", self.player_max_hp as f32),
            ("crate_timeout", self.crate_timeout),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        self.crate_ratios.validate("crate", CRATE_TYPE_COUNT)?;
        for (i, level) in self.levels.iter().enumerate() {
            level.validate(i)?;
        }
        self.level(self.initial_level)?;
        Ok(())
    }

    /// Highest reachable level
    pub fn ceiling(&self) -> u32 {
        self.levels.len().saturating_sub(1) as u32
    }

    /// Tuning row for a level
    pub fn level(&self, level: u32) -> Result<&LevelTuning, ConfigError> {
        self.levels
            .get(level as usize)
            .ok_or(ConfigError::UnknownLevel {
                level,
                ceiling: self.ceiling(),
            })
    }

    /// Screen rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_settings_validate() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.ceiling(), 9);
        assert_eq!(settings.level(8).unwrap().max_enemies, 10);
    }

    #[test]
    fn test_type_selection_boundaries() {
        let table = RatioTable::new(&[(1, 30), (30, 70), (70, 100), (100, 101)]);
        assert_eq!(table.select(1), Some(0));
        assert_eq!(table.select(29), Some(0));
        assert_eq!(table.select(30), Some(1));
        assert_eq!(table.select(69), Some(1));
        assert_eq!(table.select(70), Some(2));
        assert_eq!(table.select(99), Some(2));
        assert_eq!(table.select(100), Some(3));
        assert_eq!(table.select(0), None);
        assert_eq!(table.select(101), None);
    }

    #[test]
    fn test_empty_range_is_never_selected() {
        let table = RatioTable::new(&[(1, 1), (1, 45), (45, 100), (100, 101)]);
        table.validate("test", 4).unwrap();
        for draw in 1..=100 {
            assert_ne!(table.select(draw), Some(0));
        }
    }

    #[test]
    fn test_ratio_gap_rejected() {
        let table = RatioTable::new(&[(1, 30), (31, 70), (70, 100), (100, 101)]);
        assert!(matches!(
            table.validate("test", 4),
            Err(ConfigError::RatioPartition { .. })
        ));
    }

    #[test]
    fn test_ratio_short_coverage_rejected() {
        // Legacy crate table stopped at 100, leaving the top draw unmapped
        let table = RatioTable::new(&[(1, 20), (20, 30), (30, 35), (35, 60), (60, 80), (80, 100)]);
        assert!(table.validate("crate", 6).is_err());
    }

    #[test]
    fn test_ratio_count_rejected() {
        let table = RatioTable::new(&[(1, 50), (50, 101)]);
        assert!(matches!(
            table.validate("test", 4),
            Err(ConfigError::RatioCount { actual: 2, .. })
        ));
    }

    #[test]
    fn test_empty_wait_range_rejected() {
        let mut settings = Settings::default();
        settings.levels[2].enemy_wait = WaitRange::new(2.0, 2.0);
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::EmptyWaitRange { .. })
        ));
    }

    #[test]
    fn test_unknown_initial_level_rejected() {
        let settings = Settings {
            initial_level: 12,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::UnknownLevel { level: 12, .. })
        ));
    }

    #[test]
    fn test_json_round_trip_and_parse_error() {
        let json = Settings::default().to_json().unwrap();
        let parsed = Settings::from_json(&json).unwrap();
        assert_eq!(parsed.levels, Settings::default().levels);

        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_every_draw_maps_to_exactly_one_type(draw in 1u32..=100) {
            let table = RatioTable::new(&[(1, 30), (30, 70), (70, 100), (100, 101)]);
            let expected = match draw {
                1..=29 => 0,
                30..=69 => 1,
                70..=99 => 2,
                _ => 3,
            };
            prop_assert_eq!(table.select(draw), Some(expected));
        }
    }
}
