//! Configuration errors
//!
//! Malformed tuning tables are fatal to initialization; nothing here is
//! raised during normal frame processing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level table is empty")]
    NoLevels,
    #[error("level {level} is not configured (ceiling is {ceiling})")]
    UnknownLevel { level: u32, ceiling: u32 },
    #[error("{table} ratio table must have {expected} ranges, got {actual}")]
    RatioCount {
        table: String,
        expected: usize,
        actual: usize,
    },
    #[error("{table} ratio table does not partition [1,101): {message}")]
    RatioPartition { table: String, message: String },
    #[error("{table} wait range [{min}, {max}) is empty")]
    EmptyWaitRange { table: String, min: f32, max: f32 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
