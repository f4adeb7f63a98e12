//! Level progression value

use serde::{Deserialize, Serialize};

/// Current level with a fixed ceiling. Only ever increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    current: u32,
    ceiling: u32,
}

impl LevelState {
    /// Initial level is clamped to the ceiling
    pub fn new(initial: u32, ceiling: u32) -> Self {
        Self {
            current: initial.min(ceiling),
            ceiling,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn at_ceiling(&self) -> bool {
        self.current >= self.ceiling
    }

    /// Step up one level; returns false (no-op) at the ceiling
    pub fn advance(&mut self) -> bool {
        if self.at_ceiling() {
            return false;
        }
        self.current += 1;
        true
    }
}
