use serde::{Deserialize, Serialize};

use crate::*;

/// Floor under which gravity never gets faster.
pub const MIN_DROP_SPEED_MS: u64 = 50;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    pub width: u8,
    pub height: u8,
    pub initial_speed_ms: u64,
    pub speed_increase_factor: f64,
    pub lines_per_level: u32,
    pub min_speed_ms: u64,
}

impl StackConfig {
    pub fn new(width: u8, height: u8) -> Result<Self> {
        Self {
            width,
            height,
            ..Self::default()
        }
        .validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.width < 4 || self.height < 4 {
            return Err(GameError::InvalidDimensions);
        }
        if self.lines_per_level == 0 {
            return Err(GameError::InvalidSettings("lines per level must be positive"));
        }
        if !(self.speed_increase_factor > 0.0 && self.speed_increase_factor <= 1.0) {
            return Err(GameError::InvalidSettings("speed increase factor must be in (0, 1]"));
        }
        if self.min_speed_ms < MIN_DROP_SPEED_MS {
            return Err(GameError::InvalidSettings("drop speed floor is below 50 ms"));
        }
        if self.initial_speed_ms < self.min_speed_ms {
            return Err(GameError::InvalidSettings("initial speed is below the floor"));
        }
        Ok(self)
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            initial_speed_ms: 1000,
            speed_increase_factor: 0.9,
            lines_per_level: 10,
            min_speed_ms: MIN_DROP_SPEED_MS,
        }
    }
}
