use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub size: Coord,
    pub win_target: u32,
    pub history_limit: usize,
}

impl MergeConfig {
    pub fn new(size: Coord, win_target: u32) -> Result<Self> {
        Self {
            size,
            win_target,
            ..Self::default()
        }
        .validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.size < 2 {
            return Err(GameError::InvalidDimensions);
        }
        if self.win_target < 4 || !self.win_target.is_power_of_two() {
            return Err(GameError::InvalidSettings("win target must be a power of two >= 4"));
        }
        Ok(self)
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            size: 4,
            win_target: 2048,
            history_limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_size_and_target() {
        assert_eq!(MergeConfig::new(1, 2048), Err(GameError::InvalidDimensions));
        assert!(MergeConfig::new(4, 1000).is_err());
        assert!(MergeConfig::new(4, 2).is_err());
        assert_eq!(MergeConfig::new(5, 4096).unwrap().history_limit, 10);
    }
}
