use serde::{Deserialize, Serialize};

use crate::merge::MergeConfig;
use crate::minefield::{Difficulty, MinefieldConfig};
use crate::stack::StackConfig;
use crate::*;

/// Minefield section: a preset name, or `custom` with explicit dimensions that
/// get clamped into range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinefieldSettings {
    pub difficulty: Difficulty,
    pub rows: Option<Coord>,
    pub cols: Option<Coord>,
    pub mine_count: Option<CellCount>,
}

impl MinefieldSettings {
    pub fn config(&self) -> MinefieldConfig {
        match MinefieldConfig::preset(self.difficulty) {
            Some(config) => config,
            None => {
                let fallback = MinefieldConfig::beginner();
                MinefieldConfig::custom(
                    self.rows.unwrap_or(fallback.rows),
                    self.cols.unwrap_or(fallback.cols),
                    self.mine_count.unwrap_or(fallback.mine_count),
                )
            }
        }
    }
}

/// Engine settings as stored by a host, e.g.
///
/// ```toml
/// [minefield]
/// difficulty = "custom"
/// rows = 12
/// cols = 20
/// mine_count = 30
///
/// [merge]
/// win_target = 4096
///
/// [stack]
/// lines_per_level = 8
/// ```
///
/// Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub minefield: MinefieldSettings,
    pub merge: MergeConfig,
    pub stack: StackConfig,
}

impl Settings {
    pub fn from_toml_str(source: &str) -> core::result::Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(source)?;
        settings.validate()?;
        log::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.minefield.config().validate()?;
        self.merge.validate()?;
        self.stack.validate()?;
        Ok(())
    }

    pub fn minefield_config(&self) -> MinefieldConfig {
        self.minefield.config()
    }
}
