//! Wiring between the engines and a host's score persistence.
//!
//! Engines never save scores themselves. Whoever owns an engine turns its final
//! snapshot into a [`ScoreReport`] and hands it to a [`ScoreStore`].

use serde::{Deserialize, Serialize};

pub use error::*;
pub use report::*;
pub use store::*;

mod error;
mod report;
mod store;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameId {
    Minefield,
    TileMerge,
    BlockStack,
}

impl GameId {
    pub const ALL: [GameId; 3] = [Self::Minefield, Self::TileMerge, Self::BlockStack];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minefield => "minefield",
            Self::TileMerge => "tile-merge",
            Self::BlockStack => "block-stack",
        }
    }

    /// Versioned key a host can file this game's scores under.
    pub fn storage_key(self) -> String {
        format!("puzzlebox:scores:v1:{}", self.as_str())
    }
}

impl core::fmt::Display for GameId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
