//! Tile merge: slide a square grid of powers of two, merge equal neighbours
//! once per move, undo through a bounded history.

use serde::{Deserialize, Serialize};

pub use config::*;
pub use engine::*;
pub use history::*;
pub use line::*;
pub use state::*;

mod config;
mod engine;
mod history;
mod line;
mod state;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

/// A grid cell. `value` is 0 for empty, otherwise a power of two of at least 2.
/// `is_new` and `is_merged` describe the last move only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub value: u32,
    pub is_new: bool,
    pub is_merged: bool,
}

impl Tile {
    pub const EMPTY: Tile = Tile::with_value(0);

    pub const fn with_value(value: u32) -> Self {
        Self {
            value,
            is_new: false,
            is_merged: false,
        }
    }

    pub const fn is_empty(self) -> bool {
        self.value == 0
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub moved: bool,
    pub score_increase: u32,
    /// The move pushed a tile to the win target and ended the game as won.
    pub reached_target: bool,
}
