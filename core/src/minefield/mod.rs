//! Minefield sweep: lazy mine placement with a guaranteed safe opening, flood
//! reveal, flag/question marks and chord reveal.

use serde::{Deserialize, Serialize};

pub use config::*;
pub use engine::*;
pub use layout::*;
pub use state::*;

mod config;
mod engine;
mod layout;
mod state;

/// What the player sees of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
    Flagged,
    Questioned,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub neighbor_mine_count: u8,
    pub visibility: Visibility,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        matches!(self.visibility, Visibility::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.visibility, Visibility::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.visibility, Visibility::Flagged)
    }
}
