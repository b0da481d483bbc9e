use puzzlebox_core::minefield::Difficulty;
use puzzlebox_core::{GameStatus, MergeSnapshot, MinefieldSnapshot, StackSnapshot};
use serde::{Deserialize, Serialize};

use crate::GameId;

/// Per-game details stored next to a score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "kebab-case")]
pub enum ScoreMetadata {
    Minefield {
        difficulty: Difficulty,
        rows: u8,
        cols: u8,
        mine_count: u16,
        elapsed_secs: u64,
    },
    TileMerge {
        move_count: u32,
        highest_tile: u32,
    },
    BlockStack {
        level: u32,
        lines: u32,
    },
}

impl ScoreMetadata {
    pub const fn game(&self) -> GameId {
        match self {
            Self::Minefield { .. } => GameId::Minefield,
            Self::TileMerge { .. } => GameId::TileMerge,
            Self::BlockStack { .. } => GameId::BlockStack,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub game: GameId,
    pub score: u32,
    pub metadata: ScoreMetadata,
}

impl ScoreReport {
    pub fn new(score: u32, metadata: ScoreMetadata) -> Self {
        Self {
            game: metadata.game(),
            score,
            metadata,
        }
    }

    /// Only a cleared minefield scores.
    pub fn from_minefield(snapshot: &MinefieldSnapshot) -> Option<Self> {
        if snapshot.status != GameStatus::Won {
            return None;
        }
        let config = snapshot.config;
        Some(Self::new(
            snapshot.score,
            ScoreMetadata::Minefield {
                difficulty: config.difficulty,
                rows: config.rows,
                cols: config.cols,
                mine_count: config.mine_count,
                elapsed_secs: snapshot.elapsed_secs,
            },
        ))
    }

    /// Reported when the grid is won or stuck.
    pub fn from_merge(snapshot: &MergeSnapshot) -> Option<Self> {
        if !snapshot.status.is_terminal() {
            return None;
        }
        Some(Self::new(
            snapshot.score,
            ScoreMetadata::TileMerge {
                move_count: snapshot.move_count,
                highest_tile: snapshot.highest_tile,
            },
        ))
    }

    pub fn from_stack(snapshot: &StackSnapshot) -> Option<Self> {
        if snapshot.status != GameStatus::Lost {
            return None;
        }
        Some(Self::new(
            snapshot.score,
            ScoreMetadata::BlockStack {
                level: snapshot.level,
                lines: snapshot.cleared_lines,
            },
        ))
    }
}
