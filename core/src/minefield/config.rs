use serde::{Deserialize, Serialize};

use crate::*;

pub const CUSTOM_MIN_SIDE: Coord = 5;
pub const CUSTOM_MAX_SIDE: Coord = 50;

/// Named presets. The difficulty only feeds the score multiplier; the board
/// itself is fully described by [`MinefieldConfig`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
    Custom,
}

impl Difficulty {
    pub const fn score_multiplier(self) -> u32 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Expert => 3,
            Self::Custom => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinefieldConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mine_count: CellCount,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl MinefieldConfig {
    pub const fn new_unchecked(
        rows: Coord,
        cols: Coord,
        mine_count: CellCount,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            rows,
            cols,
            mine_count,
            difficulty,
        }
    }

    /// Validated constructor, `0 < mine_count < rows * cols`.
    pub fn new(rows: Coord, cols: Coord, mine_count: CellCount) -> Result<Self> {
        Self::new_unchecked(rows, cols, mine_count, Difficulty::Custom).validate()
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10, Difficulty::Beginner)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40, Difficulty::Intermediate)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(16, 30, 99, Difficulty::Expert)
    }

    pub const fn preset(difficulty: Difficulty) -> Option<Self> {
        match difficulty {
            Difficulty::Beginner => Some(Self::beginner()),
            Difficulty::Intermediate => Some(Self::intermediate()),
            Difficulty::Expert => Some(Self::expert()),
            Difficulty::Custom => None,
        }
    }

    /// Player-entered board: sides clamped to `[5, 50]`, mines clamped to
    /// `[1, floor(rows * cols * 0.8)]`.
    pub fn custom(rows: Coord, cols: Coord, mine_count: CellCount) -> Self {
        let clamped_rows = rows.clamp(CUSTOM_MIN_SIDE, CUSTOM_MAX_SIDE);
        let clamped_cols = cols.clamp(CUSTOM_MIN_SIDE, CUSTOM_MAX_SIDE);
        let max_mines = mult(clamped_rows, clamped_cols) * 4 / 5;
        let clamped_mines = mine_count.clamp(1, max_mines);

        if (clamped_rows, clamped_cols, clamped_mines) != (rows, cols, mine_count) {
            log::warn!(
                "Custom minefield {}x{}/{} clamped to {}x{}/{}",
                rows,
                cols,
                mine_count,
                clamped_rows,
                clamped_cols,
                clamped_mines
            );
        }

        Self::new_unchecked(clamped_rows, clamped_cols, clamped_mines, Difficulty::Custom)
    }

    pub fn validate(self) -> Result<Self> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.mine_count == 0 {
            return Err(GameError::NoMines);
        }
        if self.mine_count >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(self)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.rows && col < self.cols
    }
}

impl Default for MinefieldConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_clamps_sides_and_mines() {
        let config = MinefieldConfig::custom(2, 80, 5000);
        assert_eq!(config.rows, 5);
        assert_eq!(config.cols, 50);
        assert_eq!(config.mine_count, 200);
        assert_eq!(config.difficulty, Difficulty::Custom);

        let config = MinefieldConfig::custom(10, 10, 0);
        assert_eq!(config.mine_count, 1);
    }

    #[test]
    fn new_rejects_degenerate_boards() {
        assert_eq!(MinefieldConfig::new(0, 9, 1), Err(GameError::InvalidDimensions));
        assert_eq!(MinefieldConfig::new(9, 9, 0), Err(GameError::NoMines));
        assert_eq!(MinefieldConfig::new(3, 3, 9), Err(GameError::TooManyMines));
        assert!(MinefieldConfig::new(3, 3, 8).is_ok());
    }

    #[test]
    fn overfull_board_has_no_safe_cells() {
        let config = MinefieldConfig::new_unchecked(3, 3, 10, Difficulty::Custom);
        assert_eq!(config.safe_cell_count(), 0);
    }

    #[test]
    fn presets_are_valid() {
        for difficulty in [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Expert] {
            let config = MinefieldConfig::preset(difficulty).unwrap();
            assert_eq!(config.validate(), Ok(config));
            assert_eq!(config.difficulty, difficulty);
        }
        assert_eq!(MinefieldConfig::preset(Difficulty::Custom), None);
    }
}
