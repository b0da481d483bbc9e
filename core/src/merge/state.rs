use ndarray::Array2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::*;
use crate::*;

/// Probability that a spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Draws the value of a freshly spawned tile.
pub fn spawn_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.random_bool(SPAWN_TWO_PROBABILITY) { 2 } else { 4 }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergeState {
    config: MergeConfig,
    board: Array2<Tile>,
    status: GameStatus,
    score: u32,
    best_score: u32,
    move_count: u32,
    highest_tile: u32,
    best_tile: u32,
    keep_playing: bool,
    history: History,
}

impl MergeState {
    pub fn new(config: MergeConfig) -> Self {
        let side = usize::from(config.size);
        Self {
            config,
            board: Array2::default([side, side]),
            status: GameStatus::Idle,
            score: 0,
            best_score: 0,
            move_count: 0,
            highest_tile: 0,
            best_tile: 0,
            keep_playing: false,
            history: History::new(config.history_limit),
        }
    }

    /// Resumes play from a known grid, e.g. a saved game or a puzzle setup.
    pub fn from_values(config: MergeConfig, values: Array2<u32>) -> Result<Self> {
        let side = usize::from(config.size);
        if values.dim() != (side, side) {
            return Err(GameError::InvalidDimensions);
        }
        if let Some(&bad) = values
            .iter()
            .find(|&&value| value != 0 && (value < 2 || !value.is_power_of_two()))
        {
            return Err(GameError::InvalidTile(bad));
        }

        let mut state = Self::new(config);
        state.board = values.mapv(Tile::with_value);
        state.highest_tile = state.max_value();
        state.best_tile = state.highest_tile;
        state.status = GameStatus::Playing;
        Ok(state)
    }

    pub fn config(&self) -> MergeConfig {
        self.config
    }

    pub fn board(&self) -> &Array2<Tile> {
        &self.board
    }

    pub fn values(&self) -> Array2<u32> {
        self.board.mapv(|tile| tile.value)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn highest_tile(&self) -> u32 {
        self.highest_tile
    }

    pub fn best_tile(&self) -> u32 {
        self.best_tile
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Seeds the bests from external storage; never lowers them.
    pub fn set_best(&mut self, best_score: u32, best_tile: u32) {
        self.best_score = self.best_score.max(best_score);
        self.best_tile = self.best_tile.max(best_tile);
    }

    /// True iff a cell is empty or two orthogonal neighbours share a value.
    pub fn can_move(&self) -> bool {
        let (rows, cols) = self.board.dim();
        for row in 0..rows {
            for col in 0..cols {
                let value = self.board[[row, col]].value;
                if value == 0 {
                    return true;
                }
                if col + 1 < cols && self.board[[row, col + 1]].value == value {
                    return true;
                }
                if row + 1 < rows && self.board[[row + 1, col]].value == value {
                    return true;
                }
            }
        }
        false
    }

    /// Idle -> playing with two starting tiles.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.status.is_idle() {
            return false;
        }
        self.spawn_tile(rng);
        self.spawn_tile(rng);
        self.highest_tile = self.max_value();
        self.best_tile = self.best_tile.max(self.highest_tile);
        self.status = GameStatus::Playing;
        log::debug!("Tile merge started on a {0}x{0} grid", self.config.size);
        true
    }

    pub fn move_tiles<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> MoveOutcome {
        if !self.status.is_playing() {
            return MoveOutcome::default();
        }

        // slid into a copy; the board is only replaced once something moved
        let side = usize::from(self.config.size);
        let mut board = self.board.clone();
        let mut moved = false;
        let mut score_increase = 0;
        for line in 0..side {
            let coords: Vec<[usize; 2]> = (0..side)
                .map(|step| line_coords(direction, line, step, side))
                .collect();
            let values: Vec<u32> = coords.iter().map(|&pos| self.board[pos].value).collect();
            let slide = slide_line(&values);

            for (step, &pos) in coords.iter().enumerate() {
                if self.board[pos].value != slide.values[step] {
                    moved = true;
                }
                board[pos] = Tile {
                    value: slide.values[step],
                    is_new: false,
                    is_merged: slide.merged[step],
                };
            }
            score_increase += slide.score;
        }

        if !moved {
            return MoveOutcome::default();
        }

        let before = HistoryEntry {
            board: std::mem::replace(&mut self.board, board),
            score: self.score,
            move_count: self.move_count,
        };
        self.history.push(before);
        self.score += score_increase;
        self.move_count += 1;
        self.spawn_tile(rng);
        self.highest_tile = self.max_value();
        self.best_score = self.best_score.max(self.score);
        self.best_tile = self.best_tile.max(self.highest_tile);

        let mut reached_target = false;
        if !self.keep_playing && self.highest_tile >= self.config.win_target {
            self.status = GameStatus::Won;
            reached_target = true;
            log::debug!("Reached {} after {} moves", self.highest_tile, self.move_count);
        } else if !self.can_move() {
            self.status = GameStatus::Lost;
            log::debug!("No moves left after {} moves, score {}", self.move_count, self.score);
        }

        MoveOutcome {
            moved: true,
            score_increase,
            reached_target,
        }
    }

    pub fn undo(&mut self) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        let Some(entry) = self.history.pop() else {
            return false;
        };

        self.board = entry.board;
        for tile in self.board.iter_mut() {
            tile.is_new = false;
            tile.is_merged = false;
        }
        self.score = entry.score;
        self.move_count = entry.move_count;
        self.highest_tile = self.max_value();
        true
    }

    /// Won -> playing on the same board; the target no longer ends the game.
    pub fn continue_game(&mut self) -> bool {
        if self.status != GameStatus::Won {
            return false;
        }
        self.keep_playing = true;
        self.status = GameStatus::Playing;
        true
    }

    /// Back to idle with an empty grid. Bests survive.
    pub fn restart(&mut self) {
        let (best_score, best_tile) = (self.best_score, self.best_tile);
        *self = Self::new(self.config);
        self.set_best(best_score, best_tile);
    }

    fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<[usize; 2]> {
        let empty: Vec<[usize; 2]> = self
            .board
            .indexed_iter()
            .filter(|(_, tile)| tile.is_empty())
            .map(|((row, col), _)| [row, col])
            .collect();
        let &pos = empty.choose(rng)?;

        self.board[pos] = Tile {
            value: spawn_value(rng),
            is_new: true,
            is_merged: false,
        };
        log::trace!("Spawned {} at {:?}", self.board[pos].value, pos);
        Some(pos)
    }

    fn max_value(&self) -> u32 {
        self.board.iter().map(|tile| tile.value).max().unwrap_or(0)
    }
}

/// Board position of the `step`-th cell of `line`, counted from the edge the
/// tiles slide towards.
fn line_coords(direction: Direction, line: usize, step: usize, side: usize) -> [usize; 2] {
    match direction {
        Direction::Left => [line, step],
        Direction::Right => [line, side - 1 - step],
        Direction::Up => [step, line],
        Direction::Down => [side - 1 - step, line],
    }
}
