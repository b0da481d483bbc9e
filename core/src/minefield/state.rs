use std::collections::VecDeque;

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::*;
use crate::*;

/// Authoritative minefield board and game status.
///
/// Mines are placed on the first reveal, so the board is all-safe while the
/// game is idle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinefieldState {
    config: MinefieldConfig,
    board: Array2<Cell>,
    status: GameStatus,
    mines_placed: bool,
    flagged_count: CellCount,
    revealed_safe_count: CellCount,
    started_at_ms: Option<u64>,
    ended_at_ms: Option<u64>,
    score: u32,
    triggered_mine: Option<Coord2>,
}

impl MinefieldState {
    /// Fails on a config that could never be played, see
    /// [`MinefieldConfig::validate`].
    pub fn new(config: MinefieldConfig) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            config,
            board: Array2::default(config.size().to_nd_index()),
            status: GameStatus::Idle,
            mines_placed: false,
            flagged_count: 0,
            revealed_safe_count: 0,
            started_at_ms: None,
            ended_at_ms: None,
            score: 0,
            triggered_mine: None,
        })
    }

    pub fn config(&self) -> MinefieldConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.config
            .contains(coords)
            .then(|| self.board[coords.to_nd_index()])
    }

    pub fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    /// Mine count minus flags placed; negative when over-flagged.
    pub fn remaining_mine_count(&self) -> i32 {
        i32::from(self.config.mine_count) - i32::from(self.flagged_count)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    pub fn ended_at_ms(&self) -> Option<u64> {
        self.ended_at_ms
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Whole seconds since the first reveal, frozen once the game ended.
    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        match self.started_at_ms {
            Some(started) => self.ended_at_ms.unwrap_or(now_ms).saturating_sub(started) / 1000,
            None => 0,
        }
    }

    /// Flagged cells that do not hold a mine. Only meaningful once mines exist.
    pub fn wrong_flags(&self) -> Vec<Coord2> {
        self.iter_coords()
            .filter(|&pos| {
                let cell = self.board[pos.to_nd_index()];
                cell.is_flagged() && !cell.is_mine
            })
            .collect()
    }

    pub fn can_chord(&self, coords: Coord2) -> bool {
        if !self.status.is_playing() || !self.config.contains(coords) {
            return false;
        }
        let cell = self.board[coords.to_nd_index()];
        cell.is_revealed()
            && cell.neighbor_mine_count > 0
            && cell.neighbor_mine_count == self.count_flagged_neighbors(coords)
            && self
                .board
                .iter_neighbors(coords)
                .any(|pos| self.board[pos.to_nd_index()].is_hidden())
    }

    pub fn reveal<R: Rng + ?Sized>(&mut self, coords: Coord2, rng: &mut R, now_ms: u64) -> bool {
        if self.status.is_terminal() || !self.config.contains(coords) {
            return false;
        }
        if !self.board[coords.to_nd_index()].is_hidden() {
            return false;
        }

        if !self.mines_placed {
            self.lay_mines(coords, rng);
            self.status = GameStatus::Playing;
            self.started_at_ms = Some(now_ms);
            log::debug!("Minefield started at {} from {:?}", now_ms, coords);
        }

        self.open_cell(coords, now_ms);
        true
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> bool {
        if self.status.is_terminal() || !self.config.contains(coords) {
            return false;
        }

        let cell = &mut self.board[coords.to_nd_index()];
        match cell.visibility {
            Visibility::Hidden => {
                cell.visibility = Visibility::Flagged;
                self.flagged_count += 1;
                true
            }
            Visibility::Flagged => {
                cell.visibility = Visibility::Hidden;
                self.flagged_count -= 1;
                true
            }
            Visibility::Revealed | Visibility::Questioned => false,
        }
    }

    /// Hidden -> flagged -> questioned -> hidden.
    pub fn cycle_mark(&mut self, coords: Coord2) -> bool {
        if self.status.is_terminal() || !self.config.contains(coords) {
            return false;
        }

        let cell = &mut self.board[coords.to_nd_index()];
        match cell.visibility {
            Visibility::Hidden => {
                cell.visibility = Visibility::Flagged;
                self.flagged_count += 1;
            }
            Visibility::Flagged => {
                cell.visibility = Visibility::Questioned;
                self.flagged_count -= 1;
            }
            Visibility::Questioned => cell.visibility = Visibility::Hidden,
            Visibility::Revealed => return false,
        }
        true
    }

    pub fn auto_reveal_neighbors(&mut self, coords: Coord2, now_ms: u64) -> bool {
        if !self.can_chord(coords) {
            return false;
        }

        let hidden: Vec<Coord2> = self
            .board
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos.to_nd_index()].is_hidden())
            .collect();
        log::trace!("Chord at {:?} opens {:?}", coords, hidden);

        for pos in hidden {
            if self.status.is_terminal() {
                break;
            }
            self.open_cell(pos, now_ms);
        }
        true
    }

    /// Back to idle. An invalid replacement config leaves the game untouched.
    pub fn restart(&mut self, config: Option<MinefieldConfig>) -> Result<()> {
        *self = Self::new(config.unwrap_or(self.config))?;
        Ok(())
    }

    fn lay_mines<R: Rng + ?Sized>(&mut self, start: Coord2, rng: &mut R) {
        let mines = place_mines(&self.config, start, rng);
        for pos in self.iter_coords().collect::<Vec<_>>() {
            let index = pos.to_nd_index();
            self.board[index].is_mine = mines[index];
            self.board[index].neighbor_mine_count = adjacent_mine_count(&mines, pos);
        }
        self.mines_placed = true;
    }

    /// Opens one hidden cell, flooding outwards from zeros.
    fn open_cell(&mut self, coords: Coord2, now_ms: u64) {
        let cell = self.board[coords.to_nd_index()];
        if !cell.is_hidden() {
            return;
        }

        if cell.is_mine {
            self.board[coords.to_nd_index()].visibility = Visibility::Revealed;
            self.triggered_mine = Some(coords);
            self.end_game(false, now_ms);
            return;
        }

        let mut to_visit = VecDeque::from([coords]);
        while let Some(visit_coords) = to_visit.pop_front() {
            let visit = &mut self.board[visit_coords.to_nd_index()];
            if !visit.is_hidden() || visit.is_mine {
                continue;
            }
            visit.visibility = Visibility::Revealed;
            self.revealed_safe_count += 1;

            if visit.neighbor_mine_count == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.board[pos.to_nd_index()].is_hidden()),
                );
            }
        }
        log::trace!(
            "Opened {:?}, {} safe cells revealed",
            coords,
            self.revealed_safe_count
        );

        if self.revealed_safe_count == self.config.safe_cell_count() {
            self.end_game(true, now_ms);
        }
    }

    fn end_game(&mut self, won: bool, now_ms: u64) {
        if self.status.is_terminal() {
            return;
        }

        self.status = if won { GameStatus::Won } else { GameStatus::Lost };
        self.ended_at_ms = Some(now_ms);

        for cell in self.board.iter_mut().filter(|cell| cell.is_mine) {
            match (won, cell.visibility) {
                (true, Visibility::Hidden | Visibility::Questioned) => {
                    cell.visibility = Visibility::Flagged;
                    self.flagged_count += 1;
                }
                (false, Visibility::Hidden | Visibility::Questioned) => {
                    cell.visibility = Visibility::Revealed;
                }
                _ => {}
            }
        }

        if won {
            self.score = self.compute_score(now_ms);
        }
        log::debug!(
            "Minefield ended at {} ({:?}), score {}",
            now_ms,
            self.status,
            self.score
        );
    }

    fn compute_score(&self, now_ms: u64) -> u32 {
        let elapsed = u32::try_from(self.elapsed_secs(now_ms)).unwrap_or(u32::MAX);
        let time_bonus = 1000u32.saturating_sub(elapsed);
        let mine_bonus = u32::from(self.config.mine_count) * 10;
        (time_bonus + mine_bonus) * self.config.difficulty.score_multiplier()
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.board
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos.to_nd_index()].is_flagged())
            .count() as u8
    }

    fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.config.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    #[cfg(test)]
    pub(crate) fn with_mines(config: MinefieldConfig, mine_coords: &[Coord2]) -> Self {
        let mut state = Self::new(config).unwrap();
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        for &pos in mine_coords {
            mines[pos.to_nd_index()] = true;
        }
        for pos in state.iter_coords().collect::<Vec<_>>() {
            let index = pos.to_nd_index();
            state.board[index].is_mine = mines[index];
            state.board[index].neighbor_mine_count = adjacent_mine_count(&mines, pos);
        }
        state.mines_placed = true;
        state.status = GameStatus::Playing;
        state.started_at_ms = Some(0);
        state
    }
}
