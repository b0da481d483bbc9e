use rand::Rng;
use serde::{Deserialize, Serialize};

use super::*;
use crate::*;

/// What a lock produced, kept for renderers that animate clears.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockReport {
    pub cleared_rows: Vec<usize>,
    pub points: u32,
    pub leveled_up: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackState {
    config: StackConfig,
    board: StackBoard,
    current: Option<Piece>,
    next: PieceKind,
    status: GameStatus,
    score: u32,
    level: u32,
    cleared_lines: u32,
    drop_speed_ms: u64,
    last_drop_ms: u64,
    drop_bonus: u32,
    last_lock: Option<LockReport>,
}

impl StackState {
    pub fn new<R: Rng + ?Sized>(config: StackConfig, rng: &mut R) -> Self {
        Self {
            config,
            board: StackBoard::new(config.width, config.height),
            current: None,
            next: PieceKind::random(rng),
            status: GameStatus::Idle,
            score: 0,
            level: 1,
            cleared_lines: 0,
            drop_speed_ms: config.initial_speed_ms,
            last_drop_ms: 0,
            drop_bonus: 0,
            last_lock: None,
        }
    }

    /// Resumes play from a known board and falling piece.
    pub fn from_parts(
        config: StackConfig,
        board: StackBoard,
        current: Piece,
        next: PieceKind,
        now_ms: u64,
    ) -> Result<Self> {
        if board.width() != usize::from(config.width) || board.height() != usize::from(config.height) {
            return Err(GameError::InvalidDimensions);
        }
        if !board.fits(&current) {
            return Err(GameError::InvalidCoords);
        }
        Ok(Self {
            config,
            board,
            current: Some(current),
            next,
            status: GameStatus::Playing,
            score: 0,
            level: 1,
            cleared_lines: 0,
            drop_speed_ms: config.initial_speed_ms,
            last_drop_ms: now_ms,
            drop_bonus: 0,
            last_lock: None,
        })
    }

    pub fn config(&self) -> StackConfig {
        self.config
    }

    pub fn board(&self) -> &StackBoard {
        &self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    pub fn drop_speed_ms(&self) -> u64 {
        self.drop_speed_ms
    }

    pub fn last_drop_ms(&self) -> u64 {
        self.last_drop_ms
    }

    pub fn pending_drop_bonus(&self) -> u32 {
        self.drop_bonus
    }

    pub fn last_lock(&self) -> Option<&LockReport> {
        self.last_lock.as_ref()
    }

    pub fn can_pause(&self) -> bool {
        self.status.is_playing()
    }

    /// Row the current piece would land on if hard-dropped.
    pub fn ghost_row(&self) -> Option<i16> {
        self.current.map(|piece| self.board.ghost_y(&piece))
    }

    pub fn start<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> bool {
        if !self.status.is_idle() {
            return false;
        }
        self.status = GameStatus::Playing;
        self.last_drop_ms = now_ms;
        self.spawn(rng);
        log::debug!("Block stack started at {}", now_ms);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    /// One manual step down worth one point; locks when the piece is resting.
    pub fn soft_drop<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        if self.try_shift(0, 1) {
            self.drop_bonus += SOFT_DROP_POINTS_PER_CELL;
        } else {
            self.lock_and_spawn(rng);
        }
        true
    }

    /// Next rotation state in place, then each wall kick in order.
    pub fn rotate(&mut self) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let rotated = piece.rotated();
        if rotated.rotation == piece.rotation {
            return false;
        }

        let candidates = std::iter::once((0, 0)).chain(WALL_KICKS);
        for (dx, dy) in candidates {
            let kicked = rotated.shifted(dx, dy);
            if self.board.fits(&kicked) {
                log::trace!("Rotated {:?} with kick ({}, {})", piece.kind, dx, dy);
                self.current = Some(kicked);
                return true;
            }
        }
        false
    }

    pub fn hard_drop<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let ghost_y = self.board.ghost_y(&piece);
        let distance = u32::try_from(ghost_y - piece.y).unwrap_or(0);
        self.current = Some(Piece { y: ghost_y, ..piece });
        self.drop_bonus += distance * HARD_DROP_POINTS_PER_CELL;
        self.lock_and_spawn(rng);
        true
    }

    /// Scheduler entry point: one gravity step once `drop_speed_ms` has passed
    /// since the last one.
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        if now_ms.saturating_sub(self.last_drop_ms) < self.drop_speed_ms {
            return false;
        }

        self.last_drop_ms = now_ms;
        if !self.try_shift(0, 1) {
            self.lock_and_spawn(rng);
        }
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    pub fn resume(&mut self, now_ms: u64) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        self.last_drop_ms = now_ms;
        true
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::new(self.config, rng);
    }

    fn try_shift(&mut self, dx: i16, dy: i16) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let moved = piece.shifted(dx, dy);
        if self.board.fits(&moved) {
            self.current = Some(moved);
            true
        } else {
            false
        }
    }

    fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let piece = Piece::spawn(self.next, self.config.width);
        self.next = PieceKind::random(rng);
        self.current = Some(piece);
        self.drop_bonus = 0;

        if !self.board.fits(&piece) {
            self.status = GameStatus::Lost;
            log::debug!(
                "Spawn of {:?} blocked, game over with score {} at level {}",
                piece.kind,
                self.score,
                self.level
            );
        }
    }

    fn lock_and_spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.board.lock(&piece);
        let cleared_rows = self.board.clear_full_rows();
        let lines = cleared_rows.len();

        let points = line_clear_points(lines, self.level) + self.drop_bonus;
        self.score += points;
        self.cleared_lines += lines as u32;

        let level = level_for_lines(self.cleared_lines, self.config.lines_per_level);
        let leveled_up = level > self.level;
        if leveled_up {
            self.level = level;
            self.drop_speed_ms = drop_speed_ms(&self.config, level);
            log::debug!("Level {} reached, drop speed {} ms", level, self.drop_speed_ms);
        }
        log::trace!("Locked {:?}, cleared {:?}, +{} points", piece.kind, cleared_rows, points);

        self.last_lock = Some(LockReport {
            cleared_rows,
            points,
            leveled_up,
        });
        self.spawn(rng);
    }
}
