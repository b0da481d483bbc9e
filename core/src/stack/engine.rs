use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::*;
use crate::*;

/// The falling piece as a renderer needs it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub kind: PieceKind,
    pub x: i16,
    pub y: i16,
    pub rotation: usize,
    pub cells: [(i16, i16); 4],
    pub shape_matrix: Vec<Vec<bool>>,
}

impl From<Piece> for PieceView {
    fn from(piece: Piece) -> Self {
        Self {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
            rotation: piece.rotation,
            cells: piece.cells(),
            shape_matrix: piece.shape_matrix(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackSnapshot {
    pub status: GameStatus,
    pub config: StackConfig,
    pub board: Array2<Option<PieceKind>>,
    pub current: Option<PieceView>,
    pub ghost_cells: Option<[(i16, i16); 4]>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub cleared_lines: u32,
    pub drop_speed_ms: u64,
    pub last_drop_ms: u64,
    pub can_pause: bool,
    pub last_lock: Option<LockReport>,
}

impl StackSnapshot {
    pub fn from_state(state: &StackState) -> Self {
        let ghost_cells = state
            .current()
            .zip(state.ghost_row())
            .map(|(piece, y)| Piece { y, ..piece }.cells());

        Self {
            status: state.status(),
            config: state.config(),
            board: state.board().cells().clone(),
            current: state.current().map(PieceView::from),
            ghost_cells,
            next: state.next(),
            score: state.score(),
            level: state.level(),
            cleared_lines: state.cleared_lines(),
            drop_speed_ms: state.drop_speed_ms(),
            last_drop_ms: state.last_drop_ms(),
            can_pause: state.can_pause(),
            last_lock: state.last_lock().cloned(),
        }
    }

    /// Board cell with the falling piece drawn over it.
    pub fn cell_at(&self, x: i16, y: i16) -> Option<PieceKind> {
        let falling = self
            .current
            .as_ref()
            .filter(|piece| piece.cells.contains(&(x, y)));
        if let Some(piece) = falling {
            return Some(piece.kind);
        }
        let index = [usize::try_from(y).ok()?, usize::try_from(x).ok()?];
        self.board.get(index).copied().flatten()
    }
}

/// Block-stack façade. Time comes in from the caller on `start`, `tick` and
/// `resume`; the engine never schedules itself.
pub struct StackEngine<R = SmallRng> {
    state: StackState,
    rng: R,
    observers: Observers<StackSnapshot>,
}

impl StackEngine {
    pub fn with_seed(config: StackConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> StackEngine<R> {
    pub fn new(config: StackConfig, mut rng: R) -> Self {
        let state = StackState::new(config, &mut rng);
        Self::from_state(state, rng)
    }

    pub fn from_state(state: StackState, rng: R) -> Self {
        Self {
            state,
            rng,
            observers: Observers::new(),
        }
    }

    pub fn state(&self) -> StackSnapshot {
        StackSnapshot::from_state(&self.state)
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn ghost_row(&self) -> Option<i16> {
        self.state.ghost_row()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StackSnapshot) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn start(&mut self, now_ms: u64) -> bool {
        let changed = self.state.start(now_ms, &mut self.rng);
        self.notify_if(changed)
    }

    pub fn move_left(&mut self) -> bool {
        let changed = self.state.move_left();
        self.notify_if(changed)
    }

    pub fn move_right(&mut self) -> bool {
        let changed = self.state.move_right();
        self.notify_if(changed)
    }

    pub fn soft_drop(&mut self) -> bool {
        let changed = self.state.soft_drop(&mut self.rng);
        self.notify_if(changed)
    }

    pub fn rotate(&mut self) -> bool {
        let changed = self.state.rotate();
        self.notify_if(changed)
    }

    pub fn hard_drop(&mut self) -> bool {
        let changed = self.state.hard_drop(&mut self.rng);
        self.notify_if(changed)
    }

    /// Call at least every `MIN_DROP_SPEED_MS` with the current time.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let changed = self.state.tick(now_ms, &mut self.rng);
        self.notify_if(changed)
    }

    pub fn pause(&mut self) -> bool {
        let changed = self.state.pause();
        self.notify_if(changed)
    }

    pub fn resume(&mut self, now_ms: u64) -> bool {
        let changed = self.state.resume(now_ms);
        self.notify_if(changed)
    }

    /// Back to idle with an empty board.
    pub fn restart(&mut self) {
        self.state.restart(&mut self.rng);
        self.notify_if(true);
    }

    pub fn destroy(&mut self) {
        self.observers.clear();
    }

    fn notify_if(&mut self, changed: bool) -> bool {
        if changed {
            let state = &self.state;
            self.observers.notify_with(|| StackSnapshot::from_state(state));
        }
        changed
    }
}
