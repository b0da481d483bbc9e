use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::*;
use crate::*;

/// Read-only copy of the minefield handed to listeners and renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinefieldSnapshot {
    pub status: GameStatus,
    pub config: MinefieldConfig,
    pub cells: Array2<Cell>,
    pub remaining_mine_count: i32,
    pub revealed_safe_count: CellCount,
    pub started_at_ms: Option<u64>,
    pub ended_at_ms: Option<u64>,
    pub elapsed_secs: u64,
    pub score: u32,
    pub triggered_mine: Option<Coord2>,
    pub wrong_flags: Vec<Coord2>,
}

impl MinefieldSnapshot {
    pub fn from_state(state: &MinefieldState, now_ms: u64) -> Self {
        Self {
            status: state.status(),
            config: state.config(),
            cells: state.board().clone(),
            remaining_mine_count: state.remaining_mine_count(),
            revealed_safe_count: state.revealed_safe_count(),
            started_at_ms: state.started_at_ms(),
            ended_at_ms: state.ended_at_ms(),
            elapsed_secs: state.elapsed_secs(now_ms),
            score: state.score(),
            triggered_mine: state.triggered_mine(),
            wrong_flags: if state.status() == GameStatus::Lost {
                state.wrong_flags()
            } else {
                Vec::new()
            },
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}

/// Minefield façade: owns the state, the random source and the clock, and
/// notifies listeners after every command that changed something.
pub struct MinefieldEngine<R = SmallRng, C = SystemClock> {
    state: MinefieldState,
    rng: R,
    clock: C,
    observers: Observers<MinefieldSnapshot>,
}

impl MinefieldEngine {
    pub fn with_seed(config: MinefieldConfig, seed: u64) -> Result<Self> {
        Self::new(config, SmallRng::seed_from_u64(seed), SystemClock)
    }
}

impl<R: Rng, C: Clock> MinefieldEngine<R, C> {
    /// Fails on a config that could never be played.
    pub fn new(config: MinefieldConfig, rng: R, clock: C) -> Result<Self> {
        Ok(Self {
            state: MinefieldState::new(config)?,
            rng,
            clock,
            observers: Observers::new(),
        })
    }

    pub fn state(&self) -> MinefieldSnapshot {
        MinefieldSnapshot::from_state(&self.state, self.clock.now_ms())
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&MinefieldSnapshot) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn reveal(&mut self, coords: Coord2) -> bool {
        let now = self.clock.now_ms();
        let changed = self.state.reveal(coords, &mut self.rng, now);
        self.notify_if(changed)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> bool {
        let changed = self.state.toggle_flag(coords);
        self.notify_if(changed)
    }

    pub fn cycle_mark(&mut self, coords: Coord2) -> bool {
        let changed = self.state.cycle_mark(coords);
        self.notify_if(changed)
    }

    pub fn can_chord(&self, coords: Coord2) -> bool {
        self.state.can_chord(coords)
    }

    pub fn auto_reveal_neighbors(&mut self, coords: Coord2) -> bool {
        let now = self.clock.now_ms();
        let changed = self.state.auto_reveal_neighbors(coords, now);
        self.notify_if(changed)
    }

    /// Listeners are only told about a restart that happened.
    pub fn restart(&mut self, config: Option<MinefieldConfig>) -> Result<()> {
        self.state.restart(config)?;
        self.notify_if(true);
        Ok(())
    }

    /// Drops every listener. The engine stays usable.
    pub fn destroy(&mut self) {
        self.observers.clear();
    }

    fn notify_if(&mut self, changed: bool) -> bool {
        if changed {
            let now = self.clock.now_ms();
            let state = &self.state;
            self.observers
                .notify_with(|| MinefieldSnapshot::from_state(state, now));
        }
        changed
    }
}
