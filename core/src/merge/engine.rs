use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::*;
use crate::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergeSnapshot {
    pub status: GameStatus,
    pub config: MergeConfig,
    pub tiles: Array2<Tile>,
    pub score: u32,
    pub best_score: u32,
    pub move_count: u32,
    pub highest_tile: u32,
    pub best_tile: u32,
    pub can_undo: bool,
}

impl MergeSnapshot {
    pub fn from_state(state: &MergeState) -> Self {
        Self {
            status: state.status(),
            config: state.config(),
            tiles: state.board().clone(),
            score: state.score(),
            best_score: state.best_score(),
            move_count: state.move_count(),
            highest_tile: state.highest_tile(),
            best_tile: state.best_tile(),
            can_undo: state.can_undo(),
        }
    }
}

pub struct MergeEngine<R = SmallRng> {
    state: MergeState,
    rng: R,
    observers: Observers<MergeSnapshot>,
}

impl MergeEngine {
    pub fn with_seed(config: MergeConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MergeEngine<R> {
    pub fn new(config: MergeConfig, rng: R) -> Self {
        Self::from_state(MergeState::new(config), rng)
    }

    pub fn from_state(state: MergeState, rng: R) -> Self {
        Self {
            state,
            rng,
            observers: Observers::new(),
        }
    }

    pub fn state(&self) -> MergeSnapshot {
        MergeSnapshot::from_state(&self.state)
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn can_move(&self) -> bool {
        self.state.can_move()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&MergeSnapshot) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn start(&mut self) -> bool {
        let changed = self.state.start(&mut self.rng);
        self.notify_if(changed)
    }

    pub fn move_tiles(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.state.move_tiles(direction, &mut self.rng);
        self.notify_if(outcome.moved);
        outcome
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.state.undo();
        self.notify_if(changed)
    }

    pub fn continue_game(&mut self) -> bool {
        let changed = self.state.continue_game();
        self.notify_if(changed)
    }

    pub fn set_best(&mut self, best_score: u32, best_tile: u32) {
        self.state.set_best(best_score, best_tile);
        self.notify_if(true);
    }

    /// Empties the grid and starts a fresh game.
    pub fn restart(&mut self) {
        self.state.restart();
        self.state.start(&mut self.rng);
        self.notify_if(true);
    }

    pub fn destroy(&mut self) {
        self.observers.clear();
    }

    fn notify_if(&mut self, changed: bool) -> bool {
        if changed {
            let state = &self.state;
            self.observers.notify_with(|| MergeSnapshot::from_state(state));
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_only_hear_successful_moves() {
        let state = MergeState::from_values(
            MergeConfig {
                size: 2,
                ..MergeConfig::default()
            },
            array![[2, 0], [4, 0]],
        )
        .unwrap();
        let mut engine = MergeEngine::from_state(state, SmallRng::seed_from_u64(1));
        let scores = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&scores);
        engine.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.move_count));

        assert!(!engine.move_tiles(Direction::Left).moved);
        assert!(engine.move_tiles(Direction::Right).moved);

        assert_eq!(*scores.borrow(), vec![1]);
        assert!(engine.state().can_undo);
    }

    #[test]
    fn seeded_engines_replay_identically() {
        let play = |seed| {
            let mut engine = MergeEngine::with_seed(MergeConfig::default(), seed);
            engine.start();
            for turn in 0..50 {
                engine.move_tiles(Direction::ALL[turn % 4]);
            }
            engine.state()
        };

        assert_eq!(play(99), play(99));
    }

    #[test]
    fn restart_begins_a_new_game() {
        let mut engine = MergeEngine::with_seed(MergeConfig::default(), 4);
        engine.start();
        engine.move_tiles(Direction::Up);
        engine.restart();

        let snapshot = engine.state();
        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.move_count, 0);
        assert_eq!(snapshot.tiles.iter().filter(|tile| !tile.is_empty()).count(), 2);
        assert!(!snapshot.can_undo);
    }
}
