use std::collections::BTreeMap;

use crate::*;

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Persistence port. Implemented by the host (local storage, a file, a server);
/// the engines never call it.
pub trait ScoreStore {
    /// Records a finished game. Returns the report's rank in that game's
    /// history, `None` when it did not make the cut.
    fn save_score(&mut self, report: ScoreReport) -> Result<Option<usize>>;

    fn high_score(&self, game: GameId) -> Option<&ScoreReport>;

    /// Best first.
    fn scores(&self, game: GameId) -> &[ScoreReport];
}

/// Keeps the best reports of each game in memory, highest score first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryScoreStore {
    scores: BTreeMap<GameId, Vec<ScoreReport>>,
    history_limit: usize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            scores: BTreeMap::new(),
            history_limit: history_limit.max(1),
        }
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn clear(&mut self, game: GameId) {
        self.scores.remove(&game);
    }

    /// Flat list of every kept report.
    pub fn to_json(&self) -> Result<String> {
        let reports: Vec<&ScoreReport> = self.scores.values().flatten().collect();
        Ok(serde_json::to_string(&reports)?)
    }

    /// Rebuilds a store from [`Self::to_json`] output. Histories are re-ranked
    /// and trimmed to `history_limit`.
    pub fn from_json(json: &str, history_limit: usize) -> Result<Self> {
        let reports: Vec<ScoreReport> = serde_json::from_str(json)?;
        let mut store = Self::with_history_limit(history_limit);
        for report in reports {
            store.save_score(report)?;
        }
        Ok(store)
    }
}

impl Default for MemoryScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save_score(&mut self, report: ScoreReport) -> Result<Option<usize>> {
        if report.metadata.game() != report.game {
            return Err(StoreError::MismatchedMetadata { game: report.game });
        }

        let game = report.game;
        let score = report.score;
        let history = self.scores.entry(game).or_default();
        // ties keep the older report ahead
        let rank = history.partition_point(|kept| kept.score >= score);
        if rank >= self.history_limit {
            log::debug!("Score {} for {} did not make the top {}", score, game, self.history_limit);
            return Ok(None);
        }

        history.insert(rank, report);
        history.truncate(self.history_limit);
        log::debug!("Saved score {} for {} at rank {}", score, game, rank);
        Ok(Some(rank))
    }

    fn high_score(&self, game: GameId) -> Option<&ScoreReport> {
        self.scores(game).first()
    }

    fn scores(&self, game: GameId) -> &[ScoreReport] {
        self.scores.get(&game).map(Vec::as_slice).unwrap_or_default()
    }
}
