use thiserror::Error;

use crate::GameId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Score for {game} carries metadata of another game")]
    MismatchedMetadata { game: GameId },
    #[error("Malformed score data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StoreError>;
