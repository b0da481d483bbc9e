use thiserror::Error;

/// Construction-time failures. Gameplay misuse is never reported through this
/// type: commands answer with `false` or a "nothing happened" outcome instead.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board dimensions are out of range")]
    InvalidDimensions,
    #[error("Too many mines")]
    TooManyMines,
    #[error("A minefield needs at least one mine")]
    NoMines,
    #[error("Tile value {0} is not a power of two")]
    InvalidTile(u32),
    #[error("Invalid setting: {0}")]
    InvalidSettings(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Malformed settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] GameError),
}
