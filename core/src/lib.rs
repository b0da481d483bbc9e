//! Deterministic puzzle engines: a minefield sweep, a tile-merge grid and a
//! falling-block stack.
//!
//! Each engine is split into a state type that owns the board and takes its
//! random source and timestamps as arguments, and a façade that owns the state
//! together with an injected [`rand::Rng`], notifies subscribers with a
//! snapshot after every command that changed something, and never fails on
//! gameplay input.

pub use clock::*;
pub use error::*;
pub use observer::*;
pub use settings::*;
pub use types::*;

pub use merge::{MergeEngine, MergeSnapshot};
pub use minefield::{MinefieldEngine, MinefieldSnapshot};
pub use stack::{StackEngine, StackSnapshot};

pub mod merge;
pub mod minefield;
pub mod stack;

mod clock;
mod error;
mod observer;
mod settings;
mod types;
