//! Block stack: seven tetrominoes falling into a well, wall-kicked rotation,
//! line clears and a level curve that shortens the drop interval.

pub use board::*;
pub use config::*;
pub use engine::*;
pub use piece::*;
pub use scoring::*;
pub use state::*;

mod board;
mod config;
mod engine;
mod piece;
mod scoring;
mod state;
