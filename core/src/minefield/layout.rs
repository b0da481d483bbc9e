use ndarray::Array2;
use rand::Rng;

use super::*;
use crate::*;

/// How much of the board around the first click is kept free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SafeOpening {
    /// Clicked cell and its neighbours, so the opening is a zero.
    Zero,
    /// Only the clicked cell.
    Cell,
}

/// Places `config.mine_count` mines uniformly among the cells outside the safe
/// opening around `start`.
///
/// Falls back to protecting only `start` when the board is too crowded for a
/// zero opening. `config` must already satisfy `mine_count < rows * cols`.
pub fn place_mines<R: Rng + ?Sized>(
    config: &MinefieldConfig,
    start: Coord2,
    rng: &mut R,
) -> Array2<bool> {
    let mut excluded: Array2<bool> = Array2::default(config.size().to_nd_index());
    excluded[start.to_nd_index()] = true;
    for pos in excluded.iter_neighbors(start) {
        excluded[pos.to_nd_index()] = true;
    }

    let mut opening = SafeOpening::Zero;
    let zero_free = excluded.iter().filter(|&&is_excluded| !is_excluded).count();
    if zero_free < usize::from(config.mine_count) {
        log::warn!(
            "Cannot keep a zero opening with {} mines on {}x{}, protecting the first cell only",
            config.mine_count,
            config.rows,
            config.cols
        );
        excluded.fill(false);
        excluded[start.to_nd_index()] = true;
        opening = SafeOpening::Cell;
    }

    let candidates: Vec<usize> = excluded
        .iter()
        .enumerate()
        .filter(|&(_, &is_excluded)| !is_excluded)
        .map(|(index, _)| index)
        .collect();
    let amount = usize::from(config.mine_count).min(candidates.len());

    let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
    let cols = usize::from(config.cols);
    for picked in rand::seq::index::sample(rng, candidates.len(), amount).into_iter() {
        let index = candidates[picked];
        mines[[index / cols, index % cols]] = true;
    }

    log::debug!(
        "Placed {} mines around start {:?} ({:?} opening)",
        amount,
        start,
        opening
    );
    mines
}

/// Number of mines among the eight neighbours of `coords`.
pub fn adjacent_mine_count(mines: &Array2<bool>, coords: Coord2) -> u8 {
    mines
        .iter_neighbors(coords)
        .filter(|&pos| mines[pos.to_nd_index()])
        .count() as u8
}
