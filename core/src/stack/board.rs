use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::*;

/// Settled cells. Each filled cell remembers the kind that coloured it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackBoard {
    cells: Array2<Option<PieceKind>>,
}

impl StackBoard {
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            cells: Array2::default([usize::from(height), usize::from(width)]),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cells(&self) -> &Array2<Option<PieceKind>> {
        &self.cells
    }

    fn index(&self, x: i16, y: i16) -> Option<[usize; 2]> {
        let col = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        (col < self.width() && row < self.height()).then_some([row, col])
    }

    /// `None` when out of bounds.
    pub fn get(&self, x: i16, y: i16) -> Option<Option<PieceKind>> {
        self.index(x, y).map(|index| self.cells[index])
    }

    pub fn set(&mut self, x: i16, y: i16, cell: Option<PieceKind>) -> bool {
        match self.index(x, y) {
            Some(index) => {
                self.cells[index] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty.
    pub fn is_free(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// The placement predicate: every mino lands on an in-bounds empty cell.
    pub fn fits(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_free(x, y))
    }

    pub fn lock(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells.row(row).iter().all(|cell| cell.is_some())
    }

    /// Removes every full row, shifts the rows above down and pads empty rows
    /// on top. Returns the cleared row indices, bottom first.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        let mut write_row = self.height();

        for read_row in (0..self.height()).rev() {
            if self.is_row_full(read_row) {
                cleared.push(read_row);
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let source = self.cells.row(read_row).to_owned();
                self.cells.row_mut(write_row).assign(&source);
            }
        }

        for row in 0..write_row {
            self.cells.row_mut(row).fill(None);
        }
        cleared
    }

    /// Lowest row the piece can be dropped to from where it is.
    pub fn ghost_y(&self, piece: &Piece) -> i16 {
        let mut ghost = *piece;
        while self.fits(&ghost.shifted(0, 1)) {
            ghost = ghost.shifted(0, 1);
        }
        ghost.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut StackBoard, y: i16, except: Option<i16>) {
        for x in 0..board.width() as i16 {
            if Some(x) != except {
                board.set(x, y, Some(PieceKind::J));
            }
        }
    }

    #[test]
    fn fits_rejects_walls_floor_and_filled_cells() {
        let mut board = StackBoard::new(10, 20);
        assert!(board.fits(&Piece::new(PieceKind::O, 0, 0)));
        assert!(!board.fits(&Piece::new(PieceKind::O, -1, 0)));
        assert!(!board.fits(&Piece::new(PieceKind::O, 9, 0)));
        assert!(!board.fits(&Piece::new(PieceKind::O, 0, 19)));

        board.set(1, 1, Some(PieceKind::S));
        assert!(!board.fits(&Piece::new(PieceKind::O, 0, 0)));
        // the I piece's empty top row may hang above the board
        assert!(board.fits(&Piece::new(PieceKind::I, 2, -1)));
    }

    #[test]
    fn clearing_bottom_two_rows_shifts_everything_down() {
        let mut board = StackBoard::new(10, 20);
        fill_row(&mut board, 19, None);
        fill_row(&mut board, 18, None);
        board.set(4, 17, Some(PieceKind::T));
        board.set(0, 0, Some(PieceKind::L));

        let cleared = board.clear_full_rows();

        assert_eq!(cleared, vec![19, 18]);
        assert_eq!(board.get(4, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(0, 2), Some(Some(PieceKind::L)));
        for y in 0..2 {
            assert!((0..10).all(|x| board.is_free(x, y)));
        }
        assert_eq!(board.cells().iter().filter(|cell| cell.is_some()).count(), 2);
    }

    #[test]
    fn clearing_non_adjacent_rows_keeps_order() {
        let mut board = StackBoard::new(4, 6);
        fill_row(&mut board, 5, None);
        fill_row(&mut board, 4, Some(1));
        fill_row(&mut board, 3, None);
        board.set(2, 2, Some(PieceKind::Z));

        assert_eq!(board.clear_full_rows(), vec![5, 3]);
        assert_eq!(board.get(1, 5), Some(None));
        assert_eq!(board.get(0, 5), Some(Some(PieceKind::J)));
        assert_eq!(board.get(2, 4), Some(Some(PieceKind::Z)));
        assert!((0..4).all(|x| board.is_free(x, 3)));
    }

    #[test]
    fn ghost_lands_on_stack() {
        let mut board = StackBoard::new(10, 20);
        board.set(4, 10, Some(PieceKind::I));
        let piece = Piece::new(PieceKind::O, 4, 0);

        assert_eq!(board.ghost_y(&piece), 8);
        assert_eq!(board.ghost_y(&Piece::new(PieceKind::O, 6, 0)), 18);
    }
}
