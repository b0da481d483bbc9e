//! The seven tetrominoes, their rotation states and the wall-kick list.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Offset of a single mino from the piece's top-left anchor, `(dx, dy)`.
pub type MinoOffset = (i8, i8);

/// Four mino offsets making up one rotation state.
pub type PieceShape = [MinoOffset; 4];

/// Offsets tried in order when a rotation is blocked in place. Negative `dy`
/// moves the piece up.
pub const WALL_KICKS: [(i16, i16); 5] = [(-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Independent uniform draw, no bag.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Side of the square bounding box the rotation states live in.
    pub const fn box_size(self) -> u8 {
        match self {
            Self::I => 4,
            Self::O => 2,
            _ => 3,
        }
    }

    pub fn rotation_states(self) -> &'static [PieceShape] {
        match self {
            Self::I => &I_STATES,
            Self::O => &O_STATES,
            Self::T => &T_STATES,
            Self::S => &S_STATES,
            Self::Z => &Z_STATES,
            Self::J => &J_STATES,
            Self::L => &L_STATES,
        }
    }

    pub fn shape(self, rotation: usize) -> PieceShape {
        let states = self.rotation_states();
        states[rotation % states.len()]
    }
}

const I_STATES: [PieceShape; 4] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const O_STATES: [PieceShape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const T_STATES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_STATES: [PieceShape; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_STATES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const J_STATES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_STATES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// A tetromino placed on the board. `x`/`y` is the top-left corner of its
/// bounding box and may sit outside the board while the minos are inside.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub x: i16,
    pub y: i16,
    pub rotation: usize,
}

impl Piece {
    pub const fn new(kind: PieceKind, x: i16, y: i16) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: 0,
        }
    }

    /// Horizontally centred on the top row.
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let x = (i16::from(board_width) - i16::from(kind.box_size())) / 2;
        Self::new(kind, x, 0)
    }

    pub fn shape(&self) -> PieceShape {
        self.kind.shape(self.rotation)
    }

    /// Absolute `(x, y)` board positions of the four minos.
    pub fn cells(&self) -> [(i16, i16); 4] {
        self.shape()
            .map(|(dx, dy)| (self.x + i16::from(dx), self.y + i16::from(dy)))
    }

    /// Row-major fill matrix of the current rotation state.
    pub fn shape_matrix(&self) -> Vec<Vec<bool>> {
        let side = usize::from(self.kind.box_size());
        let mut matrix = vec![vec![false; side]; side];
        for (dx, dy) in self.shape() {
            matrix[dy as usize][dx as usize] = true;
        }
        matrix
    }

    pub fn shifted(self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Next clockwise rotation state, same anchor.
    pub fn rotated(self) -> Self {
        Self {
            rotation: (self.rotation + 1) % self.kind.rotation_states().len(),
            ..self
        }
    }
}
