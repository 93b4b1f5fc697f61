//! Pieces module - static shape catalog
//!
//! Every piece kind owns an ordered list of rotation layouts. A layout is four
//! `(row, col)` offsets measured from the piece anchor, and layout `n + 1` is
//! layout `n` turned 90° clockwise. Rotation is naive: the next layout is tried
//! in place and there is no wall-kick search.

use crate::types::{PieceKind, PieceSet, BOARD_WIDTH, SPAWN_INDEX};

/// Offset of a single cell relative to the piece anchor, as `(row, col)`
pub type CellOffset = (i8, i8);

/// One rotation layout - exactly four occupied offsets
pub type Layout = [CellOffset; 4];

const I_LAYOUTS: [Layout; 2] = [
    // vertical bar in column 1
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    // horizontal bar in row 1
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const L_LAYOUTS: [Layout; 4] = [
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (1, 2), (2, 0)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 2), (2, 0), (2, 1), (2, 2)],
];

const T_LAYOUTS: [Layout; 4] = [
    [(0, 1), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 1)],
    [(0, 1), (1, 0), (1, 1), (2, 1)],
];

const O_LAYOUTS: [Layout; 1] = [[(0, 0), (0, 1), (1, 0), (1, 1)]];

const Z_LAYOUTS: [Layout; 2] = [
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    [(0, 2), (1, 1), (1, 2), (2, 1)],
];

const J_LAYOUTS: [Layout; 4] = [
    [(0, 1), (1, 1), (2, 0), (2, 1)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (0, 2), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
];

const S_LAYOUTS: [Layout; 2] = [
    [(0, 1), (0, 2), (1, 0), (1, 1)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
];

/// The reduced five-piece catalog
pub const CLASSIC_SHAPES: [PieceKind; 5] = [
    PieceKind::I,
    PieceKind::L,
    PieceKind::T,
    PieceKind::O,
    PieceKind::Z,
];

/// All seven tetrominoes
pub const STANDARD_SHAPES: [PieceKind; 7] = PieceKind::ALL;

/// Ordered catalog for a piece set
pub fn all_shapes(set: PieceSet) -> &'static [PieceKind] {
    match set {
        PieceSet::Classic => &CLASSIC_SHAPES,
        PieceSet::Standard => &STANDARD_SHAPES,
    }
}

/// All rotation layouts of a piece kind, in clockwise order
pub fn layouts(kind: PieceKind) -> &'static [Layout] {
    match kind {
        PieceKind::I => &I_LAYOUTS,
        PieceKind::L => &L_LAYOUTS,
        PieceKind::T => &T_LAYOUTS,
        PieceKind::O => &O_LAYOUTS,
        PieceKind::Z => &Z_LAYOUTS,
        PieceKind::J => &J_LAYOUTS,
        PieceKind::S => &S_LAYOUTS,
    }
}

/// Number of distinct rotation layouts
pub fn rotation_count(kind: PieceKind) -> usize {
    layouts(kind).len()
}

/// Layout for a rotation index, or None if the index is out of range
pub fn get_layout(kind: PieceKind, rotation: usize) -> Option<&'static Layout> {
    layouts(kind).get(rotation)
}

/// Rotation index after one clockwise turn (wraps around)
pub fn next_rotation(kind: PieceKind, rotation: usize) -> usize {
    (rotation + 1) % rotation_count(kind)
}

/// Layout offsets expressed as linear deltas for a board `cols` wide.
pub fn linear_offsets(kind: PieceKind, rotation: usize, cols: u8) -> Option<[i32; 4]> {
    let layout = get_layout(kind, rotation)?;
    let mut out = [0i32; 4];
    for (slot, &(dr, dc)) in out.iter_mut().zip(layout.iter()) {
        *slot = dr as i32 * cols as i32 + dc as i32;
    }
    Some(out)
}

/// Reference position from which a layout's offsets are measured.
///
/// The anchor keeps its row and column separately because a piece whose
/// layout starts at column 1 may legally sit with its anchor at column -1.
/// [`Anchor::index`] gives the linear board index `row * cols + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub row: i8,
    pub col: i8,
}

impl Anchor {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Anchor at a linear board index
    pub fn from_index(index: usize) -> Self {
        let cols = BOARD_WIDTH as usize;
        Self {
            row: (index / cols) as i8,
            col: (index % cols) as i8,
        }
    }

    /// Linear index of the anchor (may be negative for anchors left of column 0)
    pub fn index(&self) -> i32 {
        self.row as i32 * BOARD_WIDTH as i32 + self.col as i32
    }

    pub fn shifted(&self, drow: i8, dcol: i8) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Absolute `(row, col)` of one layout offset
    #[inline(always)]
    pub fn cell(&self, offset: CellOffset) -> (i8, i8) {
        (self.row + offset.0, self.col + offset.1)
    }
}

/// Spawn anchor for new pieces (linear index 4)
pub fn spawn_anchor() -> Anchor {
    Anchor::from_index(SPAWN_INDEX)
}
