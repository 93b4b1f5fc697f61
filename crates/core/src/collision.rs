//! Collision and placement checks.
//!
//! Everything here is pure and total: invalid geometry yields `false` or
//! `None`, never a panic.

use crate::board::Board;
use crate::pieces::{get_layout, Anchor};
use crate::types::{PieceKind, BOARD_SIZE};

/// Absolute board indices of a placement, or None if any cell leaves the board.
///
/// A cell leaves the board when its column falls outside `0..cols` (which
/// would otherwise wrap onto the neighbouring row), when its row falls
/// outside `0..rows`, or when its linear index is outside `0..rows*cols`.
pub fn placement_cells(kind: PieceKind, rotation: usize, anchor: Anchor) -> Option<[usize; 4]> {
    let layout = get_layout(kind, rotation)?;
    let mut out = [0usize; 4];
    for (slot, &offset) in out.iter_mut().zip(layout.iter()) {
        let (row, col) = anchor.cell(offset);
        let idx = Board::index(row, col)?;
        debug_assert!(idx < BOARD_SIZE);
        *slot = idx;
    }
    Some(out)
}

/// Whether a piece fits at `anchor` in `rotation` without leaving the board
/// or overlapping locked cells.
pub fn can_place(kind: PieceKind, rotation: usize, anchor: Anchor, board: &Board) -> bool {
    match placement_cells(kind, rotation, anchor) {
        Some(cells) => cells.iter().all(|&idx| !board.is_occupied(idx)),
        None => false,
    }
}
