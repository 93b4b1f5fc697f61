//! Line-clear resolution.
//!
//! Full rows are collected from a single snapshot of the board, then removed
//! in one compaction pass, so every full row counts exactly once no matter
//! how many rows shift in the same pass.

use crate::board::Board;

/// Totals produced by one resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClear {
    pub lines_cleared: u32,
    pub new_score: u32,
}

impl LineClear {
    pub fn score_delta(&self, old_score: u32) -> u32 {
        self.new_score.saturating_sub(old_score)
    }
}

/// Clear every full row and add `points_per_line` per row to `score`.
///
/// A board without full rows is left untouched.
pub fn resolve(board: &mut Board, score: u32, points_per_line: u32) -> LineClear {
    let cleared = board.clear_full_rows();
    let lines_cleared = cleared.len() as u32;
    LineClear {
        lines_cleared,
        new_score: score.saturating_add(lines_cleared.saturating_mul(points_per_line)),
    }
}
