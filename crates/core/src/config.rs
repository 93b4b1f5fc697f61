//! Rule parameters for a single game.

use crate::types::{PieceSet, GOAL_LINES, POINTS_PER_LINE};

/// Per-game rules. Board size is fixed and not part of the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Cleared lines that end the game with [`GameOverReason::GoalReached`](crate::types::GameOverReason)
    pub goal_lines: u32,
    pub points_per_line: u32,
    pub piece_set: PieceSet,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            goal_lines: GOAL_LINES,
            points_per_line: POINTS_PER_LINE,
            piece_set: PieceSet::Classic,
        }
    }
}

impl GameConfig {
    pub fn with_goal_lines(mut self, goal_lines: u32) -> Self {
        self.goal_lines = goal_lines.max(1);
        self
    }

    pub fn with_piece_set(mut self, piece_set: PieceSet) -> Self {
        self.piece_set = piece_set;
        self
    }
}
