use crate::game_state::ActivePiece;
use crate::types::{GameOverReason, PieceKind, PieceSet, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub anchor_row: i8,
    pub anchor_col: i8,
    /// Absolute `(row, col)` of each occupied cell
    pub cells: [(i8, i8); 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation as u8,
            anchor_row: value.anchor.row,
            anchor_col: value.anchor.col,
            cells: value.cells(),
        }
    }
}

/// Read-only view handed to renderers and the engine's watchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Piece codes per cell, 0 = empty (see `PieceKind::code`)
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub piece_set: PieceSet,
    pub paused: bool,
    pub game_over: Option<GameOverReason>,
    pub episode_id: u32,
    pub seed: u32,
    pub score: u32,
    pub moves: u32,
    pub lines: u32,
    pub goal_lines: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next = PieceKind::I;
        self.piece_set = PieceSet::Classic;
        self.paused = false;
        self.game_over = None;
        self.episode_id = 0;
        self.seed = 0;
        self.score = 0;
        self.moves = 0;
        self.lines = 0;
        self.goal_lines = 0;
    }

    pub fn playable(&self) -> bool {
        self.game_over.is_none() && !self.paused
    }

    /// Piece kind locked at (row, col), if any
    pub fn cell(&self, row: usize, col: usize) -> Option<PieceKind> {
        self.board
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|&code| PieceKind::from_code(code))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: PieceKind::I,
            piece_set: PieceSet::Classic,
            paused: false,
            game_over: None,
            episode_id: 0,
            seed: 0,
            score: 0,
            moves: 0,
            lines: 0,
            goal_lines: 0,
        };
        s.clear();
        s
    }
}
