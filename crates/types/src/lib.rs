//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, the timer engine, terminal rendering).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: linear index 4 (row 0, column 4)
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_INTERVAL_MS` | 500 | Gravity timer period |
//! | `GOAL_LINES` | 20 | Lines needed to win |
//! | `POINTS_PER_LINE` | 20 | Flat score per cleared line |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Total number of cells on the board
pub const BOARD_SIZE: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

/// Linear board index where every new piece is anchored (row 0, column 4)
pub const SPAWN_INDEX: usize = 4;

/// Gravity timer period in milliseconds
pub const TICK_INTERVAL_MS: u64 = 500;

/// Total cleared lines that end the game in a win
pub const GOAL_LINES: u32 = 20;

/// Score awarded for each cleared line (10 points, doubled)
pub const POINTS_PER_LINE: u32 = 10 * 2;


/// The tetromino piece kinds
///
/// The kind doubles as the color tag of locked cells:
/// - **I**: Cyan, straight bar
/// - **L**: Orange
/// - **T**: Magenta
/// - **O**: Yellow, 2x2 square
/// - **Z**: Red
/// - **J**: Blue (standard set only)
/// - **S**: Green (standard set only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    L,
    T,
    O,
    Z,
    J,
    S,
}

impl PieceKind {
    /// Every kind, classic five first
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::T,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::S,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "l" => Some(PieceKind::L),
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            _ => None,
        }
    }

    /// Lowercase name, also used as the color tag in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::T => "t",
            PieceKind::O => "o",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::S => "s",
        }
    }

    /// Compact non-zero code used by snapshot grids (0 = empty)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::L => 2,
            PieceKind::T => 3,
            PieceKind::O => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::S => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::L),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::S),
            _ => None,
        }
    }
}

/// Which catalog the lookahead queue draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceSet {
    /// I, L, T, O, Z
    #[default]
    Classic,
    /// All seven tetrominoes
    Standard,
}

impl PieceSet {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "5" => Some(PieceSet::Classic),
            "standard" | "7" => Some(PieceSet::Standard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceSet::Classic => "classic",
            PieceSet::Standard => "standard",
        }
    }
}

/// User intents forwarded into the game
///
/// Every movement action is validated against the board before it is
/// committed; a rejected move is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// One gravity step (locks the piece when it cannot fall)
    SoftDrop,
    /// Advance to the next rotation layout (no wall kicks)
    Rotate,
    /// Toggle pause state
    Pause,
    /// Rebuild the whole game
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// camelCase name used in the event log
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    /// A new piece could not be placed at the spawn anchor
    Loss,
    /// The goal line count was reached
    GoalReached,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::Loss => "loss",
            GameOverReason::GoalReached => "goalReached",
        }
    }
}

/// Core-side event emitted after a piece locks.
///
/// Consumed by the engine and mapped into event-log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_delta: u32,
    pub game_over: Option<GameOverReason>,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied, tagged with the piece that locked it
pub type Cell = Option<PieceKind>;
