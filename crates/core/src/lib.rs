//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, the board model and the progression
//! state machine. It has **no dependencies** on timers, terminals or I/O:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Total**: rejected moves are silent no-ops, never errors
//! - **Portable**: the timer engine and the terminal client only read
//!   [`GameSnapshot`]s and forward [`GameAction`](types::GameAction)s
//!
//! # Module Structure
//!
//! - [`pieces`]: shape catalog and rotation layouts
//! - [`board`]: 10x20 grid of cells tagged with the piece that locked them
//! - [`collision`]: pure placement checks used by every move
//! - [`line_clear`]: full-row removal and scoring
//! - [`rng`]: one-piece lookahead queue with uniform random refills
//! - [`game_state`]: the aggregate and its gravity state machine
//! - [`snapshot`]: read-only projection for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at linear index 4 in rotation 0
//! - Rotation cycles through the piece's layouts with no wall kicks
//! - A piece locks on the first gravity step it cannot fall
//! - Each cleared line is worth a flat 20 points
//! - Clearing 20 lines wins; a blocked spawn loses
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.on_tick();
//!
//! assert_eq!(game.moves(), 1);
//! assert!(game.game_over().is_none());
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod game_state;
pub mod line_clear;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{can_place, placement_cells};
pub use config::GameConfig;
pub use game_state::{ActivePiece, GameState, Phase};
pub use line_clear::{resolve, LineClear};
pub use pieces::{all_shapes, get_layout, layouts, spawn_anchor, Anchor};
pub use rng::{PieceQueue, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
