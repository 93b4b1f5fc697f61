//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. There is no
//! repeat handling of our own: terminals deliver auto-repeat as `Repeat` (or
//! repeated `Press`) events and each one becomes one action.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_actionable, should_quit};
