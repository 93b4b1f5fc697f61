//! Timer-driven game engine.
//!
//! Wraps a [`GameState`](core::GameState) in a single tokio task that owns all
//! mutation. Gravity comes from an interval timer, user input arrives on a
//! bounded command channel, and every change is published as a
//! [`GameSnapshot`](core::GameSnapshot) on a watch channel.
//!
//! - [`game_loop`]: the async actor and its [`EngineHandle`]
//! - [`engine`]: sync facade that owns a runtime, for the terminal client
//! - [`config`]: `TETRIS_*` environment configuration
//! - [`event_log`]: optional JSONL session log

pub mod config;
pub mod engine;
pub mod event_log;
pub mod game_loop;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use event_log::{EventLog, LogRecord};
pub use game_loop::{spawn_game_loop, spawn_with_state, EngineCommand, EngineHandle};
