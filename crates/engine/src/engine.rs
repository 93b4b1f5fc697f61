//! Engine runtime integration.
//!
//! Bridges the sync terminal loop with the async game loop.

use anyhow::{anyhow, Context, Result};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::config::EngineConfig;
use crate::core::{GameSnapshot, GameState};
use crate::game_loop::{spawn_game_loop, spawn_with_state, EngineHandle};
use crate::types::GameAction;

/// Running engine instance.
pub struct Engine {
    rt: Runtime,
    handle: EngineHandle,
    task: Option<JoinHandle<Result<GameState>>>,
}

impl Engine {
    /// Start a fresh game on a dedicated runtime.
    pub fn start(config: EngineConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (handle, task) = {
            let _guard = rt.enter();
            spawn_game_loop(&config)
        };
        Ok(Self {
            rt,
            handle,
            task: Some(task),
        })
    }

    /// Start around a prepared game (custom board, replayed seed, ...).
    pub fn start_with_state(state: GameState, config: EngineConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (handle, task) = {
            let _guard = rt.enter();
            spawn_with_state(state, &config)
        };
        Ok(Self {
            rt,
            handle,
            task: Some(task),
        })
    }

    /// Queue an action. Returns false if the queue is full or the loop is gone.
    pub fn send(&self, action: GameAction) -> bool {
        self.handle.try_send(action)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.handle.snapshot()
    }

    /// Stop the game loop and return the final state.
    ///
    /// Fails if the event log could not be written during the session.
    pub fn shutdown(mut self) -> Result<GameState> {
        let task = self
            .task
            .take()
            .ok_or_else(|| anyhow!("engine already stopped"))?;
        let handle = self.handle.clone();
        self.rt.block_on(async move {
            handle.shutdown().await;
            task.await.context("game loop task failed")?
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, GameConfig};
    use crate::types::{GameOverReason, PieceKind, BOARD_WIDTH};
    use std::time::Duration;

    fn config() -> EngineConfig {
        EngineConfig {
            tick_interval: Duration::from_secs(60),
            seed: 11,
            ..EngineConfig::default()
        }
    }

    fn wait_for(engine: &Engine, pred: impl Fn(&GameSnapshot) -> bool) -> GameSnapshot {
        for _ in 0..200 {
            let snap = engine.snapshot();
            if pred(&snap) {
                return snap;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("engine never reached expected state");
    }

    #[test]
    fn test_engine_starts_and_shuts_down() {
        let engine = Engine::start(config()).unwrap();
        let snap = wait_for(&engine, |s| s.active.is_some());
        assert_eq!(snap.moves, 1);
        assert_eq!(snap.seed, 11);

        let state = engine.shutdown().unwrap();
        assert_eq!(state.episode_id(), 0);
        assert!(state.started());
    }

    #[test]
    fn test_engine_applies_actions_from_sync_caller() {
        let engine = Engine::start(config()).unwrap();
        wait_for(&engine, |s| s.active.is_some());

        assert!(engine.send(GameAction::Pause));
        wait_for(&engine, |s| s.paused);

        assert!(engine.send(GameAction::Restart));
        let snap = wait_for(&engine, |s| s.episode_id == 1);
        assert!(!snap.paused);

        let state = engine.shutdown().unwrap();
        assert_eq!(state.episode_id(), 1);
    }

    #[test]
    fn test_engine_runs_a_prepared_game() {
        let mut board = Board::new();
        for col in 0..BOARD_WIDTH as i8 {
            board.set(0, col, Some(PieceKind::O));
        }
        let state = GameState::with_board(3, GameConfig::default(), board);

        let engine = Engine::start_with_state(state, config()).unwrap();
        let snap = wait_for(&engine, |s| s.game_over.is_some());
        assert_eq!(snap.game_over, Some(GameOverReason::Loss));
        assert_eq!(snap.seed, 3);

        let state = engine.shutdown().unwrap();
        assert_eq!(state.game_over(), Some(GameOverReason::Loss));
    }

    #[test]
    fn test_shutdown_reports_event_log_failure() {
        let dir = std::env::temp_dir().join(format!("blockfall-no-dir-{}", std::process::id()));
        let engine = Engine::start(EngineConfig {
            log_path: Some(dir.join("events.jsonl").to_string_lossy().into_owned()),
            ..config()
        })
        .unwrap();
        wait_for(&engine, |s| s.active.is_some());

        let err = engine.shutdown().unwrap_err();
        assert!(format!("{:#}", err).contains("event log"));
    }
}
