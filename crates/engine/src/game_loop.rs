//! Single-actor game loop.
//!
//! One tokio task owns the [`GameState`]. It waits on either the gravity
//! timer or the command channel, so ticks and inputs are applied strictly one
//! at a time. Every accepted mutation republishes a [`GameSnapshot`] on a
//! watch channel for renderers.
//!
//! Timer rules:
//! - the timer only fires while the game is running (not paused, not over)
//! - resuming from pause and restarting both reset the timer, so a resumed
//!   game never catches up on missed ticks

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::config::EngineConfig;
use crate::core::{GameSnapshot, GameState};
use crate::event_log::{EventLog, LogRecord};
use crate::types::GameAction;

/// Message delivered to the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Input(GameAction),
    Shutdown,
}

/// Cloneable handle for talking to a running game loop
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    snap_rx: watch::Receiver<GameSnapshot>,
}

impl EngineHandle {
    pub async fn send(&self, action: GameAction) -> Result<()> {
        self.cmd_tx
            .send(EngineCommand::Input(action))
            .await
            .map_err(|_| anyhow!("game loop has stopped"))
    }

    /// Non-blocking send; false if the loop is gone or the queue is full
    pub fn try_send(&self, action: GameAction) -> bool {
        self.cmd_tx.try_send(EngineCommand::Input(action)).is_ok()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        *self.snap_rx.borrow()
    }

    /// Wait for the next published snapshot
    pub async fn changed(&mut self) -> Result<GameSnapshot> {
        self.snap_rx
            .changed()
            .await
            .map_err(|_| anyhow!("game loop has stopped"))?;
        Ok(*self.snap_rx.borrow_and_update())
    }

    pub async fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown).await;
    }
}

/// Spawn a game loop for a fresh game. Must be called inside a tokio runtime.
///
/// The join handle yields the final game state after shutdown, or the event
/// log's error if the log could not be written.
pub fn spawn_game_loop(config: &EngineConfig) -> (EngineHandle, JoinHandle<Result<GameState>>) {
    let state = GameState::with_config(config.seed, config.game);
    spawn_with_state(state, config)
}

/// Spawn a game loop around an existing (possibly prepared) game.
pub fn spawn_with_state(
    state: GameState,
    config: &EngineConfig,
) -> (EngineHandle, JoinHandle<Result<GameState>>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>(config.max_pending_commands.max(1));
    let (snap_tx, snap_rx) = watch::channel(state.snapshot());
    let log = config.log_path.clone().map(|path| EventLog::spawn(path));

    let game = GameLoop {
        state,
        period: config.tick_interval,
        snap_tx,
        log: log.as_ref().map(|(log, _)| log.clone()),
    };
    let log_task = log.map(|(_, task)| task);

    let task = tokio::spawn(async move {
        let state = game.run(cmd_rx).await;
        if let Some(log_task) = log_task {
            log_task.await.context("event log task panicked")??;
        }
        Ok::<_, anyhow::Error>(state)
    });

    (EngineHandle { cmd_tx, snap_rx }, task)
}

fn new_ticker(period: Duration) -> Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

struct GameLoop {
    state: GameState,
    period: Duration,
    snap_tx: watch::Sender<GameSnapshot>,
    log: Option<EventLog>,
}

impl GameLoop {
    async fn run(mut self, mut cmd_rx: mpsc::Receiver<EngineCommand>) -> GameState {
        self.state.start();
        self.record(LogRecord::start(&self.state, self.period.as_millis() as u64));
        if let Some(rec) = LogRecord::game_over(&self.state) {
            self.record(rec);
        }
        self.publish();

        let mut ticker = new_ticker(self.period);

        loop {
            let ticking = self.state.is_running();
            tokio::select! {
                _ = ticker.tick(), if ticking => self.on_tick(),
                cmd = cmd_rx.recv() => match cmd {
                    Some(EngineCommand::Input(action)) => {
                        if self.on_input(action) {
                            ticker.reset();
                        }
                    }
                    Some(EngineCommand::Shutdown) | None => break,
                },
            }
        }

        // Dropping the log handle lets the writer task drain and finish.
        self.log = None;
        self.state
    }

    fn on_tick(&mut self) {
        if self.state.on_tick() {
            self.drain_lock_event();
            self.publish();
        }
    }

    /// Apply one input. Returns true when the gravity timer must restart.
    fn on_input(&mut self, action: GameAction) -> bool {
        let was_paused = self.state.paused();
        let accepted = self.state.apply_action(action);
        self.record(LogRecord::input(&self.state, action, accepted));
        self.drain_lock_event();

        let reset_timer = match action {
            GameAction::Restart => {
                self.record(LogRecord::start(&self.state, self.period.as_millis() as u64));
                true
            }
            GameAction::Pause => was_paused && !self.state.paused(),
            _ => false,
        };

        if accepted {
            self.publish();
        }
        reset_timer
    }

    fn drain_lock_event(&mut self) {
        let Some(event) = self.state.take_last_event() else {
            return;
        };
        self.record(LogRecord::lock(&self.state, &event));
        if event.game_over.is_some() {
            if let Some(rec) = LogRecord::game_over(&self.state) {
                self.record(rec);
            }
        }
    }

    fn record(&self, record: LogRecord) {
        if let Some(log) = &self.log {
            log.record(record);
        }
    }

    fn publish(&self) {
        self.snap_tx.send_replace(self.state.snapshot());
    }
}
