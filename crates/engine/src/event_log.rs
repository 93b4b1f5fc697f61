//! JSONL event log.
//!
//! Records are queued on an unbounded channel and appended to the log file
//! by a background task, one JSON object per line. Recording never blocks
//! the game loop.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::GameState;
use crate::types::{GameAction, LockEvent};

/// One log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LogRecord {
    Start {
        ts: u64,
        episode: u32,
        seed: u32,
        piece_set: &'static str,
        goal_lines: u32,
        tick_ms: u64,
    },
    Input {
        ts: u64,
        episode: u32,
        action: &'static str,
        accepted: bool,
    },
    Lock {
        ts: u64,
        episode: u32,
        piece: &'static str,
        lines_cleared: u32,
        score_delta: u32,
        score: u32,
        lines: u32,
        moves: u32,
    },
    GameOver {
        ts: u64,
        episode: u32,
        reason: &'static str,
        score: u32,
        lines: u32,
        moves: u32,
    },
}

impl LogRecord {
    pub fn start(state: &GameState, tick_ms: u64) -> Self {
        LogRecord::Start {
            ts: now_ms(),
            episode: state.episode_id(),
            seed: state.seed(),
            piece_set: state.config().piece_set.as_str(),
            goal_lines: state.goal_lines(),
            tick_ms,
        }
    }

    pub fn input(state: &GameState, action: GameAction, accepted: bool) -> Self {
        LogRecord::Input {
            ts: now_ms(),
            episode: state.episode_id(),
            action: action.as_str(),
            accepted,
        }
    }

    pub fn lock(state: &GameState, event: &LockEvent) -> Self {
        LogRecord::Lock {
            ts: now_ms(),
            episode: state.episode_id(),
            piece: event.kind.as_str(),
            lines_cleared: event.lines_cleared,
            score_delta: event.score_delta,
            score: state.score(),
            lines: state.lines(),
            moves: state.moves(),
        }
    }

    /// None while the game is still running
    pub fn game_over(state: &GameState) -> Option<Self> {
        let reason = state.game_over()?;
        Some(LogRecord::GameOver {
            ts: now_ms(),
            episode: state.episode_id(),
            reason: reason.as_str(),
            score: state.score(),
            lines: state.lines(),
            moves: state.moves(),
        })
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Cheap, cloneable handle that queues records for the writer task
#[derive(Debug, Clone)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<LogRecord>,
}

impl EventLog {
    /// Start the writer task. Must be called from within a tokio runtime.
    ///
    /// The task finishes once every `EventLog` clone has been dropped and
    /// yields the first write error, if any.
    pub fn spawn(path: impl Into<PathBuf>) -> (Self, JoinHandle<Result<()>>) {
        let path = path.into();
        let (tx, rx) = mpsc::unbounded_channel::<LogRecord>();
        let task = tokio::spawn(async move {
            write_records(&path, rx)
                .await
                .with_context(|| format!("event log {}", path.display()))
        });
        (Self { tx }, task)
    }

    pub fn record(&self, record: LogRecord) {
        let _ = self.tx.send(record);
    }
}

async fn write_records(path: &Path, mut rx: mpsc::UnboundedReceiver<LogRecord>) -> Result<()> {
    use tokio::fs::OpenOptions;
    use tokio::io::AsyncWriteExt;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("open {}", path.display()))?;

    let mut buf: Vec<u8> = Vec::with_capacity(512);

    while let Some(rec) = rx.recv().await {
        buf.clear();
        serde_json::to_writer(&mut buf, &rec)?;
        buf.push(b'\n');
        file.write_all(&buf).await.context("append record")?;
    }

    file.flush().await.context("flush")?;
    Ok(())
}
