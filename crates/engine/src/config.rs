//! Engine configuration.

use std::time::Duration;

use crate::core::GameConfig;
use crate::types::{PieceSet, TICK_INTERVAL_MS};

/// Runtime configuration for the game loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Gravity timer period
    pub tick_interval: Duration,
    pub game: GameConfig,
    pub seed: u32,
    /// JSONL event log destination; None disables logging
    pub log_path: Option<String>,
    /// Capacity of the inbound command channel
    pub max_pending_commands: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            game: GameConfig::default(),
            seed: 1,
            log_path: None,
            max_pending_commands: 64,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables, falling back to defaults.
    ///
    /// - `TETRIS_TICK_MS`: gravity period in ms (default 500)
    /// - `TETRIS_GOAL_LINES`: lines needed to win (default 20)
    /// - `TETRIS_PIECE_SET`: `classic` or `standard` (default classic)
    /// - `TETRIS_SEED`: piece sequence seed (random when unset)
    /// - `TETRIS_LOG_PATH`: JSONL event log file (disabled when unset)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let tick_interval = get("TETRIS_TICK_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick_interval);

        let goal_lines = get("TETRIS_GOAL_LINES")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(defaults.game.goal_lines);

        let piece_set = get("TETRIS_PIECE_SET")
            .and_then(|s| PieceSet::from_str(&s))
            .unwrap_or(defaults.game.piece_set);

        let seed = get("TETRIS_SEED")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or_else(rand::random::<u32>);

        let log_path = get("TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            tick_interval,
            game: defaults
                .game
                .with_goal_lines(goal_lines)
                .with_piece_set(piece_set),
            seed,
            log_path,
            max_pending_commands: defaults.max_pending_commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tick_interval, Duration::from_millis(500));
        assert_eq!(config.game.goal_lines, 20);
        assert_eq!(config.game.points_per_line, 20);
        assert_eq!(config.game.piece_set, PieceSet::Classic);
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("TETRIS_TICK_MS", "250"),
            ("TETRIS_GOAL_LINES", "40"),
            ("TETRIS_PIECE_SET", "standard"),
            ("TETRIS_SEED", "99"),
            ("TETRIS_LOG_PATH", " /tmp/blockfall.jsonl "),
        ]));

        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.game.goal_lines, 40);
        assert_eq!(config.game.piece_set, PieceSet::Standard);
        assert_eq!(config.seed, 99);
        assert_eq!(config.log_path.as_deref(), Some("/tmp/blockfall.jsonl"));
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("TETRIS_TICK_MS", "0"),
            ("TETRIS_GOAL_LINES", "many"),
            ("TETRIS_PIECE_SET", "bag7"),
            ("TETRIS_LOG_PATH", "   "),
        ]));

        assert_eq!(config.tick_interval, Duration::from_millis(500));
        assert_eq!(config.game.goal_lines, 20);
        assert_eq!(config.game.piece_set, PieceSet::Classic);
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_missing_variables_fall_back_to_defaults() {
        let config = EngineConfig::from_lookup(|_| None);
        assert_eq!(
            config,
            EngineConfig {
                seed: config.seed,
                ..EngineConfig::default()
            }
        );
    }
}
