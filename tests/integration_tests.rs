//! Integration tests for the game model through its public API

use tui_blockfall::core::{Board, GameConfig, GameState, Phase};
use tui_blockfall::types::{GameAction, GameOverReason, PieceKind, PieceSet};

/// Start games on copies of `board` until the first piece is `kind`.
fn game_starting_with(kind: PieceKind, config: GameConfig, board: &Board) -> GameState {
    for seed in 1..10_000 {
        let mut state = GameState::with_board(seed, config, board.clone());
        state.start();
        if state.active().map(|a| a.kind) == Some(kind) {
            return state;
        }
    }
    panic!("no seed starts with {kind:?}");
}

fn gap_board() -> Board {
    let mut board = Board::new();
    board.fill_row_except(19, &[5], PieceKind::T);
    board
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert!(!state.started());
    assert!(state.active().is_none());

    state.start();
    assert!(state.started());
    assert!(state.active().is_some());
    assert_eq!(state.game_over(), None);
    assert!(!state.paused());
    assert_eq!(state.phase(), Phase::Falling);
    assert_eq!(state.moves(), 1);
}

#[test]
fn test_actions_before_start_are_ignored() {
    let mut state = GameState::new(1);
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Rotate,
        GameAction::Pause,
    ] {
        assert!(!state.apply_action(action), "{action:?}");
    }
    assert!(!state.on_tick());
    assert!(!state.paused());
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::MoveRight,
    ];

    let play = |seed: u32| {
        let mut state = GameState::new(seed);
        state.start();
        let mut frames = Vec::new();
        for step in 0..400 {
            state.apply_action(script[step % script.len()]);
            state.on_tick();
            frames.push(state.snapshot());
        }
        frames
    };

    assert_eq!(play(777), play(777));
}

#[test]
fn test_gap_scenario_clears_one_line() {
    let mut state = game_starting_with(PieceKind::I, GameConfig::default(), &gap_board());

    let mut ticks = 0;
    while state.lines() == 0 && ticks < 100 {
        state.on_tick();
        ticks += 1;
    }

    assert_eq!(ticks, 17);
    assert_eq!(state.lines(), 1);
    assert_eq!(state.score(), 20);
    assert_eq!(state.moves(), 2);
    assert_eq!(state.board().get(19, 5), Some(Some(PieceKind::I)));
    assert_eq!(state.board().get(19, 0), Some(None));
    assert_eq!(state.board().occupied_count(), 3);
    assert_eq!(state.game_over(), None);
}

#[test]
fn test_soft_drop_matches_gravity() {
    let mut by_tick = game_starting_with(PieceKind::I, GameConfig::default(), &gap_board());
    let mut by_drop = by_tick.clone();

    for _ in 0..17 {
        by_tick.on_tick();
        by_drop.apply_action(GameAction::SoftDrop);
    }

    assert_eq!(by_tick.snapshot(), by_drop.snapshot());
    assert_eq!(by_drop.lines(), 1);
}

#[test]
fn test_goal_of_one_line_wins_immediately() {
    let config = GameConfig::default().with_goal_lines(1);
    let mut state = game_starting_with(PieceKind::I, config, &gap_board());

    for _ in 0..17 {
        state.on_tick();
    }

    assert_eq!(state.game_over(), Some(GameOverReason::GoalReached));
    assert!(state.active().is_none());
    assert!(!state.on_tick());
    assert!(!state.apply_action(GameAction::MoveLeft));

    let event = state.take_last_event().unwrap();
    assert_eq!(event.kind, PieceKind::I);
    assert_eq!(event.game_over, Some(GameOverReason::GoalReached));
}

#[test]
fn test_blocked_spawn_ends_game() {
    let mut board = Board::new();
    for col in 3..8 {
        board.set(1, col, Some(PieceKind::O));
    }
    let mut state = GameState::with_board(9, GameConfig::default(), board);
    state.start();

    assert_eq!(state.game_over(), Some(GameOverReason::Loss));
    assert!(state.active().is_none());
    assert_eq!(state.moves(), 1);
    assert!(!state.apply_action(GameAction::Pause));

    let snap = state.snapshot();
    assert_eq!(snap.game_over, Some(GameOverReason::Loss));
    assert!(!snap.playable());
}

#[test]
fn test_pieces_stack_until_loss() {
    let mut state = GameState::new(4242);
    state.start();

    let mut ticks = 0;
    while state.game_over().is_none() && ticks < 10_000 {
        state.on_tick();
        ticks += 1;
    }

    // Every piece falls straight down the middle, so the stack tops out.
    assert_eq!(state.game_over(), Some(GameOverReason::Loss));
    assert_eq!(state.lines(), 0);
    assert!(state.moves() > 1);
}

#[test]
fn test_pause_round_trip() {
    let mut state = GameState::new(5);
    state.start();
    let before = state.snapshot();

    assert!(state.apply_action(GameAction::Pause));
    assert!(state.paused());
    assert!(!state.on_tick());
    assert!(!state.apply_action(GameAction::MoveRight));

    assert!(state.apply_action(GameAction::Pause));
    assert!(!state.paused());
    assert_eq!(state.snapshot(), before);
}

#[test]
fn test_restart_increments_episode_and_keeps_config() {
    let config = GameConfig::default()
        .with_goal_lines(5)
        .with_piece_set(PieceSet::Standard);
    let mut state = GameState::with_config(31, config);
    state.start();
    for _ in 0..30 {
        state.on_tick();
    }

    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.episode_id(), 1);
    assert_eq!(state.moves(), 1);
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.board().occupied_count(), 0);
    assert_eq!(state.config(), &config);
    assert_eq!(state.goal_lines(), 5);
}

#[test]
fn test_standard_set_eventually_deals_j_and_s() {
    let config = GameConfig::default().with_piece_set(PieceSet::Standard);
    let mut state = GameState::with_config(17, config);
    state.start();

    let mut seen = Vec::new();
    for _ in 0..200 {
        if let Some(active) = state.active() {
            seen.push(active.kind);
        }
        state.apply_action(GameAction::Restart);
    }

    assert!(seen.contains(&PieceKind::J));
    assert!(seen.contains(&PieceKind::S));
}

#[test]
fn test_episode_seed_replays_restarted_episode() {
    let mut state = GameState::new(2024);
    state.start();
    assert_eq!(state.seed(), 2024);
    for _ in 0..50 {
        state.on_tick();
    }

    state.apply_action(GameAction::Restart);
    let episode_seed = state.seed();
    assert_ne!(episode_seed, 2024);

    let mut replay = GameState::new(episode_seed);
    replay.start();
    assert_eq!(replay.active(), state.active());
    assert_eq!(replay.next_piece(), state.next_piece());
    assert_eq!(replay.snapshot().seed, state.snapshot().seed);
}
