//! Game state module - owns the complete model of one game
//!
//! This module ties together board, shape catalog, lookahead queue and
//! counters. Every mutation goes through [`GameState::apply_action`] (user
//! intents) or [`GameState::on_tick`] (gravity); both are synchronous and
//! bounded, so a single owner can serialize them.
//!
//! Gravity runs a small state machine:
//!
//! ```text
//! Falling --blocked--> Locking --> Cleared --goal--> GameOver(GoalReached)
//!    ^                                |
//!    |                                v
//!    +------------ ok ------------ Spawned --blocked--> GameOver(Loss)
//! ```

use crate::collision::{can_place, placement_cells};
use crate::config::GameConfig;
use crate::line_clear;
use crate::pieces::{layouts, next_rotation, spawn_anchor, Anchor, Layout};
use crate::rng::PieceQueue;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameOverReason, LockEvent, PieceKind};
use crate::Board;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Index into the kind's rotation layouts
    pub rotation: usize,
    pub anchor: Anchor,
}

impl ActivePiece {
    /// Create a new piece at the spawn anchor in rotation 0
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            anchor: spawn_anchor(),
        }
    }

    pub fn layout(&self) -> &'static Layout {
        &layouts(self.kind)[self.rotation]
    }

    /// Absolute `(row, col)` of each occupied cell
    pub fn cells(&self) -> [(i8, i8); 4] {
        let layout = *self.layout();
        layout.map(|offset| self.anchor.cell(offset))
    }

    /// Linear board indices, or None if any cell is off the board
    pub fn indices(&self) -> Option<[usize; 4]> {
        placement_cells(self.kind, self.rotation, self.anchor)
    }

    pub fn fits(&self, board: &Board) -> bool {
        can_place(self.kind, self.rotation, self.anchor, board)
    }
}

/// Progression states of the gravity state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Locking,
    Cleared,
    Spawned,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    queue: PieceQueue,
    /// Seed this episode's queue was built from
    seed: u32,
    phase: Phase,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Last lock/line-clear event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    /// Pieces spawned so far, the blocked spawn that ends a game included
    moves: u32,
    lines: u32,
    paused: bool,
    game_over: Option<GameOverReason>,
    started: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed and default rules
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    pub fn with_config(seed: u32, config: GameConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            active: None,
            queue: PieceQueue::new(seed, config.piece_set),
            seed,
            phase: Phase::Spawned,
            episode_id: 0,
            last_event: None,
            score: 0,
            moves: 0,
            lines: 0,
            paused: false,
            game_over: None,
            started: false,
        }
    }

    /// Create a game that starts on a prepared board
    pub fn with_board(seed: u32, config: GameConfig, board: Board) -> Self {
        let mut state = Self::with_config(seed, config);
        state.board = board;
        state
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.advance(Phase::Spawned);
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn goal_lines(&self) -> u32 {
        self.config.goal_lines
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek()
    }

    /// Seed of the current episode; replaying it reproduces the piece order
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// True while gravity and movement inputs have an effect
    pub fn is_running(&self) -> bool {
        self.started && !self.paused && self.game_over.is_none() && self.active.is_some()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.queue.peek();
        out.piece_set = self.config.piece_set;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.seed = self.seed;
        out.score = self.score;
        out.moves = self.moves;
        out.lines = self.lines;
        out.goal_lines = self.config.goal_lines;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a user intent. Returns true if the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Gravity tick. No-op while paused, over, or not started.
    pub fn on_tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.advance(Phase::Falling);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.is_running() && self.try_shift(0, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.is_running() && self.try_shift(0, 1)
    }

    /// One gravity step on demand; locks the piece if it cannot fall.
    pub fn soft_drop(&mut self) -> bool {
        self.on_tick()
    }

    /// Try the next rotation layout in place. No wall kicks.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotation = next_rotation(active.kind, active.rotation);
        if !can_place(active.kind, rotation, active.anchor, &self.board) {
            return false;
        }

        self.active = Some(ActivePiece { rotation, ..active });
        true
    }

    /// Toggle pause. Ignored once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over.is_some() {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Rebuild board, counters and queue, then spawn the first piece.
    ///
    /// The piece sequence continues from the current RNG state.
    pub fn restart(&mut self) {
        let seed = self.queue.seed();
        let config = self.config;
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::with_config(seed, config);
        self.episode_id = next_episode;
        self.start();
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Move the active piece if the shifted placement is valid.
    fn try_shift(&mut self, drow: i8, dcol: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let anchor = active.anchor.shifted(drow, dcol);
        if !can_place(active.kind, active.rotation, anchor, &self.board) {
            return false;
        }

        self.active = Some(ActivePiece { anchor, ..active });
        true
    }

    /// Run the state machine from `phase` until it settles in Falling or GameOver.
    fn advance(&mut self, mut phase: Phase) {
        let mut event: Option<LockEvent> = None;

        loop {
            self.phase = phase;
            phase = match phase {
                Phase::Falling => {
                    if self.try_shift(1, 0) {
                        break;
                    }
                    Phase::Locking
                }
                Phase::Locking => {
                    if let Some(active) = self.active.take() {
                        self.lock(active);
                        event = Some(LockEvent {
                            kind: active.kind,
                            lines_cleared: 0,
                            score_delta: 0,
                            game_over: None,
                        });
                    }
                    Phase::Cleared
                }
                Phase::Cleared => {
                    let result =
                        line_clear::resolve(&mut self.board, self.score, self.config.points_per_line);
                    if let Some(ev) = event.as_mut() {
                        ev.lines_cleared = result.lines_cleared;
                        ev.score_delta = result.score_delta(self.score);
                    }
                    self.score = result.new_score;
                    self.lines = self.lines.saturating_add(result.lines_cleared);

                    if result.lines_cleared > 0 && self.lines >= self.config.goal_lines {
                        self.game_over = Some(GameOverReason::GoalReached);
                        Phase::GameOver
                    } else {
                        Phase::Spawned
                    }
                }
                Phase::Spawned => {
                    if self.spawn_piece() {
                        self.phase = Phase::Falling;
                        break;
                    }
                    self.game_over = Some(GameOverReason::Loss);
                    Phase::GameOver
                }
                Phase::GameOver => {
                    self.active = None;
                    break;
                }
            };
        }

        if let Some(mut ev) = event {
            ev.game_over = self.game_over;
            self.last_event = Some(ev);
        }
    }

    /// Write the piece's cells into the board with its color tag.
    fn lock(&mut self, active: ActivePiece) {
        match active.indices() {
            Some(indices) => self.board.mark_occupied(&indices, active.kind),
            None => unreachable!("active piece left the board: {active:?}"),
        }
    }

    /// Pull the lookahead piece into play at the spawn anchor.
    /// Returns false if the spawn placement collides.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.queue.draw();
        self.moves = self.moves.wrapping_add(1);

        let piece = ActivePiece::new(kind);
        if !piece.fits(&self.board) {
            self.active = None;
            return false;
        }

        self.active = Some(piece);
        true
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
