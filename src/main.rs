//! Terminal blockfall runner (default binary).
//!
//! The game itself runs on the engine's own runtime; this loop only forwards
//! key presses and redraws whenever a new snapshot is published or the
//! terminal is resized.
//!
//! Configuration comes from `TETRIS_*` environment variables, see
//! [`EngineConfig::from_env`].

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};

use tui_blockfall::engine::{Engine, EngineConfig};
use tui_blockfall::input::{handle_key_event, is_actionable, should_quit};
use tui_blockfall::term::{GameView, TerminalRenderer};

/// Input poll timeout, roughly one frame at 60 fps.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    let engine = Engine::start(config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&engine, &mut term);

    // Always try to restore terminal state before reporting anything.
    let _ = term.exit();
    let shutdown = engine.shutdown();

    result?;
    let state = shutdown?;
    println!(
        "[Blockfall] episode {} finished: score {}, lines {}, moves {}",
        state.episode_id(),
        state.score(),
        state.lines(),
        state.moves()
    );
    Ok(())
}

fn run(engine: &Engine, term: &mut TerminalRenderer) -> Result<()> {
    let view = GameView::default();

    loop {
        term.draw(&view, &engine.snapshot())?;

        if !event::poll(FRAME)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if is_actionable(&key) => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    // A full queue only drops this keystroke.
                    let _ = engine.send(action);
                }
            }
            // Some terminals scramble the screen on resize even when the
            // reported size ends up unchanged.
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
