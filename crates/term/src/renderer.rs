//! TerminalRenderer: presents game snapshots on a real terminal.
//!
//! The renderer remembers the last snapshot it showed and the size it showed
//! it at. A call to [`TerminalRenderer::draw`] is a no-op when neither has
//! changed, repaints the whole screen after a resize or an explicit
//! [`TerminalRenderer::invalidate`], and otherwise only rewrites the spans
//! of cells that differ from the previous frame.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::{GameView, Viewport};

/// Used when the terminal cannot report its size.
const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows
    front: FrameBuffer,
    /// Next frame under construction
    back: FrameBuffer,
    shown: Option<GameSnapshot>,
    /// Screen contents can no longer be trusted; repaint everything
    stale: bool,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            shown: None,
            stale: true,
            bytes: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.flush()?;
        self.stale = true;
        Ok(())
    }

    /// Restore the terminal. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes.queue(SetAttribute(Attribute::Reset))?;
        self.bytes.queue(ResetColor)?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Show `snap` at the current terminal size.
    ///
    /// Returns true if anything was written.
    pub fn draw(&mut self, view: &GameView, snap: &GameSnapshot) -> Result<bool> {
        let viewport = terminal::size()
            .map(|(w, h)| Viewport::new(w, h))
            .unwrap_or(FALLBACK_VIEWPORT);
        if !self.compose(view, snap, viewport)? {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Build the bytes for the next frame into `self.bytes`.
    /// Returns false when the screen is already up to date.
    fn compose(
        &mut self,
        view: &GameView,
        snap: &GameSnapshot,
        viewport: Viewport,
    ) -> Result<bool> {
        let resized =
            self.front.width() != viewport.width || self.front.height() != viewport.height;
        if !self.stale && !resized && self.shown.as_ref() == Some(snap) {
            return Ok(false);
        }

        view.render_into(snap, viewport, &mut self.back);

        self.bytes.clear();
        if self.stale || resized {
            paint_all(&self.back, &mut self.bytes)?;
        } else {
            paint_changes(&self.front, &self.back, &mut self.bytes)?;
        }

        std::mem::swap(&mut self.front, &mut self.back);
        self.shown = Some(*snap);
        self.stale = false;
        Ok(true)
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Tracks the style last sent to the terminal so runs of equally styled
/// cells only emit their glyphs.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn cell(&mut self, cell: Cell) -> io::Result<()> {
        if self.style != Some(cell.style) {
            // SGR reset clears colors too, so it has to come first.
            self.out.queue(SetAttribute(Attribute::Reset))?;
            self.out.queue(SetColors(Colors::new(
                color(cell.style.fg),
                color(cell.style.bg),
            )))?;
            if cell.style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if cell.style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> io::Result<()> {
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn paint_all(frame: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for (y, row) in rows(frame).enumerate() {
        painter.out.queue(cursor::MoveTo(0, y as u16))?;
        for &cell in row {
            painter.cell(cell)?;
        }
    }
    painter.finish()
}

/// Emit only the horizontal spans where `next` differs from `prev`.
/// Both frames must have the same size.
fn paint_changes(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    let mut painter = Painter::new(out);
    for (y, (old, new)) in rows(prev).zip(rows(next)).enumerate() {
        for (start, len) in changed_spans(old, new) {
            painter.out.queue(cursor::MoveTo(start as u16, y as u16))?;
            for &cell in &new[start..start + len] {
                painter.cell(cell)?;
            }
        }
    }
    painter.finish()
}

fn rows(frame: &FrameBuffer) -> impl Iterator<Item = &[Cell]> {
    frame.cells().chunks(frame.width().max(1) as usize)
}

/// `(start, len)` of each maximal run of differing cells in one row.
fn changed_spans<'a>(
    old: &'a [Cell],
    new: &'a [Cell],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < new.len() && old[x] == new[x] {
            x += 1;
        }
        if x == new.len() {
            return None;
        }
        let start = x;
        while x < new.len() && old[x] != new[x] {
            x += 1;
        }
        Some((start, x - start))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::GameAction;

    const CLEAR_ALL: &str = "\x1b[2J";

    fn started() -> GameState {
        let mut game = GameState::new(4);
        game.start();
        game
    }

    fn composed(
        renderer: &mut TerminalRenderer,
        snap: &GameSnapshot,
        vp: Viewport,
    ) -> Option<String> {
        let view = GameView::default();
        renderer
            .compose(&view, snap, vp)
            .unwrap()
            .then(|| String::from_utf8(renderer.bytes.clone()).unwrap())
    }

    #[test]
    fn first_frame_is_a_full_repaint() {
        let mut renderer = TerminalRenderer::new();
        let snap = started().snapshot();

        let text = composed(&mut renderer, &snap, Viewport::new(60, 24)).unwrap();
        assert!(text.starts_with(CLEAR_ALL));
        assert!(text.contains('┌'));
        assert!(text.contains("SCORE"));
    }

    #[test]
    fn unchanged_snapshot_writes_nothing() {
        let mut renderer = TerminalRenderer::new();
        let snap = started().snapshot();
        let vp = Viewport::new(60, 24);

        assert!(composed(&mut renderer, &snap, vp).is_some());
        assert!(composed(&mut renderer, &snap, vp).is_none());
    }

    #[test]
    fn moved_piece_is_painted_as_a_diff() {
        let mut renderer = TerminalRenderer::new();
        let mut game = started();
        let vp = Viewport::new(60, 24);
        composed(&mut renderer, &game.snapshot(), vp).unwrap();

        game.apply_action(GameAction::SoftDrop);
        let text = composed(&mut renderer, &game.snapshot(), vp).unwrap();
        assert!(!text.contains(CLEAR_ALL));
        assert!(text.contains('█'));
        assert!(!text.contains("SCORE"));
    }

    #[test]
    fn resize_and_invalidate_force_a_full_repaint() {
        let mut renderer = TerminalRenderer::new();
        let snap = started().snapshot();
        composed(&mut renderer, &snap, Viewport::new(60, 24)).unwrap();

        let text = composed(&mut renderer, &snap, Viewport::new(72, 24)).unwrap();
        assert!(text.starts_with(CLEAR_ALL));

        renderer.invalidate();
        let text = composed(&mut renderer, &snap, Viewport::new(72, 24)).unwrap();
        assert!(text.starts_with(CLEAR_ALL));
    }

    #[test]
    fn changed_spans_coalesce_adjacent_cells() {
        let old = [Cell::default(); 6];
        let mut new = old;
        let x = CellStyle::default().cell('X');
        new[1] = x;
        new[2] = x;
        new[3] = x;
        new[5] = x;

        let spans: Vec<_> = changed_spans(&old, &new).collect();
        assert_eq!(spans, vec![(1, 3), (5, 1)]);
        assert_eq!(changed_spans(&old, &old).count(), 0);
    }
}
