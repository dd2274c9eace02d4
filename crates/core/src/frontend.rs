//! The rendering surface and input source the interaction loop drives.

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal;

use crate::term::{FrameBuffer, GameView, Screen, TerminalRenderer, Viewport};

/// Where frames go and where key presses come from.
///
/// Both calls block. The loop draws once per turn, then reads one event.
pub trait Frontend {
    fn draw(&mut self, screen: &Screen<'_>) -> Result<()>;
    fn next_event(&mut self) -> Result<Event>;
}

impl<F: Frontend + ?Sized> Frontend for &mut F {
    fn draw(&mut self, screen: &Screen<'_>) -> Result<()> {
        (**self).draw(screen)
    }

    fn next_event(&mut self) -> Result<Event> {
        (**self).next_event()
    }
}

/// Real terminal: alternate screen, raw mode, blocking `crossterm` reads.
pub struct TerminalFrontend {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl TerminalFrontend {
    /// Switch the terminal into game mode.
    ///
    /// Callers must call [`TerminalFrontend::exit`] on every path out.
    pub fn enter() -> Result<Self> {
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        Ok(Self {
            renderer,
            view: GameView::new(),
            fb: FrameBuffer::new(0, 0),
        })
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl Frontend for TerminalFrontend {
    fn draw(&mut self, screen: &Screen<'_>) -> Result<()> {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        self.view.render_into(screen, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw(&self.fb)
    }

    fn next_event(&mut self) -> Result<Event> {
        let ev = event::read()?;
        if let Event::Resize(..) = ev {
            self.renderer.invalidate();
        }
        Ok(ev)
    }
}
