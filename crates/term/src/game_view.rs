//! GameView: maps a server game snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout (terminal cells):
//!
//! ```text
//! col 0..80   map, one terminal cell per map cell, actors on top
//! col 82..    HUD: "Ticks: N", actor health lines, event messages
//! row H+1     game-over prompt (H = map rows)
//! row H+2     status line for server errors
//! ```

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Event, GameState, Health, Player, Position, Visible, MAP_WIDTH};

/// Column where the HUD starts.
pub const HUD_X: u16 = MAP_WIDTH as u16 + 2;

pub const GAME_OVER_PROMPT: &str = "You're dead :( Press R to restart, Q to quit.";

const PLAYER_STYLE: CellStyle = CellStyle::fg(Rgb::new(240, 220, 80)).bold();
const MONSTER_STYLE: CellStyle = CellStyle::fg(Rgb::new(100, 220, 120)).bold();
const WALL_STYLE: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const ERROR_STYLE: CellStyle = CellStyle::fg(Rgb::new(220, 80, 80)).bold();

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame shows.
#[derive(Debug, Clone, Copy, Default)]
pub struct Screen<'a> {
    pub state: Option<&'a GameState>,
    pub events: &'a [Event],
    /// Last server error, shown until the next successful response.
    pub status: Option<&'a str>,
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, screen: &Screen<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        if fb.width() != viewport.width || fb.height() != viewport.height {
            *fb = FrameBuffer::new(viewport.width, viewport.height);
        } else {
            fb.clear(Default::default());
        }

        let map_rows = screen.state.map(|gs| gs.map_rows() as u16).unwrap_or(0);

        if let Some(gs) = screen.state {
            self.draw_map(fb, gs);
            self.draw_actors(fb, gs);
            self.draw_hud(fb, gs, screen.events);
        }

        if screen.game_over {
            fb.put_str(
                0,
                map_rows.saturating_add(1),
                GAME_OVER_PROMPT,
                CellStyle::default().bold(),
            );
        }
        if let Some(msg) = screen.status {
            fb.put_str(0, map_rows.saturating_add(2), msg, ERROR_STYLE);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, screen: &Screen<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, viewport, &mut fb);
        fb
    }

    fn draw_map(&self, fb: &mut FrameBuffer, gs: &GameState) {
        for (i, cell) in gs.map.iter().enumerate() {
            if !cell.is_wall() {
                continue;
            }
            let (x, y) = (i % MAP_WIDTH, i / MAP_WIDTH);
            if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
                fb.put_char(x, y, '#', WALL_STYLE);
            }
        }
    }

    fn draw_actors(&self, fb: &mut FrameBuffer, gs: &GameState) {
        for actor in &gs.actors {
            let (Some(pos), Some(vis)) = (actor.get::<Position>(), actor.get::<Visible>()) else {
                continue;
            };
            let (Ok(x), Ok(y)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
                continue;
            };
            let style = if actor.has::<Player>() {
                PLAYER_STYLE
            } else {
                MONSTER_STYLE
            };
            fb.put_char(x, y, vis.glyph.as_char(), style);
        }
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, gs: &GameState, events: &[Event]) {
        let label = CellStyle::default();
        fb.put_str(HUD_X, 0, &format!("Ticks: {}", gs.ticks), label);

        let mut y: u16 = 2;
        for actor in &gs.actors {
            let (Some(vis), Some(health)) = (actor.get::<Visible>(), actor.get::<Health>()) else {
                continue;
            };
            let style = if actor.has::<Player>() {
                PLAYER_STYLE
            } else {
                label
            };
            let line = format!("{} - Hp: {}/{}", vis.glyph, health.hp, health.max_hp);
            fb.put_str(HUD_X, y, &line, style);
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        for msg in events.iter().filter_map(Event::message) {
            fb.put_str(HUD_X, y, msg, label);
            y = y.saturating_add(1);
        }
    }
}
