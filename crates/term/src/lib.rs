//! Terminal "game renderer" module.
//!
//! Game snapshots are drawn into a plain framebuffer by a pure view, and the
//! framebuffer is flushed to the terminal with `crossterm`. Keeping the view
//! free of I/O lets the layout be tested without a terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_rogue_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Screen, Viewport, GAME_OVER_PROMPT, HUD_X};
pub use renderer::{encode_frame_into, TerminalRenderer};
