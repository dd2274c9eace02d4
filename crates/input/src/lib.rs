//! Terminal input module.
//!
//! Maps `crossterm` key events into client intents for the play and
//! game-over screens, and parses the inspection console's command words.

pub mod command;
pub mod map;

pub use tui_rogue_types as types;

pub use command::{ConsoleCommand, UnknownCommand};
pub use map::{handle_game_over_key, handle_key_event, should_quit, GameOverChoice, PlayIntent};
