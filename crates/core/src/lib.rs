//! Client core: the interaction loop and the inspection console.
//!
//! Both drive a [`Session`](crate::adapter::Session) through a
//! [`Transport`](crate::adapter::Transport), one blocking request at a time.
//! The interaction loop renders through a [`Frontend`], which the binary
//! backs with the real terminal and the tests back with scripted input.

pub mod console;
pub mod frontend;
pub mod machine;

pub use tui_rogue_adapter as adapter;
pub use tui_rogue_input as input;
pub use tui_rogue_term as term;
pub use tui_rogue_types as types;

pub use console::Console;
pub use frontend::{Frontend, TerminalFrontend};
pub use machine::{InteractionLoop, Phase, ViewState};
