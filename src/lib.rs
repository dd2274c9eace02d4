//! tui-rogue (workspace facade crate).
//!
//! Re-exports the member crates under one `tui_rogue::{adapter,core,input,term,types}`
//! namespace and hosts the process-level logging setup.

pub mod logging;

pub use tui_rogue_adapter as adapter;
pub use tui_rogue_core as core;
pub use tui_rogue_input as input;
pub use tui_rogue_term as term;
pub use tui_rogue_types as types;
