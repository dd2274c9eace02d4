//! Logging setup.
//!
//! - `ROGUE_LOG`: filter directives (`EnvFilter` syntax), e.g. `debug` or
//!   `tui_rogue_adapter=trace`
//! - `ROGUE_LOG_PATH`: append log lines to this file instead of stderr
//!
//! Without either, the terminal UI logs nothing (stderr would scribble over
//! the alternate screen) and the console logs warnings to stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Where the process is going to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Terminal,
    Console,
}

fn default_directive(mode: Mode, to_file: bool) -> &'static str {
    match (mode, to_file) {
        (_, true) => "info",
        (Mode::Terminal, false) => "off",
        (Mode::Console, false) => "warn",
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(mode: Mode) -> Result<()> {
    let path = std::env::var("ROGUE_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let filter = EnvFilter::try_from_env("ROGUE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive(mode, path.is_some())));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {path}"))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "subscriber already installed");
    }
    Ok(())
}
