//! Terminal roguelike client (default binary).
//!
//! Plays against a game server over TCP, rendering with crossterm into a
//! framebuffer. `--playground` runs the line-based inspection console instead.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tui_rogue::adapter::{ClientConfig, TcpTransport};
use tui_rogue::core::{Console, InteractionLoop, TerminalFrontend};
use tui_rogue::logging::{self, Mode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server host
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(long)]
    port: Option<u16>,

    /// Send and inspect requests by hand
    #[arg(long)]
    playground: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[client error] {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mode = if cli.playground {
        Mode::Console
    } else {
        Mode::Terminal
    };
    logging::init(mode)?;

    let mut config = ClientConfig::from_env();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    tracing::info!(addr = %config.addr(), ?mode, "client starting");

    let transport = TcpTransport::new(&config).context("creating transport runtime")?;

    match mode {
        Mode::Console => {
            let stdin = io::stdin();
            Console::new(transport, stdin.lock(), io::stdout())
                .with_start_config(config.start_config)
                .run()
        }
        Mode::Terminal => {
            let mut frontend = TerminalFrontend::enter()?;
            let result = InteractionLoop::new(transport, &mut frontend)
                .with_start_config(config.start_config)
                .run();

            // Always try to restore terminal state.
            let _ = frontend.exit();
            result
        }
    }
}
