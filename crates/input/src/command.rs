//! Command lookup for the line-based inspection console.

use std::str::FromStr;

use crate::types::Direction;

/// One console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    ToggleMinify,
    ToggleCompress,
    Start,
    Move(Direction),
    Quit,
}

/// Accepted spellings, short form first.
pub const COMMANDS: &[(&str, &str, ConsoleCommand)] = &[
    ("m", "minify", ConsoleCommand::ToggleMinify),
    ("c", "compress", ConsoleCommand::ToggleCompress),
    ("s", "start", ConsoleCommand::Start),
    ("me", "move_east", ConsoleCommand::Move(Direction::East)),
    ("mw", "move_west", ConsoleCommand::Move(Direction::West)),
    ("mn", "move_north", ConsoleCommand::Move(Direction::North)),
    ("ms", "move_south", ConsoleCommand::Move(Direction::South)),
    ("q", "quit", ConsoleCommand::Quit),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl std::fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown command: {:?}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for ConsoleCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        COMMANDS
            .iter()
            .find(|(short, long, _)| *short == s || *long == s)
            .map(|&(_, _, cmd)| cmd)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// `m|minify, c|compress, ...` for help output.
pub fn usage() -> String {
    COMMANDS
        .iter()
        .map(|(short, long, _)| format!("{short}|{long}"))
        .collect::<Vec<_>>()
        .join(", ")
}
