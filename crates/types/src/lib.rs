//! Core types module - shared data structures and constants
//!
//! This crate defines the game data the client receives from the server.
//! All types are plain data with serde support, so they can be used by the
//! protocol layer, the terminal view and the tests alike.
//!
//! # Map Dimensions
//!
//! The server sends the map as a flat sequence of cells with a fixed row width:
//!
//! - **Width**: 80 columns (`MAP_WIDTH`)
//! - **Cell `i`** is drawn at column `i % MAP_WIDTH`, row `i / MAP_WIDTH`
//!
//! # Actors and capabilities
//!
//! Actors carry no fixed type. Each actor holds a mapping of capability name
//! to capability data, and callers branch on which capabilities are present:
//!
//! | Name | Type | Data |
//! |------|------|------|
//! | `POSITION` | [`Position`] | `{x, y}` |
//! | `VISIBLE` | [`Visible`] | `{glyph}` |
//! | `HEALTH` | [`Health`] | `{hp, max_hp}` |
//! | `PLAYER` | [`Player`] | marker, data ignored |
//!
//! # Examples
//!
//! ```
//! use tui_rogue_types::{Actor, Health, Player, Position};
//!
//! let actor: Actor = serde_json::from_str(
//!     r#"{"components":{"POSITION":{"x":3,"y":4},"PLAYER":{}}}"#,
//! ).unwrap();
//!
//! assert_eq!(actor.get::<Position>(), Some(Position { x: 3, y: 4 }));
//! assert!(actor.has::<Player>());
//! assert!(actor.get::<Health>().is_none());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Map row width in cells (80 columns)
pub const MAP_WIDTH: usize = 80;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 9999;

/// Result code the server uses to end a session.
pub const GAME_OVER_CODE: &str = "GAME_OVER";

/// A single map cell kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKind {
    Wall,
    Floor,
    /// Any other tag the server may send; drawn as open space.
    Other(String),
}

impl CellKind {
    /// Parse a wire tag (case-sensitive, as sent by the server).
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "WALL" => Self::Wall,
            "FLOOR" => Self::Floor,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Wall => "WALL",
            Self::Floor => "FLOOR",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Self::Wall)
    }
}

impl<'de> Deserialize<'de> for CellKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&s))
    }
}

impl Serialize for CellKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_tag())
    }
}

/// Outcome code attached to a command result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The session has ended; the client should offer restart/quit.
    GameOver,
    /// Any other code; play continues.
    Continue(String),
}

impl Outcome {
    pub fn from_code(code: &str) -> Self {
        if code == GAME_OVER_CODE {
            Self::GameOver
        } else {
            Self::Continue(code.to_string())
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver)
    }
}

/// Game snapshot sent by the server after every command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub ticks: u64,
    #[serde(default)]
    pub map: Vec<CellKind>,
    #[serde(default)]
    pub actors: Vec<Actor>,
}

impl GameState {
    /// Number of map rows, rounding a partial last row up.
    pub fn map_rows(&self) -> usize {
        self.map.len().div_ceil(MAP_WIDTH)
    }

    /// The actor carrying the `PLAYER` marker, if any.
    pub fn player(&self) -> Option<&Actor> {
        self.actors.iter().find(|a| a.has::<Player>())
    }
}

/// One entity on the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub components: Components,
}

impl Actor {
    pub fn has<C: Capability>(&self) -> bool {
        self.components.has::<C>()
    }

    pub fn get<C: Capability>(&self) -> Option<C> {
        self.components.get::<C>()
    }
}

/// Capability name to raw capability data.
///
/// Raw values are kept so capabilities unknown to this client survive
/// a decode and can still be inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Components(BTreeMap<String, Value>);

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, data: Value) {
        self.0.insert(name.into(), data);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn has<C: Capability>(&self) -> bool {
        self.contains(C::NAME)
    }

    /// Typed lookup. Returns `None` when the capability is absent or its data
    /// does not have the expected shape.
    pub fn get<C: Capability>(&self) -> Option<C> {
        self.0
            .get(C::NAME)
            .and_then(|v| C::deserialize(v.clone()).ok())
    }
}

/// A named data fragment that can be attached to an actor.
pub trait Capability: DeserializeOwned {
    const NAME: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Capability for Position {
    const NAME: &'static str = "POSITION";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Visible {
    pub glyph: Glyph,
}

impl Capability for Visible {
    const NAME: &'static str = "VISIBLE";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Health {
    pub hp: i64,
    pub max_hp: i64,
}

impl Capability for Health {
    const NAME: &'static str = "HEALTH";
}

/// Marker for the actor controlled by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player;

impl<'de> Deserialize<'de> for Player {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Marker only: whatever data the server attaches is ignored.
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(Player)
    }
}

impl Capability for Player {
    const NAME: &'static str = "PLAYER";
}

/// Display glyph of an actor.
///
/// The server sends a code point integer; a one-character string is also
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph(pub char);

impl Glyph {
    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Glyph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = Glyph;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a code point or a one-character string")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u32::try_from(v)
                    .ok()
                    .and_then(char::from_u32)
                    .map(Glyph)
                    .ok_or_else(|| E::custom("invalid glyph code point"))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v < 0 {
                    return Err(E::custom("invalid glyph code point"));
                }
                self.visit_u64(v as u64)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let mut chars = v.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(Glyph(ch)),
                    _ => Err(E::custom("glyph string must be one character")),
                }
            }
        }

        deserializer.deserialize_any(V)
    }
}

impl Serialize for Glyph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.0 as u32)
    }
}

/// Event record reported alongside a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// The message text, if present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.msg.as_deref().filter(|m| !m.is_empty())
    }
}

/// Movement direction for the `MOVE` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    South,
    North,
    East,
}

impl Direction {
    /// Map delta `(x, y)`; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::North => (0, -1),
            Direction::East => (1, 0),
        }
    }
}

/// Action name of a move command.
pub const MOVE_ACTION: &str = "MOVE";
