//! Protocol module - JSON request/response types for the game server
//!
//! One JSON document per direction per connection. Requests carry the session
//! identity and options plus a `type` object with exactly one key:
//!
//! ```text
//! {"game_id":null,"compress":false,"minify":true,"type":{"START":{}}}
//! {"game_id":"g-1","compress":false,"minify":true,"type":{"GAME_CMD":{"MOVE":{"x":1,"y":0}}}}
//! {"game_id":"g-1","compress":false,"minify":true,"type":{"QUIT":{}}}
//! ```
//!
//! Responses carry `status`, `game_id` and a `payload` whose optional
//! `CMD_RESULT` holds the new `state`, the `events` and a `result` code.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::session::Session;
use crate::types::{Direction, Event, GameState, Outcome, MOVE_ACTION};

pub const START_TAG: &str = "START";
pub const GAME_CMD_TAG: &str = "GAME_CMD";
pub const QUIT_TAG: &str = "QUIT";
pub const CMD_RESULT_KEY: &str = "CMD_RESULT";

// ============== Client -> Server ==============

/// A single request. Built fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub game_id: Option<String>,
    pub compress: bool,
    pub minify: bool,
    #[serde(rename = "type")]
    pub kind: RequestKind,
}

impl Request {
    pub fn is_quit(&self) -> bool {
        matches!(self.kind, RequestKind::Quit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    Start(Map<String, Value>),
    Action { name: String, args: Option<Value> },
    Quit,
}

impl RequestKind {
    pub fn tag(&self) -> &'static str {
        match self {
            RequestKind::Start(_) => START_TAG,
            RequestKind::Action { .. } => GAME_CMD_TAG,
            RequestKind::Quit => QUIT_TAG,
        }
    }
}

/// `{name: args}` with `null` for missing args.
struct ActionBody<'a> {
    name: &'a str,
    args: &'a Option<Value>,
}

impl Serialize for ActionBody<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name, self.args)?;
        map.end()
    }
}

impl Serialize for RequestKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            RequestKind::Start(config) => map.serialize_entry(START_TAG, config)?,
            RequestKind::Action { name, args } => {
                map.serialize_entry(GAME_CMD_TAG, &ActionBody { name, args })?
            }
            RequestKind::Quit => map.serialize_entry(QUIT_TAG, &Map::new())?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RequestKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let outer = Map::<String, Value>::deserialize(deserializer)?;
        if outer.len() != 1 {
            return Err(D::Error::custom("request type must have exactly one key"));
        }
        let Some((tag, body)) = outer.into_iter().next() else {
            return Err(D::Error::custom("request type must have exactly one key"));
        };

        match tag.as_str() {
            START_TAG => match body {
                Value::Object(config) => Ok(RequestKind::Start(config)),
                Value::Null => Ok(RequestKind::Start(Map::new())),
                _ => Err(D::Error::custom("START body must be an object")),
            },
            GAME_CMD_TAG => {
                let Value::Object(cmd) = body else {
                    return Err(D::Error::custom("GAME_CMD body must be an object"));
                };
                if cmd.len() != 1 {
                    return Err(D::Error::custom("GAME_CMD must name exactly one action"));
                }
                let Some((name, args)) = cmd.into_iter().next() else {
                    return Err(D::Error::custom("GAME_CMD must name exactly one action"));
                };
                let args = if args.is_null() { None } else { Some(args) };
                Ok(RequestKind::Action { name, args })
            }
            QUIT_TAG => Ok(RequestKind::Quit),
            other => Err(D::Error::custom(format!("unknown request type: {other}"))),
        }
    }
}

fn build(session: &Session, kind: RequestKind) -> Request {
    Request {
        game_id: session.token().map(str::to_owned),
        compress: session.compress(),
        minify: session.minify(),
        kind,
    }
}

pub fn build_start(session: &Session, config: Map<String, Value>) -> Request {
    build(session, RequestKind::Start(config))
}

pub fn build_action(session: &Session, name: &str, args: Option<Value>) -> Request {
    build(
        session,
        RequestKind::Action {
            name: name.to_string(),
            args,
        },
    )
}

pub fn build_quit(session: &Session) -> Request {
    build(session, RequestKind::Quit)
}

/// `MOVE {x, y}` for one step in `dir`.
pub fn build_move(session: &Session, dir: Direction) -> Request {
    let (x, y) = dir.delta();
    let mut args = Map::new();
    args.insert("x".to_string(), Value::from(x));
    args.insert("y".to_string(), Value::from(y));
    build_action(session, MOVE_ACTION, Some(Value::Object(args)))
}

/// Serialize a request to compact JSON bytes.
pub fn encode(request: &Request) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(request).map_err(ClientError::Encode)
}

// ============== Server -> Client ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ERROR")]
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => f.write_str("OK"),
            Status::Error => f.write_str("ERROR"),
        }
    }
}

/// Decoded response.
///
/// `state` and `events` are lifted out of `payload.CMD_RESULT` during decode;
/// they are only reachable through `game_state` and `events`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: Status,
    pub game_id: Option<String>,
    pub payload: Map<String, Value>,
    pub game_state: Option<GameState>,
    pub events: Option<Vec<Event>>,
}

#[derive(Deserialize)]
struct RawResponse {
    status: Status,
    #[serde(default)]
    game_id: Option<String>,
    #[serde(default)]
    payload: Value,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// The remaining `CMD_RESULT` fields, if the payload has one.
    pub fn cmd_result(&self) -> Option<&Map<String, Value>> {
        self.payload.get(CMD_RESULT_KEY).and_then(Value::as_object)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.cmd_result()
            .and_then(|r| r.get("result"))
            .and_then(Value::as_str)
            .map(Outcome::from_code)
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some_and(|o| o.is_game_over())
    }

    /// Human-readable diagnostic for an `ERROR` response.
    pub fn error_message(&self) -> String {
        for key in ["error", "message", "msg"] {
            if let Some(text) = self.payload.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
        if self.payload.is_empty() {
            return format!("server returned {}", self.status);
        }
        Value::Object(self.payload.clone()).to_string()
    }
}

/// Parse response bytes and lift `state`/`events` into typed fields.
pub fn decode(bytes: &[u8]) -> Result<Response, ClientError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ClientError::Decode(format!("response is not UTF-8: {e}")))?;
    let raw: RawResponse = serde_json::from_str(text)?;

    let mut payload = match raw.payload {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(ClientError::Decode(format!(
                "payload must be an object, got {other}"
            )))
        }
    };

    let (state, events) = match payload.get_mut(CMD_RESULT_KEY) {
        Some(Value::Object(result)) => (result.remove("state"), result.remove("events")),
        _ => (None, None),
    };

    let game_state = match state {
        None | Some(Value::Null) => None,
        Some(Value::Object(m)) if m.is_empty() => None,
        Some(v) => Some(serde_json::from_value::<GameState>(v)?),
    };
    let events = match events {
        None | Some(Value::Null) => None,
        Some(v) => Some(serde_json::from_value::<Vec<Event>>(v)?),
    };

    Ok(Response {
        status: raw.status,
        game_id: raw.game_id,
        payload,
        game_state,
        events,
    })
}
