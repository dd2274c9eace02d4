//! Adapter module - game server protocol over TCP with JSON messages
//!
//! This crate is the client's view of the game server: it builds requests,
//! ships them over a fresh TCP connection, and decodes the response.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: one TCP connection per request (default: 127.0.0.1:9999)
//! 2. **Request**: the client writes one JSON document, then half-closes
//! 3. **Response**: the server writes one JSON document (gzip when the request
//!    asked for `compress`) and closes the connection
//!
//! # Request Types
//!
//! - **START**: begin a session; the response carries the session token (`game_id`)
//! - **GAME_CMD**: one named action with optional arguments, e.g. `MOVE {x, y}`
//! - **QUIT**: end the session
//!
//! # Environment Variables
//!
//! See [`ClientConfig::from_env`].
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"game_id":null,"compress":false,"minify":true,"type":{"START":{}}}
//! Server -> Client: {"status":"OK","game_id":"5d1c…","payload":{"CMD_RESULT":{"state":{…},"events":[],"result":"OK"}}}
//! Client -> Server: {"game_id":"5d1c…","compress":false,"minify":true,"type":{"GAME_CMD":{"MOVE":{"x":1,"y":0}}}}
//! Server -> Client: {"status":"OK","game_id":"5d1c…","payload":{"CMD_RESULT":{…}}}
//! ```

pub mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod transport;

pub use tui_rogue_types as types;

pub use config::ClientConfig;
pub use error::ClientError;
pub use protocol::{
    build_action, build_move, build_quit, build_start, decode, encode, Request, RequestKind,
    Response, Status,
};
pub use session::Session;
pub use transport::{TcpTransport, Transport};
