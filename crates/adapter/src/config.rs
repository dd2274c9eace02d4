//! Client configuration.
//!
//! Defaults can be overridden with environment variables; command line flags
//! are applied on top by the binary.

use std::str::FromStr;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::types::{DEFAULT_HOST, DEFAULT_PORT};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on a single (decompressed) response body.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub max_response_bytes: usize,
    /// Sent as the body of every start request.
    pub start_config: Map<String, Value>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            start_config: Map::new(),
        }
    }
}

impl ClientConfig {
    /// Create from environment variables.
    ///
    /// - `ROGUE_HOST`, `ROGUE_PORT`
    /// - `ROGUE_CONNECT_TIMEOUT_MS`, `ROGUE_READ_TIMEOUT_MS`
    /// - `ROGUE_MAX_RESPONSE_BYTES`
    /// - `ROGUE_START_CONFIG`: JSON object sent with start requests
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("ROGUE_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = parse_var(&lookup, "ROGUE_PORT").unwrap_or(defaults.port);
        let connect_timeout =
            timeout_var(&lookup, "ROGUE_CONNECT_TIMEOUT_MS").unwrap_or(defaults.connect_timeout);
        let read_timeout =
            timeout_var(&lookup, "ROGUE_READ_TIMEOUT_MS").unwrap_or(defaults.read_timeout);
        let max_response_bytes = parse_var(&lookup, "ROGUE_MAX_RESPONSE_BYTES")
            .filter(|&n: &usize| {
                if n == 0 {
                    tracing::warn!("ROGUE_MAX_RESPONSE_BYTES must be positive; using default");
                }
                n > 0
            })
            .unwrap_or(defaults.max_response_bytes);

        let start_config = match lookup("ROGUE_START_CONFIG") {
            Some(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                _ => {
                    tracing::warn!("ROGUE_START_CONFIG is not a JSON object; using {{}}");
                    Map::new()
                }
            },
            None => defaults.start_config,
        };

        Self {
            host,
            port,
            connect_timeout,
            read_timeout,
            max_response_bytes,
            start_config,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse `key` if set. Unparsable values are logged and treated as unset.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let text = lookup(key)?;
    match text.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(value = %text, "{key} is not valid; using default");
            None
        }
    }
}

/// Milliseconds; zero is rejected since every operation would time out.
fn timeout_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    match parse_var::<u64>(lookup, key)? {
        0 => {
            tracing::warn!("{key} must be positive; using default");
            None
        }
        ms => Some(Duration::from_millis(ms)),
    }
}
