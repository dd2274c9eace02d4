//! Error taxonomy for the client side of the protocol.

use std::time::Duration;

/// Errors produced by the codec and the transport.
///
/// A well-formed response with `status == ERROR` is not one of these; it is
/// an ordinary [`crate::Response`] the caller inspects.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connect refused, reset, connect timeout, or a failed write.
    #[error("connection to {addr} failed: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server did not close the connection within the read timeout.
    #[error("no complete response from {addr} within {timeout:?}")]
    Timeout { addr: String, timeout: Duration },

    #[error("response exceeds {limit} bytes")]
    ResponseTooLarge { limit: usize },

    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Bytes are not well-formed JSON or miss required fields.
    #[error("decode failed: {0}")]
    Decode(String),

    /// `compress` was requested but the body is not valid gzip.
    #[error("decompression failed: {0}")]
    Compression(#[source] std::io::Error),

    /// The server answered the start request with `status == ERROR`.
    #[error("server rejected start request: {0}")]
    StartRejected(String),
}

impl ClientError {
    /// True for malformed wire bytes; these indicate a protocol bug rather
    /// than a recoverable condition.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            ClientError::Encode(_) | ClientError::Decode(_) | ClientError::Compression(_)
        )
    }

    /// True for failures of the connection itself.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ClientError::Connection { .. }
                | ClientError::Timeout { .. }
                | ClientError::ResponseTooLarge { .. }
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
