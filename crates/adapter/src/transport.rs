//! Transport - one TCP connection per request
//!
//! The exchange is: connect, write the whole request, half-close, read until
//! the server closes the connection. There is no length prefix; end of
//! stream marks the end of the response.
//!
//! The public API is blocking. `TcpTransport` owns a current-thread tokio
//! runtime and drives each exchange to completion with `block_on`, which is
//! what lets every step be bounded by a timeout.

use std::io::{self, Read};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::runtime::{Builder, Runtime};
use tokio::time::timeout;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::protocol::{decode, encode, Request, Response};

/// Something that can answer requests. Exactly one request is in flight at
/// a time.
pub trait Transport {
    fn send(&mut self, request: &Request) -> Result<Response, ClientError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, request: &Request) -> Result<Response, ClientError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, request: &Request) -> Result<Response, ClientError> {
        (**self).send(request)
    }
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    connect_timeout: Duration,
    read_timeout: Duration,
    max_response_bytes: usize,
}

pub struct TcpTransport {
    rt: Runtime,
    addr: String,
    limits: Limits,
}

impl TcpTransport {
    pub fn new(config: &ClientConfig) -> io::Result<Self> {
        let rt = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            rt,
            addr: config.addr(),
            limits: Limits {
                connect_timeout: config.connect_timeout,
                read_timeout: config.read_timeout,
                max_response_bytes: config.max_response_bytes,
            },
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, request: &Request) -> Result<Response, ClientError> {
        let bytes = encode(request)?;
        tracing::debug!(
            addr = %self.addr,
            kind = request.kind.tag(),
            bytes = bytes.len(),
            "sending request"
        );

        let received = self.rt.block_on(exchange(&self.addr, &bytes, self.limits))?;
        tracing::debug!(bytes = received.len(), "received response");

        if request.compress {
            let body = gunzip(&received, self.limits.max_response_bytes)?;
            decode(&body)
        } else {
            decode(&received)
        }
    }
}

/// Run one full exchange. The stream is dropped (closed) when this returns,
/// whichever path it returns on.
async fn exchange(addr: &str, request: &[u8], limits: Limits) -> Result<Vec<u8>, ClientError> {
    let conn_err = |source: io::Error| ClientError::Connection {
        addr: addr.to_string(),
        source,
    };

    let mut stream = timeout(limits.connect_timeout, TcpStream::connect(addr))
        .await
        .map_err(|_| conn_err(io::Error::new(io::ErrorKind::TimedOut, "connect timed out")))?
        .map_err(conn_err)?;

    stream.write_all(request).await.map_err(conn_err)?;
    if let Err(e) = stream.shutdown().await {
        // A server that already answered and closed is fine; the read below
        // reports anything worse.
        tracing::debug!(error = %e, "half-close failed");
    }

    let read_all = async {
        let mut received = Vec::with_capacity(4096);
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.map_err(conn_err)?;
            if n == 0 {
                break;
            }
            if received.len().saturating_add(n) > limits.max_response_bytes {
                return Err(ClientError::ResponseTooLarge {
                    limit: limits.max_response_bytes,
                });
            }
            received.extend_from_slice(&chunk[..n]);
        }
        Ok(received)
    };

    timeout(limits.read_timeout, read_all)
        .await
        .map_err(|_| ClientError::Timeout {
            addr: addr.to_string(),
            timeout: limits.read_timeout,
        })?
}

/// Decompress a gzip body, refusing to inflate past `limit` bytes.
pub fn gunzip(data: &[u8], limit: usize) -> Result<Vec<u8>, ClientError> {
    let mut out = Vec::new();
    flate2::read::GzDecoder::new(data)
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut out)
        .map_err(ClientError::Compression)?;
    if out.len() > limit {
        return Err(ClientError::ResponseTooLarge { limit });
    }
    Ok(out)
}
