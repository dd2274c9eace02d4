//! Scripted game server and scripted terminal for integration tests.
//!
//! The server runs on its own thread with its own tokio runtime, so the
//! blocking client under test can be driven from a plain `#[test]`.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Write;
use std::net::SocketAddr;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use tui_rogue::adapter::ClientConfig;
use tui_rogue::core::Frontend;
use tui_rogue::term::Screen;

/// How the server answers one connection.
pub enum Reply {
    Body(Vec<u8>),
    /// Keep the connection open without answering.
    Stall(Duration),
}

impl Reply {
    pub fn json(v: Value) -> Self {
        Reply::Body(v.to_string().into_bytes())
    }

    pub fn gzip_json(v: Value) -> Self {
        Reply::Body(gzip(v.to_string().as_bytes()))
    }
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub struct ScriptedServer {
    pub addr: SocketAddr,
    handle: JoinHandle<Vec<Value>>,
}

impl ScriptedServer {
    /// Answer `connections` requests with `handler`, one connection each.
    pub fn spawn<H>(connections: usize, mut handler: H) -> Self
    where
        H: FnMut(usize, &Value) -> Reply + Send + 'static,
    {
        let (tx, rx) = std::sync::mpsc::channel();
        let handle = std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();

                let mut seen = Vec::new();
                for n in 0..connections {
                    let (mut stream, _) = listener.accept().await.unwrap();
                    // The client half-closes after writing, so EOF ends the request.
                    let mut buf = Vec::new();
                    let _ = stream.read_to_end(&mut buf).await;
                    let request: Value = serde_json::from_slice(&buf).unwrap_or(Value::Null);

                    match handler(n, &request) {
                        Reply::Body(bytes) => {
                            let _ = stream.write_all(&bytes).await;
                            let _ = stream.shutdown().await;
                        }
                        Reply::Stall(d) => tokio::time::sleep(d).await,
                    }
                    seen.push(request);
                }
                seen
            })
        });

        let addr = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("server did not signal ready");
        Self { addr, handle }
    }

    /// Answer with `replies` in order.
    pub fn with_replies(replies: Vec<Reply>) -> Self {
        let count = replies.len();
        let mut replies: VecDeque<Reply> = replies.into();
        Self::spawn(count, move |_, _| replies.pop_front().unwrap())
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            host: self.addr.ip().to_string(),
            port: self.addr.port(),
            connect_timeout: Duration::from_secs(2),
            read_timeout: Duration::from_secs(2),
            ..ClientConfig::default()
        }
    }

    /// Wait for the script to finish and return the requests it received.
    pub fn join(self) -> Vec<Value> {
        self.handle.join().expect("scripted server panicked")
    }
}

/// Key presses from a list; errors once the list runs out.
#[derive(Default)]
pub struct ScriptedTerminal {
    keys: VecDeque<Event>,
    pub frames: Vec<String>,
}

impl ScriptedTerminal {
    pub fn with_keys(keys: &[char]) -> Self {
        Self {
            keys: keys
                .iter()
                .map(|&c| Event::Key(KeyEvent::from(KeyCode::Char(c))))
                .collect(),
            frames: Vec::new(),
        }
    }
}

impl Frontend for ScriptedTerminal {
    fn draw(&mut self, screen: &Screen<'_>) -> anyhow::Result<()> {
        let fb = tui_rogue::term::GameView::new()
            .render(screen, tui_rogue::term::Viewport::new(120, 24));
        self.frames.push(fb.text());
        Ok(())
    }

    fn next_event(&mut self) -> anyhow::Result<Event> {
        self.keys
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("scripted input exhausted"))
    }
}
