//! Inspection console: send requests by hand and print the decoded replies.
//!
//! Uses the same session and transport as the game loop; there is no game
//! state here beyond the session token.

use std::io::{BufRead, Write};

use anyhow::Result;
use serde_json::{Map, Value};

use crate::adapter::{RequestKind, Session, Transport};
use crate::input::command::usage;
use crate::input::ConsoleCommand;

pub const PROMPT: &str = "Input: ";

pub struct Console<T, R, W> {
    transport: T,
    session: Session,
    start_config: Map<String, Value>,
    input: R,
    output: W,
}

impl<T: Transport, R: BufRead, W: Write> Console<T, R, W> {
    pub fn new(transport: T, input: R, output: W) -> Self {
        Self {
            transport,
            session: Session::new(),
            start_config: Map::new(),
            input,
            output,
        }
    }

    pub fn with_start_config(mut self, config: Map<String, Value>) -> Self {
        self.start_config = config;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read and execute commands until end of input.
    ///
    /// Network failures and `ERROR` replies are printed and the loop goes
    /// on; malformed response bytes end it with an error.
    pub fn run(&mut self) -> Result<()> {
        let mut line = String::new();
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<ConsoleCommand>() {
                Ok(cmd) => self.execute(cmd)?,
                Err(e) => writeln!(self.output, "{e} (commands: {})", usage())?,
            }
        }
    }

    pub fn execute(&mut self, cmd: ConsoleCommand) -> Result<()> {
        let request = match cmd {
            ConsoleCommand::ToggleMinify => {
                let on = self.session.toggle_minify();
                writeln!(self.output, "Minify opt is {on}")?;
                return Ok(());
            }
            ConsoleCommand::ToggleCompress => {
                let on = self.session.toggle_compress();
                writeln!(self.output, "Compress opt is {on}")?;
                return Ok(());
            }
            ConsoleCommand::Start => self.session.start(self.start_config.clone()),
            ConsoleCommand::Move(dir) => self.session.move_toward(dir),
            ConsoleCommand::Quit => self.session.quit(),
        };

        let result = self.transport.send(&request);
        if request.is_quit() {
            self.session.clear();
        }

        match result {
            Ok(response) => {
                if matches!(request.kind, RequestKind::Start(_)) {
                    self.session.apply_start_result(&response);
                }
                writeln!(self.output, "{response:#?}")?;
            }
            Err(e) if e.is_protocol() => return Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "request failed");
                writeln!(self.output, "[error] {e}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{decode, ClientError, Request, Response};
    use std::io::Cursor;

    struct Replies {
        sent: Vec<Request>,
        next: Vec<Result<Response, ClientError>>,
    }

    impl Transport for Replies {
        fn send(&mut self, request: &Request) -> Result<Response, ClientError> {
            self.sent.push(request.clone());
            self.next.remove(0)
        }
    }

    fn ok(game_id: &str) -> Result<Response, ClientError> {
        let body = format!(r#"{{"status":"OK","game_id":"{game_id}","payload":{{}}}}"#);
        Ok(decode(body.as_bytes()).unwrap())
    }

    fn run_script(
        script: &str,
        next: Vec<Result<Response, ClientError>>,
    ) -> (Result<()>, String, Replies, Session) {
        let mut transport = Replies {
            sent: Vec::new(),
            next,
        };
        let mut out = Vec::new();
        let (result, session) = {
            let mut console =
                Console::new(&mut transport, Cursor::new(script.to_string()), &mut out);
            let result = console.run();
            (result, console.session().clone())
        };
        (result, String::from_utf8(out).unwrap(), transport, session)
    }

    #[test]
    fn toggles_print_new_value_and_send_nothing() {
        let (result, out, transport, session) = run_script("m\ncompress\nc\n", vec![]);
        result.unwrap();
        assert!(out.contains("Minify opt is false"));
        assert!(out.contains("Compress opt is true"));
        assert!(out.contains("Compress opt is false"));
        assert!(transport.sent.is_empty());
        assert!(!session.minify());
    }

    #[test]
    fn start_then_move_then_quit() {
        let (result, out, transport, session) =
            run_script("s\nme\nq\n", vec![ok("g-7"), ok("g-7"), ok("g-7")]);
        result.unwrap();

        assert_eq!(transport.sent.len(), 3);
        assert_eq!(transport.sent[0].game_id, None);
        assert_eq!(transport.sent[1].game_id.as_deref(), Some("g-7"));
        assert!(transport.sent[2].is_quit());
        assert_eq!(session.token(), None);
        assert!(out.contains("game_id: Some("));
    }

    #[test]
    fn connection_errors_are_reported_not_fatal() {
        let refused = ClientError::Connection {
            addr: "127.0.0.1:9".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };
        let (result, out, transport, _) = run_script("s\ns\n", vec![Err(refused), ok("g-1")]);
        result.unwrap();
        assert!(out.contains("[error] connection to 127.0.0.1:9 failed"));
        assert_eq!(transport.sent.len(), 2);
    }

    #[test]
    fn decode_errors_are_fatal() {
        let (result, _, transport, _) = run_script(
            "s\ns\n",
            vec![Err(ClientError::Decode("bad json".to_string()))],
        );
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Decode(_))
        ));
        assert_eq!(transport.sent.len(), 1);
    }

    #[test]
    fn unknown_command_prints_usage() {
        let (result, out, transport, _) = run_script("dance\n\n", vec![]);
        result.unwrap();
        assert!(out.contains("unknown command"));
        assert!(out.contains("s|start"));
        assert!(transport.sent.is_empty());
    }
}
