//! Session - the identity shared by consecutive requests.

use serde_json::{Map, Value};

use crate::protocol::{self, Request, Response, Status};
use crate::types::Direction;

/// Cross-request state: the server-assigned token plus protocol options.
///
/// Owned by whichever loop is driving the client; the codec only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    compress: bool,
    minify: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            token: None,
            compress: false,
            minify: true,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn compress(&self) -> bool {
        self.compress
    }

    pub fn minify(&self) -> bool {
        self.minify
    }

    pub fn set_compress(&mut self, on: bool) {
        self.compress = on;
    }

    pub fn set_minify(&mut self, on: bool) {
        self.minify = on;
    }

    /// Flip the compression option and return the new value.
    pub fn toggle_compress(&mut self) -> bool {
        self.compress = !self.compress;
        self.compress
    }

    /// Flip the minify option and return the new value.
    pub fn toggle_minify(&mut self) -> bool {
        self.minify = !self.minify;
        self.minify
    }

    pub fn start(&self, config: Map<String, Value>) -> Request {
        protocol::build_start(self, config)
    }

    pub fn action(&self, name: &str, args: Option<Value>) -> Request {
        protocol::build_action(self, name, args)
    }

    pub fn quit(&self) -> Request {
        protocol::build_quit(self)
    }

    pub fn move_toward(&self, dir: Direction) -> Request {
        protocol::build_move(self, dir)
    }

    /// Store the token from a start response. Returns false (and leaves the
    /// session untouched) when the server reported an error or sent no token.
    pub fn apply_start_result(&mut self, response: &Response) -> bool {
        if response.status != Status::Ok {
            return false;
        }
        match response.game_id.as_deref() {
            Some(id) if !id.is_empty() => {
                self.token = Some(id.to_string());
                true
            }
            _ => {
                tracing::warn!("start reply is OK but carries no game_id");
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{decode, RequestKind};

    #[test]
    fn token_lifecycle() {
        let mut session = Session::new();
        assert_eq!(session.token(), None);

        let resp = decode(br#"{"status":"OK","game_id":"g-1","payload":{}}"#).unwrap();
        assert!(session.apply_start_result(&resp));
        assert_eq!(session.token(), Some("g-1"));

        let quit = session.quit();
        assert_eq!(quit.game_id.as_deref(), Some("g-1"));
        session.clear();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn error_start_leaves_token_unset() {
        let mut session = Session::new();
        let resp = decode(br#"{"status":"ERROR","game_id":"g-9","payload":{}}"#).unwrap();
        assert!(!session.apply_start_result(&resp));
        assert_eq!(session.token(), None);
    }

    #[test]
    fn ok_start_without_game_id_is_not_a_session() {
        let bodies: [&[u8]; 3] = [
            br#"{"status":"OK","payload":{}}"#,
            br#"{"status":"OK","game_id":null,"payload":{}}"#,
            br#"{"status":"OK","game_id":"","payload":{}}"#,
        ];
        for body in bodies {
            let mut session = Session::new();
            let resp = decode(body).unwrap();
            assert!(!session.apply_start_result(&resp));
            assert_eq!(session.token(), None);
        }
    }

    #[test]
    fn requests_carry_current_options() {
        let mut session = Session::new();
        assert!(session.minify());
        assert!(!session.compress());

        assert!(session.toggle_compress());
        assert!(!session.toggle_minify());

        let req = session.action("MOVE", None);
        assert!(req.compress);
        assert!(!req.minify);
        assert_eq!(
            req.kind,
            RequestKind::Action {
                name: "MOVE".to_string(),
                args: None
            }
        );
    }
}
