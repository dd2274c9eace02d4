//! Interaction loop: the client's session lifecycle as an explicit state machine.
//!
//! ```text
//! Init ──start OK──▶ Playing ──GAME_OVER──▶ GameOver ──R──▶ Init
//!   │                  │                       │
//!   └─start ERROR─▶ (fatal)   q ──▶ Terminated ◀── q
//! ```
//!
//! Restarts go back through `Init` in the same loop, so any number of games
//! can be played without growing the stack.

use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use serde_json::{Map, Value};

use crate::adapter::{ClientError, Response, Session, Transport};
use crate::frontend::Frontend;
use crate::input::{handle_game_over_key, handle_key_event, GameOverChoice, PlayIntent};
use crate::term::Screen;
use crate::types::{Event as GameEvent, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Init,
    Playing,
    GameOver,
    Terminated,
}

/// What is currently on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub state: Option<GameState>,
    pub events: Vec<GameEvent>,
    pub status: Option<String>,
}

impl ViewState {
    /// Take what a successful response carries. A response without a
    /// snapshot keeps the previous one on screen.
    fn apply(&mut self, response: Response) {
        if let Some(gs) = response.game_state {
            self.state = Some(gs);
        }
        self.events = response.events.unwrap_or_default();
        self.status = None;
    }

    pub fn screen(&self, game_over: bool) -> Screen<'_> {
        Screen {
            state: self.state.as_ref(),
            events: &self.events,
            status: self.status.as_deref(),
            game_over,
        }
    }
}

pub struct InteractionLoop<T, F> {
    transport: T,
    frontend: F,
    session: Session,
    start_config: Map<String, Value>,
    view: ViewState,
}

impl<T: Transport, F: Frontend> InteractionLoop<T, F> {
    pub fn new(transport: T, frontend: F) -> Self {
        Self {
            transport,
            frontend,
            session: Session::new(),
            start_config: Map::new(),
            view: ViewState::default(),
        }
    }

    pub fn with_start_config(mut self, config: Map<String, Value>) -> Self {
        self.start_config = config;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Drive the machine from `Init` until `Terminated`.
    ///
    /// Transport failures and a rejected start are fatal and returned as
    /// errors; server `ERROR` statuses during play are not.
    pub fn run(&mut self) -> Result<()> {
        let mut phase = Phase::Init;
        while phase != Phase::Terminated {
            let next = self.step(phase)?;
            if next != phase {
                tracing::info!(from = ?phase, to = ?next, "phase change");
            }
            phase = next;
        }
        Ok(())
    }

    /// Execute one turn of `phase` and return the phase to continue in.
    pub fn step(&mut self, phase: Phase) -> Result<Phase> {
        match phase {
            Phase::Init => self.start(),
            Phase::Playing => self.play_turn(),
            Phase::GameOver => self.game_over_turn(),
            Phase::Terminated => Ok(Phase::Terminated),
        }
    }

    fn start(&mut self) -> Result<Phase> {
        let request = self.session.start(self.start_config.clone());
        let response = self.transport.send(&request)?;
        if !self.session.apply_start_result(&response) {
            let msg = if response.is_ok() {
                "start reply carried no game_id".to_string()
            } else {
                response.error_message()
            };
            tracing::error!(error = %msg, "game could not start");
            return Err(ClientError::StartRejected(msg).into());
        }
        tracing::info!(game_id = ?self.session.token(), "game started");

        self.view = ViewState::default();
        self.view.apply(response);
        Ok(Phase::Playing)
    }

    fn play_turn(&mut self) -> Result<Phase> {
        self.frontend.draw(&self.view.screen(false))?;
        let Some(key) = self.read_key()? else {
            return Ok(Phase::Playing);
        };

        match handle_key_event(key) {
            None => Ok(Phase::Playing),
            Some(PlayIntent::Quit) => {
                self.quit()?;
                Ok(Phase::Terminated)
            }
            Some(PlayIntent::Move(dir)) => {
                let request = self.session.move_toward(dir);
                let response = self.transport.send(&request)?;
                if !response.is_ok() {
                    let msg = response.error_message();
                    tracing::warn!(error = %msg, "server rejected action");
                    self.view.status = Some(format!("[SERVER ERROR] {msg}"));
                    return Ok(Phase::Playing);
                }
                let game_over = response.is_game_over();
                self.view.apply(response);
                Ok(if game_over {
                    Phase::GameOver
                } else {
                    Phase::Playing
                })
            }
        }
    }

    fn game_over_turn(&mut self) -> Result<Phase> {
        self.frontend.draw(&self.view.screen(true))?;
        let Some(key) = self.read_key()? else {
            return Ok(Phase::GameOver);
        };

        match handle_game_over_key(key) {
            Some(GameOverChoice::Restart) => {
                self.quit()?;
                Ok(Phase::Init)
            }
            Some(GameOverChoice::Quit) => {
                self.quit()?;
                Ok(Phase::Terminated)
            }
            None => Ok(Phase::GameOver),
        }
    }

    /// Send a quit request. The token is cleared whether or not the
    /// request went through.
    fn quit(&mut self) -> Result<()> {
        let request = self.session.quit();
        let result = self.transport.send(&request);
        self.session.clear();
        let response = result?;
        if !response.is_ok() {
            tracing::warn!(error = %response.error_message(), "server rejected quit");
        }
        Ok(())
    }

    /// Key presses only; releases, repeats and resizes yield `None`.
    fn read_key(&mut self) -> Result<Option<KeyEvent>> {
        match self.frontend.next_event()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}
