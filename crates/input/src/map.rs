//! Key mapping from terminal events to client intents.

use crate::types::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key means while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIntent {
    Quit,
    Move(Direction),
}

/// What a key means on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverChoice {
    Restart,
    Quit,
}

/// Map keyboard input during play. Unmapped keys return `None`.
pub fn handle_key_event(key: KeyEvent) -> Option<PlayIntent> {
    if should_quit(key) {
        return Some(PlayIntent::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(PlayIntent::Move(Direction::West)),
        KeyCode::Down | KeyCode::Char('j') => Some(PlayIntent::Move(Direction::South)),
        KeyCode::Up | KeyCode::Char('k') => Some(PlayIntent::Move(Direction::North)),
        KeyCode::Right | KeyCode::Char('l') => Some(PlayIntent::Move(Direction::East)),
        _ => None,
    }
}

/// Map keyboard input on the game-over prompt.
pub fn handle_game_over_key(key: KeyEvent) -> Option<GameOverChoice> {
    if should_quit(key) {
        return Some(GameOverChoice::Quit);
    }
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameOverChoice::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        let cases = [
            (KeyCode::Left, Direction::West),
            (KeyCode::Char('h'), Direction::West),
            (KeyCode::Down, Direction::South),
            (KeyCode::Char('j'), Direction::South),
            (KeyCode::Up, Direction::North),
            (KeyCode::Char('k'), Direction::North),
            (KeyCode::Right, Direction::East),
            (KeyCode::Char('l'), Direction::East),
        ];
        for (code, dir) in cases {
            assert_eq!(
                handle_key_event(KeyEvent::from(code)),
                Some(PlayIntent::Move(dir)),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_unmapped_keys() {
        for code in [KeyCode::Char('x'), KeyCode::Char('r'), KeyCode::Enter, KeyCode::Esc] {
            assert_eq!(handle_key_event(KeyEvent::from(code)), None);
        }
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some(PlayIntent::Quit)
        );
    }

    #[test]
    fn test_game_over_keys() {
        assert_eq!(
            handle_game_over_key(KeyEvent::from(KeyCode::Char('r'))),
            Some(GameOverChoice::Restart)
        );
        assert_eq!(
            handle_game_over_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(GameOverChoice::Quit)
        );
        assert_eq!(handle_game_over_key(KeyEvent::from(KeyCode::Char('l'))), None);
    }
}
