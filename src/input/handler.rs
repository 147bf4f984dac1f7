use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                KeyAction::TogglePause
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up)),
            KeyAction::Turn(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down)),
            KeyAction::Turn(Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left)),
            KeyAction::Turn(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right)),
            KeyAction::Turn(Direction::Right)
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('w'))),
            KeyAction::Turn(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('a'))),
            KeyAction::Turn(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('s'))),
            KeyAction::Turn(Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('d'))),
            KeyAction::Turn(Direction::Right)
        );

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::Turn(Direction::Up)
        );
    }

    #[test]
    fn test_pause_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('p'))),
            KeyAction::TogglePause
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' '))),
            KeyAction::TogglePause
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('q'))),
            KeyAction::Quit
        );
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_restart_key() {
        let handler = InputHandler::new();

        let r_upper = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(r_upper), KeyAction::Restart);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('x'))),
            KeyAction::None
        );
    }
}
