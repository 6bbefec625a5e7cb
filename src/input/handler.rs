use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, SnakeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Turn one of the snakes
    Steer(SnakeId, Direction),
    /// Show or hide the cell grid
    ToggleGrid,
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
            // Primary snake - Arrow keys
            KeyCode::Up => KeyAction::Steer(SnakeId::Primary, Direction::Up),
            KeyCode::Down => KeyAction::Steer(SnakeId::Primary, Direction::Down),
            KeyCode::Left => KeyAction::Steer(SnakeId::Primary, Direction::Left),
            KeyCode::Right => KeyAction::Steer(SnakeId::Primary, Direction::Right),

            // Secondary snake - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Steer(SnakeId::Secondary, Direction::Up)
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Steer(SnakeId::Secondary, Direction::Down)
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Steer(SnakeId::Secondary, Direction::Left)
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Steer(SnakeId::Secondary, Direction::Right)
            }

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::ToggleGrid,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter => {
                KeyAction::Quit
            }

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
    fn test_arrow_keys_steer_primary() {
        let handler = InputHandler::new();

        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ];
        for (code, dir) in cases {
            assert_eq!(
                handler.handle_key_event(press(code)),
                KeyAction::Steer(SnakeId::Primary, dir)
            );
        }
    }

    #[test]
    fn test_wasd_keys_steer_secondary() {
        let handler = InputHandler::new();

        let w = press(KeyCode::Char('w'));
        assert_eq!(
            handler.handle_key_event(w),
            KeyAction::Steer(SnakeId::Secondary, Direction::Up)
        );

        let a = press(KeyCode::Char('a'));
        assert_eq!(
            handler.handle_key_event(a),
            KeyAction::Steer(SnakeId::Secondary, Direction::Left)
        );

        let s = press(KeyCode::Char('s'));
        assert_eq!(
            handler.handle_key_event(s),
            KeyAction::Steer(SnakeId::Secondary, Direction::Down)
        );

        let d = press(KeyCode::Char('d'));
        assert_eq!(
            handler.handle_key_event(d),
            KeyAction::Steer(SnakeId::Secondary, Direction::Right)
        );
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::Steer(SnakeId::Secondary, Direction::Up)
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        for code in [KeyCode::Char('q'), KeyCode::Esc, KeyCode::Enter] {
            assert_eq!(handler.handle_key_event(press(code)), KeyAction::Quit);
        }

        let q_upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(q_upper), KeyAction::Quit);
    }

    #[test]
    fn test_grid_toggle_key() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('p'))),
            KeyAction::ToggleGrid
        );
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('x'))),
            KeyAction::None
        );
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
