use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Controls, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    /// Pick a menu entry by its zero-based position
    Choose(usize),
    Confirm,
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

        let steer = |controls, direction| KeyAction::GameAction(Action::Steer(controls, direction));

        match key.code {
            // Player one - Arrow keys
            KeyCode::Up => steer(Controls::Arrows, Direction::Up),
            KeyCode::Down => steer(Controls::Arrows, Direction::Down),
            KeyCode::Left => steer(Controls::Arrows, Direction::Left),
            KeyCode::Right => steer(Controls::Arrows, Direction::Right),

            // Player two - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => steer(Controls::Wasd, Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => steer(Controls::Wasd, Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => steer(Controls::Wasd, Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => steer(Controls::Wasd, Direction::Right),

            // Session controls
            KeyCode::Char(' ') => KeyAction::GameAction(Action::Pause),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::GameAction(Action::Restart),
            KeyCode::Char('m') | KeyCode::Char('M') => KeyAction::GameAction(Action::Menu),

            // Menu
            KeyCode::Char(digit @ '1'..='4') => KeyAction::Choose(digit as usize - '1' as usize),
            KeyCode::Enter => KeyAction::Confirm,

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
