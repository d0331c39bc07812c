use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::selection::{Direction, ZoomDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleSidebar,
    Move(Direction),
    Zoom(ZoomDirection),
}

impl Action {
    /// Maps a key press to an action; unbound keys yield `None`.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);
        match key.code {
            KeyCode::Char('b' | 'B')
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) =>
            {
                Some(Action::ToggleSidebar)
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char('q') if plain => Some(Action::Quit),
            KeyCode::Up => Some(Action::Move(Direction::Backward)),
            KeyCode::Down => Some(Action::Move(Direction::Forward)),
            KeyCode::Char('-') if plain => Some(Action::Zoom(ZoomDirection::Out)),
            KeyCode::Char('=') if plain => Some(Action::Zoom(ZoomDirection::In)),
            _ => None,
        }
    }
}
