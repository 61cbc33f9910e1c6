use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::event::events::Event;

pub struct InputHandler;

impl InputHandler {
    /// Global chords, checked before the active view sees the key.
    pub fn handle_key(key: KeyEvent) -> Option<Event> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Event::Quit),
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => Some(Event::Reset),
            _ => None,
        }
    }
}
