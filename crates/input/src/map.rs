//! Mapping from terminal events to game input events.

use crate::types::{CursorMove, InputEvent};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Map any terminal event to an input event.
///
/// Only the primary button *release* counts as a click; presses and drags are dropped.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key_event(*key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(InputEvent::PointerRelease {
            column: *column,
            row: *row,
        }),
        Event::Resize(width, height) => Some(InputEvent::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

/// Map keyboard input to input events.
pub fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    if is_close_key(key) {
        return Some(InputEvent::Close);
    }

    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputEvent::Cursor(CursorMove::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputEvent::Cursor(CursorMove::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputEvent::Cursor(CursorMove::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputEvent::Cursor(CursorMove::Down))
        }

        // Flip
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputEvent::Select),

        _ => None,
    }
}

/// Check if key closes the game.
pub fn is_close_key(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
