//! Command palette key handling
//!
//! Only reached for keys the bus passed through while the palette query
//! field has focus.

use super::super::input::TextEdit;
use super::super::palette::PaletteAction;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle(key: KeyEvent) -> PaletteAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Down => PaletteAction::Down,
        KeyCode::Char('j') if ctrl => PaletteAction::Down,
        KeyCode::Up => PaletteAction::Up,
        KeyCode::Char('k') if ctrl => PaletteAction::Up,
        KeyCode::Enter => PaletteAction::Execute,
        KeyCode::Esc => PaletteAction::Close,
        _ => match TextEdit::from_key(key) {
            Some(edit) => PaletteAction::Edit(edit),
            None => PaletteAction::Noop,
        },
    }
}
