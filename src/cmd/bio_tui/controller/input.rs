//! Key handling while a text field has focus

use super::super::action::Action;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything passes through to the field except Ctrl+S
pub fn handle(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('s') if ctrl => Action::SaveFromInput,
        _ => Action::PassThrough,
    }
}
