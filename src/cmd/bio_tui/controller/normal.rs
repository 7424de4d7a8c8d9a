//! Normal (and command) mode key handling

use super::super::action::{Action, ActionKey};
use ratatui::crossterm::event::{KeyCode, KeyEvent};

/// Handle keys in Normal mode
///
/// Keys are matched literally; modifiers are not consulted.
pub fn handle(key: KeyEvent) -> Action {
    match key.code {
        // prefix chord
        KeyCode::Char('g') => Action::EnterPrefix,

        // overlays
        KeyCode::Char('?') => Action::OpenHelp,
        KeyCode::Char(':' | '/') => Action::OpenCommandPalette,

        // list navigation
        KeyCode::Char('j') => Action::Invoke(ActionKey::Down),
        KeyCode::Char('k') => Action::Invoke(ActionKey::Up),
        KeyCode::Enter => Action::Invoke(ActionKey::Select),

        // `a` also continues the g-prefix chord, but only in GPrefix mode
        KeyCode::Char('n' | 'a') => Action::Invoke(ActionKey::New),
        KeyCode::Char('e') => Action::Invoke(ActionKey::Edit),
        KeyCode::Char('d') => Action::Invoke(ActionKey::Delete),

        // page-specific extensions
        KeyCode::Char('p') => Action::Invoke(ActionKey::PageP),
        KeyCode::Char('u') => Action::Invoke(ActionKey::PageU),

        _ => Action::Noop,
    }
}
