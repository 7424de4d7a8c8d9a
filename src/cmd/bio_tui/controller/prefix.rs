//! g-prefix chord handling

use super::super::action::Action;
use super::super::keybindings::prefix_route;
use ratatui::crossterm::event::{KeyCode, KeyEvent};

/// Any key ends the chord; only the navigation keys go anywhere
pub fn handle(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(c) => match prefix_route(c.to_ascii_lowercase()) {
            Some(route) => Action::PrefixNavigate(route),
            None => Action::PrefixCancel,
        },
        _ => Action::PrefixCancel,
    }
}
