//! Controller module for bio_tui
//!
//! The controller maps (Mode, FocusTarget, KeyEvent) → Action.
//! It is pure: the bus applies the resulting action.

pub mod confirm;
mod input;
mod normal;
pub mod palette;
mod prefix;

use super::action::Action;
use super::state::{FocusTarget, Mode};
use ratatui::crossterm::event::{KeyCode, KeyEvent};

/// Context passed to controllers for read-only state access
pub struct ControllerContext {
    pub mode: Mode,
    pub focus: FocusTarget,
}

/// Classify a key event. Escape first, then text-field suppression, then
/// the prefix chord, then the normal shortcut table.
pub fn handle_key(ctx: &ControllerContext, key: KeyEvent) -> Action {
    if key.code == KeyCode::Esc {
        return Action::Escape;
    }

    if ctx.focus == FocusTarget::TextInput {
        return input::handle(key);
    }

    match ctx.mode {
        Mode::GPrefix => prefix::handle(key),
        Mode::Normal | Mode::Command => normal::handle(key),
    }
}

#[cfg(test)]
mod tests {
    use super::super::action::ActionKey;
    use super::super::state::Route;
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn ctx(mode: Mode, focus: FocusTarget) -> ControllerContext {
        ControllerContext { mode, focus }
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_escape_wins_everywhere() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        for mode in [Mode::Normal, Mode::GPrefix, Mode::Command] {
            for focus in [FocusTarget::Shortcuts, FocusTarget::TextInput] {
                assert_eq!(handle_key(&ctx(mode, focus), esc), Action::Escape);
            }
        }
    }

    #[test]
    fn test_text_input_suppresses_shortcuts() {
        let c = ctx(Mode::Normal, FocusTarget::TextInput);
        assert_eq!(handle_key(&c, press('j')), Action::PassThrough);
        assert_eq!(handle_key(&c, press('g')), Action::PassThrough);
        assert_eq!(
            handle_key(&c, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Action::PassThrough
        );
        assert_eq!(
            handle_key(&c, KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Action::SaveFromInput
        );
    }

    #[test]
    fn test_ctrl_s_outside_text_input_is_unbound() {
        let c = ctx(Mode::Normal, FocusTarget::Shortcuts);
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&c, key), Action::Noop);
    }

    #[test]
    fn test_normal_table() {
        let c = ctx(Mode::Normal, FocusTarget::Shortcuts);
        assert_eq!(handle_key(&c, press('g')), Action::EnterPrefix);
        assert_eq!(handle_key(&c, press('?')), Action::OpenHelp);
        assert_eq!(handle_key(&c, press(':')), Action::OpenCommandPalette);
        assert_eq!(handle_key(&c, press('/')), Action::OpenCommandPalette);
        assert_eq!(handle_key(&c, press('j')), Action::Invoke(ActionKey::Down));
        assert_eq!(handle_key(&c, press('k')), Action::Invoke(ActionKey::Up));
        assert_eq!(handle_key(&c, press('n')), Action::Invoke(ActionKey::New));
        assert_eq!(handle_key(&c, press('a')), Action::Invoke(ActionKey::New));
        assert_eq!(handle_key(&c, press('e')), Action::Invoke(ActionKey::Edit));
        assert_eq!(handle_key(&c, press('d')), Action::Invoke(ActionKey::Delete));
        assert_eq!(handle_key(&c, press('p')), Action::Invoke(ActionKey::PageP));
        assert_eq!(handle_key(&c, press('u')), Action::Invoke(ActionKey::PageU));
        assert_eq!(
            handle_key(&c, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Action::Invoke(ActionKey::Select)
        );
        assert_eq!(handle_key(&c, press('z')), Action::Noop);
        assert_eq!(handle_key(&c, press('G')), Action::Noop);
    }

    #[test]
    fn test_command_mode_uses_normal_table() {
        let c = ctx(Mode::Command, FocusTarget::Shortcuts);
        assert_eq!(handle_key(&c, press('j')), Action::Invoke(ActionKey::Down));
    }

    #[test]
    fn test_prefix_chords() {
        let c = ctx(Mode::GPrefix, FocusTarget::Shortcuts);
        assert_eq!(handle_key(&c, press('h')), Action::PrefixNavigate(Route::Home));
        assert_eq!(handle_key(&c, press('l')), Action::PrefixNavigate(Route::Links));
        assert_eq!(handle_key(&c, press('b')), Action::PrefixNavigate(Route::Blogs));
        assert_eq!(handle_key(&c, press('a')), Action::PrefixNavigate(Route::Analytics));
        assert_eq!(handle_key(&c, press('A')), Action::PrefixNavigate(Route::Analytics));
        assert_eq!(handle_key(&c, press('x')), Action::PrefixCancel);
        assert_eq!(
            handle_key(&c, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            Action::PrefixCancel
        );
    }
}
