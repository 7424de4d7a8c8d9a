//! Confirmation prompt key handling
//!
//! Escape never gets here: the bus turns it into `cancel`, which dismisses
//! the prompt like `n` does.

use ratatui::crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// Any other key leaves the prompt up
    Undecided,
}

pub fn handle(key: KeyEvent) -> Answer {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Answer::Yes,
        KeyCode::Char('n') | KeyCode::Char('N') => Answer::No,
        _ => Answer::Undecided,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> Answer {
        handle(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_answers() {
        assert_eq!(press(KeyCode::Char('y')), Answer::Yes);
        assert_eq!(press(KeyCode::Enter), Answer::Yes);
        assert_eq!(press(KeyCode::Char('n')), Answer::No);
        assert_eq!(press(KeyCode::Char('d')), Answer::Undecided);
        assert_eq!(press(KeyCode::Down), Answer::Undecided);
    }
}
