//! Action types for bio_tui
//!
//! `ActionKey` names the handlers feature views can register with the bus.
//! `Action` is what the controller turns a key event into before the bus
//! reduces it.

use super::state::Route;

/// Semantic names feature views bind callbacks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKey {
    Down,
    Up,
    New,
    Edit,
    Select,
    Delete,
    Cancel,
    Save,
    /// Page-specific extension bound to `p`
    PageP,
    /// Page-specific extension bound to `u`
    PageU,
}

impl ActionKey {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKey::Down => "down",
            ActionKey::Up => "up",
            ActionKey::New => "new",
            ActionKey::Edit => "edit",
            ActionKey::Select => "select",
            ActionKey::Delete => "delete",
            ActionKey::Cancel => "cancel",
            ActionKey::Save => "save",
            ActionKey::PageP => "p",
            ActionKey::PageU => "u",
        }
    }
}

impl std::fmt::Display for ActionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Intents produced by the controller for a single key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Back to normal, close overlays, run `cancel`
    Escape,
    /// Ctrl+S while a text field has focus
    SaveFromInput,
    /// Let the focused text field have the key
    PassThrough,

    // Prefix chord
    EnterPrefix,
    PrefixNavigate(Route),
    PrefixCancel,

    // Overlays
    OpenHelp,
    OpenCommandPalette,

    /// Run the registered handler for this key, if any
    Invoke(ActionKey),

    Noop,
}
