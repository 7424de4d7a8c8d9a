//! Command palette
//!
//! A fixed list of commands filtered by a case-insensitive substring match on
//! the label. The filtered list is derived from the query on demand and never
//! stored.

use super::effect::Effect;
use super::input::{TextEdit, TextField};
use super::state::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandTarget {
    Navigate(Route),
    /// Listed for discoverability, does nothing when run
    Noop,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Command {
    pub id: &'static str,
    pub label: &'static str,
    pub shortcut: Option<&'static str>,
    pub target: CommandTarget,
}

impl Command {
    pub fn effect(&self) -> Option<Effect> {
        match self.target {
            CommandTarget::Navigate(route) => Some(Effect::Navigate(route)),
            CommandTarget::Noop => None,
        }
    }
}

pub const COMMANDS: &[Command] = &[
    Command {
        id: "home",
        label: "Go to Home",
        shortcut: Some("g h"),
        target: CommandTarget::Navigate(Route::Home),
    },
    Command {
        id: "links",
        label: "Go to Links",
        shortcut: Some("g l"),
        target: CommandTarget::Navigate(Route::Links),
    },
    Command {
        id: "blogs",
        label: "Go to Blogs",
        shortcut: Some("g b"),
        target: CommandTarget::Navigate(Route::Blogs),
    },
    Command {
        id: "analytics",
        label: "Go to Analytics",
        shortcut: Some("g a"),
        target: CommandTarget::Navigate(Route::Analytics),
    },
    Command {
        id: "help",
        label: "Show Keyboard Shortcuts",
        shortcut: Some("?"),
        target: CommandTarget::Noop,
    },
];

/// Commands whose label contains `query`, ignoring case, in list order
pub fn filter_commands<'a>(commands: &'a [Command], query: &str) -> Vec<&'a Command> {
    if query.is_empty() {
        return commands.iter().collect();
    }

    let query_lower = query.to_lowercase();
    commands
        .iter()
        .filter(|cmd| cmd.label.to_lowercase().contains(&query_lower))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteAction {
    Down,
    Up,
    Execute,
    Close,
    Edit(TextEdit),
    Noop,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaletteOutcome {
    Stay,
    Close,
    /// Run the command, then close
    Run(&'static Command),
}

#[derive(Debug, Clone, Default)]
pub struct PaletteState {
    query: TextField,
    selected_index: usize,
    was_visible: bool,
}

impl PaletteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the bus visibility flag. Every hidden → visible transition
    /// starts from an empty query. Returns true on that transition.
    pub fn sync_visibility(&mut self, visible: bool) -> bool {
        let opened = visible && !self.was_visible;
        if opened {
            self.reset();
        }
        self.was_visible = visible;
        opened
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.selected_index = 0;
    }

    pub fn query(&self) -> &TextField {
        &self.query
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn filtered(&self) -> Vec<&'static Command> {
        filter_commands(COMMANDS, self.query.text())
    }

    pub fn selected(&self) -> Option<&'static Command> {
        self.filtered().get(self.selected_index).copied()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = TextField::with_text(query);
        self.selected_index = 0;
    }

    pub fn apply(&mut self, action: PaletteAction) -> PaletteOutcome {
        match action {
            PaletteAction::Down => {
                let last = self.filtered().len().saturating_sub(1);
                self.selected_index = (self.selected_index + 1).min(last);
                PaletteOutcome::Stay
            }
            PaletteAction::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);
                PaletteOutcome::Stay
            }
            PaletteAction::Execute => match self.selected() {
                Some(cmd) => PaletteOutcome::Run(cmd),
                None => PaletteOutcome::Stay,
            },
            PaletteAction::Close => PaletteOutcome::Close,
            PaletteAction::Edit(edit) => {
                if self.query.apply(edit) {
                    self.selected_index = 0;
                }
                PaletteOutcome::Stay
            }
            PaletteAction::Noop => PaletteOutcome::Stay,
        }
    }
}
