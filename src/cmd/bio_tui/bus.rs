//! Keyboard command bus
//!
//! Owns the input mode, overlay visibility and the action registry. The shell
//! feeds every key press through [`KeyboardCommandBus::handle_key`]; feature
//! views register and unregister their handlers on mount and unmount.
//!
//! Dispatch is synchronous: a registered handler has returned by the time
//! `handle_key` does. Anything a handler starts in the background is its own
//! business. Handler panics are not caught.

use super::action::{Action, ActionKey};
use super::controller::{self, ControllerContext};
use super::effect::Effect;
use super::mode::ModeMachine;
use super::registry::{ActionHandle, ActionRegistry};
use super::state::{FocusTarget, Mode, Propagation, Route};
use log::debug;
use ratatui::crossterm::event::KeyEvent;
use smallvec::{SmallVec, smallvec};
use std::time::{Duration, Instant};

/// Result of dispatching one key
#[derive(Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub propagation: Propagation,
    pub effects: SmallVec<[Effect; 1]>,
}

impl Dispatch {
    fn stop() -> Self {
        Self {
            propagation: Propagation::Stop,
            effects: SmallVec::new(),
        }
    }

    fn pass() -> Self {
        Self {
            propagation: Propagation::Continue,
            effects: SmallVec::new(),
        }
    }

    fn navigate(route: Route) -> Self {
        Self {
            propagation: Propagation::Stop,
            effects: smallvec![Effect::Navigate(route)],
        }
    }
}

pub struct KeyboardCommandBus {
    modes: ModeMachine,
    registry: ActionRegistry,
    show_help: bool,
    show_command_palette: bool,
}

impl KeyboardCommandBus {
    pub fn new(prefix_timeout: Duration) -> Self {
        Self {
            modes: ModeMachine::new(prefix_timeout),
            registry: ActionRegistry::new(),
            show_help: false,
            show_command_palette: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn show_command_palette(&self) -> bool {
        self.show_command_palette
    }

    /// Open or close the help overlay. Opening it closes the palette.
    pub fn set_show_help(&mut self, show: bool) {
        if show {
            self.show_command_palette = false;
            self.modes.reset();
        }
        self.show_help = show;
    }

    /// Open or close the command palette. Opening it closes help and puts the
    /// bus in command mode; closing it returns to normal.
    pub fn set_show_command_palette(&mut self, show: bool) {
        if show {
            self.show_help = false;
            self.modes.enter_command();
        } else if self.modes.mode() == Mode::Command {
            self.modes.reset();
        }
        self.show_command_palette = show;
    }

    pub fn register_action(
        &mut self,
        key: ActionKey,
        handler: impl FnMut() + 'static,
    ) -> ActionHandle {
        self.registry.register(key, Box::new(handler))
    }

    pub fn unregister_action(&mut self, handle: &ActionHandle) {
        self.registry.unregister(handle);
    }

    pub fn registered_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_registered(&self, key: ActionKey) -> bool {
        self.registry.contains(key)
    }

    /// Revert an expired g-prefix. Call from the event loop.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.modes.tick(now)
    }

    /// How long the event loop may block before the prefix deadline
    pub fn prefix_remaining(&self, now: Instant) -> Option<Duration> {
        self.modes.prefix_remaining(now)
    }

    pub fn handle_key(&mut self, key: KeyEvent, focus: FocusTarget, now: Instant) -> Dispatch {
        // a key can arrive after the deadline but before the loop's next tick
        self.modes.tick(now);

        let ctx = ControllerContext {
            mode: self.modes.mode(),
            focus,
        };
        let action = controller::handle_key(&ctx, key);
        self.reduce(action, now)
    }

    fn reduce(&mut self, action: Action, now: Instant) -> Dispatch {
        match action {
            Action::Escape => {
                self.modes.reset();
                self.show_help = false;
                self.show_command_palette = false;
                self.registry.invoke(ActionKey::Cancel);
                Dispatch::stop()
            }
            Action::SaveFromInput => {
                self.registry.invoke(ActionKey::Save);
                Dispatch::stop()
            }
            Action::PassThrough => Dispatch::pass(),

            Action::EnterPrefix => {
                self.modes.enter_prefix(now);
                Dispatch::stop()
            }
            Action::PrefixNavigate(route) => {
                self.modes.reset();
                debug!("g-prefix navigate to {route}");
                Dispatch::navigate(route)
            }
            Action::PrefixCancel => {
                self.modes.reset();
                Dispatch::pass()
            }

            Action::OpenHelp => {
                self.set_show_help(true);
                Dispatch::stop()
            }
            Action::OpenCommandPalette => {
                self.set_show_command_palette(true);
                Dispatch::stop()
            }

            Action::Invoke(key) => {
                if !self.registry.invoke(key) {
                    debug!("no handler for {key}");
                }
                Dispatch::stop()
            }

            Action::Noop => Dispatch::pass(),
        }
    }
}
