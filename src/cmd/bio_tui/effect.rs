//! Effect types for bio_tui
//!
//! Effects are requests the bus and the feature views make of the shell.
//! The shell drains and executes them after each key event.

use super::state::{MessageKind, Route};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Navigate(Route),
    SetStatus { text: String, kind: MessageKind },
    Quit,
}

impl Effect {
    pub fn status(text: impl Into<String>, kind: MessageKind) -> Self {
        Effect::SetStatus {
            text: text.into(),
            kind,
        }
    }
}

/// Outbox shared between the shell and the callbacks views register.
///
/// Callbacks run synchronously inside a dispatch and cannot return values
/// to the bus, so they push here instead.
#[derive(Debug, Clone, Default)]
pub struct EffectQueue(Rc<RefCell<Vec<Effect>>>);

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, effect: Effect) {
        self.0.borrow_mut().push(effect);
    }

    pub fn drain(&self) -> Vec<Effect> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}
