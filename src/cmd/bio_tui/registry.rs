//! Action registry
//!
//! Maps an [`ActionKey`] to the callback of whichever view registered it last.
//! Registering hands back an [`ActionHandle`]; only the holder of the current
//! handle for a key can remove it, so a view that was shadowed by a later one
//! cannot unregister the newer handler on teardown.

use super::action::ActionKey;
use ahash::HashMap;
use log::debug;

pub type Handler = Box<dyn FnMut()>;

/// Proof of a single registration. Pass it back to unregister.
#[must_use = "dropping the handle makes the registration impossible to remove"]
#[derive(Debug, PartialEq, Eq)]
pub struct ActionHandle {
    key: ActionKey,
    id: u64,
}

struct Entry {
    id: u64,
    handler: Handler,
}

#[derive(Default)]
pub struct ActionRegistry {
    entries: HashMap<ActionKey, Entry>,
    next_id: u64,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler` for `key`, replacing any previous registration
    pub fn register(&mut self, key: ActionKey, handler: Handler) -> ActionHandle {
        self.next_id += 1;
        let id = self.next_id;

        if let Some(previous) = self.entries.insert(key, Entry { id, handler }) {
            debug!("action {key} registration {} shadowed by {id}", previous.id);
        } else {
            debug!("action {key} registered ({id})");
        }

        ActionHandle { key, id }
    }

    /// Remove the registration behind `handle`. No-op if it was already
    /// removed or has since been overwritten.
    pub fn unregister(&mut self, handle: &ActionHandle) -> bool {
        match self.entries.get(&handle.key) {
            Some(entry) if entry.id == handle.id => {
                self.entries.remove(&handle.key);
                debug!("action {} unregistered ({})", handle.key, handle.id);
                true
            }
            _ => {
                debug!(
                    "ignoring unregister of {} ({}): not the current owner",
                    handle.key, handle.id
                );
                false
            }
        }
    }

    /// Run the handler for `key`. Returns false when nothing is registered.
    pub fn invoke(&mut self, key: ActionKey) -> bool {
        match self.entries.get_mut(&key) {
            Some(entry) => {
                (entry.handler)();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: ActionKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
