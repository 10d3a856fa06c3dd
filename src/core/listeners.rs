//! # Listener Registry
//!
//! Subscribe/unsubscribe bookkeeping for the map overlay's dismissal paths.
//! The TUI only routes an Escape press or a click to the overlay while a
//! listener for that trigger is registered, so releasing a `Subscription`
//! is what actually detaches the overlay from input.

use std::collections::BTreeMap;

use log::debug;

/// An input that can dismiss the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    EscapeKey,
    ClickOutside,
    CloseControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
pub struct Listeners {
    next_id: u64,
    active: BTreeMap<ListenerId, Trigger>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, trigger: Trigger) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.active.insert(id, trigger);
        id
    }

    /// Returns `false` if the listener was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.active.remove(&id).is_some()
    }

    pub fn is_listening(&self, trigger: Trigger) -> bool {
        self.active.values().any(|t| *t == trigger)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// A group of listeners registered together and released together.
#[derive(Debug, Default)]
pub struct Subscription {
    ids: Vec<ListenerId>,
}

impl Subscription {
    pub fn subscribe_all(listeners: &mut Listeners, triggers: &[Trigger]) -> Self {
        let ids = triggers.iter().map(|t| listeners.subscribe(*t)).collect();
        Self { ids }
    }

    pub fn is_active(&self) -> bool {
        !self.ids.is_empty()
    }

    /// Unsubscribes every listener in the group. The handles are consumed,
    /// so releasing twice removes nothing the second time.
    pub fn release(&mut self, listeners: &mut Listeners) -> usize {
        let released = self
            .ids
            .drain(..)
            .filter(|id| listeners.unsubscribe(*id))
            .count();
        debug!("Released {} listeners ({} still registered)", released, listeners.len());
        released
    }
}
