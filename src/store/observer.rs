use integrations_schema::Integration;
use std::sync::{
    Arc, Mutex, PoisonError, Weak,
    atomic::{AtomicU64, Ordering},
};

/// A change a subscriber is told about, delivered after the change is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The sequence changed; carries the full sequence after the change.
    IntegrationsChanged(Vec<Integration>),
    LoadingChanged(bool),
    ErrorChanged(bool),
}

pub(super) type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

#[derive(Default)]
pub(super) struct Listeners {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Listener)>>,
}

impl Listeners {
    pub(super) fn add(&self, listener: Listener) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    fn remove(&self, id: u64) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(entry_id, _)| *entry_id != id);
    }

    /// Runs every listener for every event, in subscription order. Listeners are called on a
    /// copy of the list so they may subscribe or unsubscribe while running.
    pub(super) fn emit(&self, events: &[StoreEvent]) {
        if events.is_empty() {
            return;
        }
        let listeners: Vec<Listener> = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for event in events {
            for listener in &listeners {
                listener(event);
            }
        }
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    pub(super) fn new(id: u64, listeners: &Arc<Listeners>) -> Self {
        Self {
            id,
            listeners: Arc::downgrade(listeners),
        }
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
