use integrations_schema::Integration;
use serde::Serialize;

use super::observer::StoreEvent;

/// Point-in-time copy of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    pub integrations: Vec<Integration>,
    pub is_loading: bool,
    pub is_error: bool,
}

/// Mutable store state. Every mutation queues the event it produced; the owner drains them
/// with [`StoreState::take_events`] once the lock is released.
#[derive(Debug, Default)]
pub(super) struct StoreState {
    integrations: Vec<Integration>,
    is_loading: bool,
    is_error: bool,
    pending: Vec<StoreEvent>,
}

impl StoreState {
    pub(super) fn integrations(&self) -> &[Integration] {
        &self.integrations
    }

    pub(super) fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub(super) fn is_error(&self) -> bool {
        self.is_error
    }

    pub(super) fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            integrations: self.integrations.clone(),
            is_loading: self.is_loading,
            is_error: self.is_error,
        }
    }

    pub(super) fn set_loading(&mut self, value: bool) {
        if self.is_loading != value {
            self.is_loading = value;
            self.pending.push(StoreEvent::LoadingChanged(value));
        }
    }

    pub(super) fn set_error(&mut self, value: bool) {
        if self.is_error != value {
            self.is_error = value;
            self.pending.push(StoreEvent::ErrorChanged(value));
        }
    }

    /// Wholesale replacement; no merge with what was there before.
    pub(super) fn replace_all(&mut self, integrations: Vec<Integration>) {
        self.integrations = integrations;
        self.integrations_changed();
    }

    pub(super) fn push(&mut self, integration: Integration) {
        self.integrations.push(integration);
        self.integrations_changed();
    }

    /// Replaces the first record with `id` in place. Returns `false` when none exists.
    pub(super) fn replace(&mut self, id: i64, integration: Integration) -> bool {
        let Some(slot) = self.integrations.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        *slot = integration;
        self.integrations_changed();
        true
    }

    /// Drops every record with `id`, duplicates included. Returns how many were removed.
    pub(super) fn remove(&mut self, id: i64) -> usize {
        let before = self.integrations.len();
        self.integrations.retain(|i| i.id != id);
        let removed = before - self.integrations.len();
        if removed > 0 {
            self.integrations_changed();
        }
        removed
    }

    /// Sets `enabled` on the record with `id`. Returns `false` when none exists.
    pub(super) fn enable(&mut self, id: i64) -> bool {
        let Some(slot) = self.integrations.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        if !slot.enabled {
            slot.enabled = true;
            self.integrations_changed();
        }
        true
    }

    pub(super) fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.pending)
    }

    fn integrations_changed(&mut self) {
        self.pending
            .push(StoreEvent::IntegrationsChanged(self.integrations.clone()));
    }
}
