//! Observable client-side store of integrations.
//!
//! Each operation performs one backend call and applies one deterministic mutation:
//! - `is_error` is cleared when a call starts;
//! - on success the sequence is mutated, on failure only `is_error` is set;
//! - `is_loading` is cleared when the call settles, whatever the outcome.
//!
//! `list`, `create` and `update` raise `is_loading` on the success path just before mutating,
//! so code awaiting the call never sees it `true`. Subscribers do.

mod observer;
mod ops;
mod state;

pub use observer::{StoreEvent, Subscription};
pub use state::StoreSnapshot;

use integrations_schema::Integration;
use observer::Listeners;
use state::StoreState;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

use crate::api::{HttpIntegrationsApi, IntegrationsApi};
use crate::config::Config;
use crate::error::IntegrationsError;
use crate::notify::{Notifier, TracingNotifier};

/// Holds the integrations sequence plus loading/error flags for one consuming context.
///
/// Construct one per context and share it with `Arc`; there is no global instance.
pub struct IntegrationStore {
    api: Arc<dyn IntegrationsApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<StoreState>,
    /// Held from mutation through emission so listeners see changes in state order.
    /// Always taken before `state`.
    emit_lock: Mutex<()>,
    listeners: Arc<Listeners>,
}

impl IntegrationStore {
    pub fn new(api: Arc<dyn IntegrationsApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(StoreState::default()),
            emit_lock: Mutex::new(()),
            listeners: Arc::new(Listeners::default()),
        }
    }

    /// HTTP transport from `cfg.backend`, notifications to tracing.
    pub fn from_config(cfg: &Config) -> Result<Self, IntegrationsError> {
        let api = HttpIntegrationsApi::from_config(&cfg.backend)?;
        info!(
            backend_url = %api.endpoints().collection(),
            backend_proxy = %cfg.backend.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            backend_enable_multiplexing = cfg.backend.enable_multiplexing,
            "Integrations backend config (effective)"
        );
        Ok(Self::new(Arc::new(api), Arc::new(TracingNotifier)))
    }

    /// Registers `listener`; it runs synchronously after each mutation, outside the state lock.
    /// Events from concurrent calls are delivered one mutation at a time, in state order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = self.listeners.add(Arc::new(listener));
        Subscription::new(id, &self.listeners)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock_state().snapshot()
    }

    pub fn integrations(&self) -> Vec<Integration> {
        self.lock_state().integrations().to_vec()
    }

    pub fn get(&self, id: i64) -> Option<Integration> {
        self.lock_state()
            .integrations()
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading()
    }

    pub fn is_error(&self) -> bool {
        self.lock_state().is_error()
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `f` under the state lock, then notifies listeners with only the emit lock held.
    ///
    /// Listeners may read the store but must not block on another store operation.
    fn with_state<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let _emitting = self
            .emit_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (out, events) = {
            let mut state = self.lock_state();
            let out = f(&mut state);
            (out, state.take_events())
        };
        self.listeners.emit(&events);
        out
    }
}

impl std::fmt::Debug for IntegrationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrationStore")
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}
