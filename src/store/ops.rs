use integrations_schema::{InstallResult, Integration, IntegrationPatch};
use tracing::{debug, warn};

use super::IntegrationStore;
use crate::error::IntegrationsError;

pub(crate) const MSG_ADDED: &str = "Integration was added successfully";
pub(crate) const MSG_EDITED: &str = "Integration was edited successfully";
pub(crate) const MSG_REMOVED: &str = "Integration was successfully removed";
pub(crate) const MSG_INSTALLED: &str = "Integration was successfully installed";

impl IntegrationStore {
    /// Replaces the whole sequence with the backend's list.
    pub async fn list(&self, only_enabled: bool) {
        self.begin();
        match self.api.list(only_enabled).await {
            Ok(integrations) => {
                debug!(
                    op = "list",
                    only_enabled,
                    count = integrations.len(),
                    "Integrations listed"
                );
                self.with_state(|state| {
                    state.set_loading(true);
                    state.replace_all(integrations);
                });
            }
            Err(e) => self.fail("list", None, &e),
        }
        self.finish();
    }

    /// Appends the backend's canonical copy of `payload`.
    pub async fn create(&self, payload: Integration) {
        self.begin();
        match self.api.create(&payload).await {
            Ok(created) => {
                debug!(op = "create", id = created.id, name = %created.name, "Integration created");
                self.with_state(|state| {
                    state.set_loading(true);
                    state.push(created);
                });
                self.notifier.notify_success(MSG_ADDED);
            }
            Err(e) => self.fail("create", None, &e),
        }
        self.finish();
    }

    /// Sends `patch` and swaps the local record for the backend's full copy, in place.
    ///
    /// A record missing locally is left missing; the backend accepted the edit, so the
    /// notification still fires.
    pub async fn update(&self, id: i64, patch: IntegrationPatch) {
        self.begin();
        match self.api.update(id, &patch).await {
            Ok(updated) => {
                let replaced = self.with_state(|state| {
                    state.set_loading(true);
                    state.replace(id, updated)
                });
                if !replaced {
                    warn!(
                        op = "update",
                        id,
                        "Updated integration is not in the local list; skipped"
                    );
                }
                self.notifier.notify_success(MSG_EDITED);
            }
            Err(e) => self.fail("update", Some(id), &e),
        }
        self.finish();
    }

    /// Removes every local record with `id` once the backend confirms.
    pub async fn delete(&self, id: i64) {
        self.begin();
        match self.api.delete(id).await {
            Ok(()) => {
                let removed = self.with_state(|state| state.remove(id));
                debug!(op = "delete", id, removed, "Integration deleted");
                self.notifier.notify_success(MSG_REMOVED);
            }
            Err(e) => self.fail("delete", Some(id), &e),
        }
        self.finish();
    }

    /// Asks the backend to install `id` and returns its report.
    ///
    /// Any successful HTTP exchange marks the local record enabled, even when the report says
    /// `success: false`. Version fields are left as they were. A failed exchange yields
    /// [`InstallResult::default`].
    pub async fn install(&self, id: i64) -> InstallResult {
        self.begin();
        let result = match self.api.install(id).await {
            Ok(result) => {
                if !self.with_state(|state| state.enable(id)) {
                    warn!(op = "install", id, "Installed integration is not in the local list");
                }
                debug!(
                    op = "install",
                    id,
                    success = result.success,
                    output = %result.output,
                    "Install finished"
                );
                if result.success {
                    self.notifier.notify_success(MSG_INSTALLED);
                }
                result
            }
            Err(e) => {
                self.fail("install", Some(id), &e);
                InstallResult::default()
            }
        };
        self.finish();
        result
    }

    /// Locator of the integration's externally loaded UI module.
    ///
    /// `None` both when the backend has none (flag untouched) and when the call failed
    /// (`is_error` set).
    pub async fn fetch_frontend_module(&self, id: i64) -> Option<String> {
        self.begin();
        let locator = match self.api.frontend_module(id).await {
            Ok(locator) => locator,
            Err(e) => {
                self.fail("frontend", Some(id), &e);
                None
            }
        };
        self.finish();
        locator
    }

    fn begin(&self) {
        self.with_state(|state| state.set_error(false));
    }

    fn fail(&self, op: &'static str, id: Option<i64>, error: &IntegrationsError) {
        warn!(
            op,
            id = ?id,
            status = ?error.status(),
            error = %error,
            "Integrations request failed"
        );
        self.with_state(|state| state.set_error(true));
    }

    fn finish(&self) {
        self.with_state(|state| state.set_loading(false));
    }
}
