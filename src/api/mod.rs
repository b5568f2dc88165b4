//! Transport seam between the store and the `/core/integrations` REST surface.

mod endpoints;
mod http;

pub use endpoints::IntegrationsEndpoints;
pub use http::HttpIntegrationsApi;

use async_trait::async_trait;
use integrations_schema::{InstallResult, Integration, IntegrationPatch};

use crate::error::IntegrationsError;

/// One method per backend endpoint. Each call performs exactly one request.
#[async_trait]
pub trait IntegrationsApi: Send + Sync {
    /// `GET integrations/`, with `onlyEnabled=true` when `only_enabled` is set.
    async fn list(&self, only_enabled: bool) -> Result<Vec<Integration>, IntegrationsError>;

    /// `POST integrations/`; returns the canonical record (server-assigned `id`).
    async fn create(&self, payload: &Integration) -> Result<Integration, IntegrationsError>;

    /// `PUT integrations/{id}/`; returns the full updated record.
    async fn update(
        &self,
        id: i64,
        patch: &IntegrationPatch,
    ) -> Result<Integration, IntegrationsError>;

    /// `DELETE integrations/{id}/`. Any response body is ignored.
    async fn delete(&self, id: i64) -> Result<(), IntegrationsError>;

    /// `POST integrations/{id}/install/`.
    async fn install(&self, id: i64) -> Result<InstallResult, IntegrationsError>;

    /// `GET integrations/{id}/frontend/`. `Ok(None)` means the backend had no locator.
    async fn frontend_module(&self, id: i64) -> Result<Option<String>, IntegrationsError>;
}
