use async_trait::async_trait;
use integrations_schema::{InstallResult, Integration, IntegrationPatch};
use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::{IntegrationsApi, IntegrationsEndpoints};
use crate::config::BackendConfig;
use crate::error::{IntegrationsError, UPSTREAM_BODY_PREVIEW_CHARS};

/// reqwest-backed transport for the integrations backend.
///
/// Request construction is kept separate from execution so the wire shape can be checked
/// without a server.
#[derive(Debug, Clone)]
pub struct HttpIntegrationsApi {
    client: reqwest::Client,
    endpoints: IntegrationsEndpoints,
}

impl HttpIntegrationsApi {
    pub fn new(client: reqwest::Client, endpoints: IntegrationsEndpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn from_config(cfg: &BackendConfig) -> Result<Self, IntegrationsError> {
        let endpoints = IntegrationsEndpoints::new(&cfg.base_url)?;
        Ok(Self::new(build_client(cfg)?, endpoints))
    }

    pub fn endpoints(&self) -> &IntegrationsEndpoints {
        &self.endpoints
    }

    pub fn build_list_request(
        &self,
        only_enabled: bool,
    ) -> Result<reqwest::Request, reqwest::Error> {
        self.client.get(self.endpoints.list(only_enabled)).build()
    }

    pub fn build_create_request(
        &self,
        payload: &Integration,
    ) -> Result<reqwest::Request, reqwest::Error> {
        self.client
            .post(self.endpoints.collection().clone())
            .json(payload)
            .build()
    }

    pub fn build_update_request(
        &self,
        id: i64,
        patch: &IntegrationPatch,
    ) -> Result<reqwest::Request, reqwest::Error> {
        self.client.put(self.endpoints.item(id)).json(patch).build()
    }

    pub fn build_delete_request(&self, id: i64) -> Result<reqwest::Request, reqwest::Error> {
        self.client.delete(self.endpoints.item(id)).build()
    }

    pub fn build_install_request(&self, id: i64) -> Result<reqwest::Request, reqwest::Error> {
        self.client.post(self.endpoints.install(id)).build()
    }

    pub fn build_frontend_request(&self, id: i64) -> Result<reqwest::Request, reqwest::Error> {
        self.client.get(self.endpoints.frontend(id)).build()
    }

    /// Executes `req` and turns any non-2xx answer into [`IntegrationsError::UpstreamStatus`].
    async fn send(&self, req: reqwest::Request) -> Result<reqwest::Response, IntegrationsError> {
        let method = req.method().clone();
        let url = req.url().clone();

        let resp = self.client.execute(req).await?;
        let status = resp.status();
        if status.is_success() {
            debug!(%method, %url, %status, "Integrations backend responded");
            return Ok(resp);
        }

        let raw_body = match resp.bytes().await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => format!("<failed to read body: {e}>"),
        };
        debug!(
            %method,
            %url,
            %status,
            body = %format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS),
            "Integrations backend returned error status"
        );
        Err(IntegrationsError::upstream_status(status, &raw_body))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::Request,
    ) -> Result<T, IntegrationsError> {
        let bytes = self.send(req).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl IntegrationsApi for HttpIntegrationsApi {
    async fn list(&self, only_enabled: bool) -> Result<Vec<Integration>, IntegrationsError> {
        let req = self.build_list_request(only_enabled)?;
        self.send_json(req).await
    }

    async fn create(&self, payload: &Integration) -> Result<Integration, IntegrationsError> {
        let req = self.build_create_request(payload)?;
        self.send_json(req).await
    }

    async fn update(
        &self,
        id: i64,
        patch: &IntegrationPatch,
    ) -> Result<Integration, IntegrationsError> {
        let req = self.build_update_request(id, patch)?;
        self.send_json(req).await
    }

    async fn delete(&self, id: i64) -> Result<(), IntegrationsError> {
        let req = self.build_delete_request(id)?;
        self.send(req).await?;
        Ok(())
    }

    async fn install(&self, id: i64) -> Result<InstallResult, IntegrationsError> {
        let req = self.build_install_request(id)?;
        self.send_json(req).await
    }

    async fn frontend_module(&self, id: i64) -> Result<Option<String>, IntegrationsError> {
        let req = self.build_frontend_request(id)?;
        let bytes = self.send(req).await?.bytes().await?;
        parse_frontend_locator(&bytes)
    }
}

/// Accepts a JSON string, JSON `null`, an empty body, or a bare text locator.
///
/// The body must be UTF-8. A body that parses as any other JSON value is a decode error, so a
/// bare-text locator such as `123` or `true` is refused rather than guessed at.
pub(crate) fn parse_frontend_locator(bytes: &[u8]) -> Result<Option<String>, IntegrationsError> {
    let trimmed = std::str::from_utf8(bytes)?.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let locator = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Null) => return Ok(None),
        Ok(value) => serde_json::from_value::<String>(value)?,
        Err(_) => trimmed.to_string(),
    };

    Ok((!locator.is_empty()).then_some(locator))
}

fn build_client(cfg: &BackendConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();

    let mut builder = reqwest::Client::builder()
        .user_agent(cfg.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::limited(5));

    if let Some(proxy_url) = cfg.proxy.as_ref() {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }

    if !cfg.enable_multiplexing {
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        builder = builder.http1_only();
    } else {
        builder = builder.http2_adaptive_window(true);
    }

    builder.default_headers(headers).build()
}
