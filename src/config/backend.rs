use serde::{Deserialize, Serialize};
use url::Url;

/// Where and how to reach the integrations REST backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL the `integrations/` paths are resolved against.
    /// TOML: `backend.base_url`. Default: `http://127.0.0.1:8000/core/`.
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Optional HTTP proxy. If set, used for the reqwest client.
    /// TOML: `backend.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Allow HTTP/2 multiplexing; disabled forces HTTP/1.
    /// TOML: `backend.enable_multiplexing`. Default: `false`.
    #[serde(default)]
    pub enable_multiplexing: bool,

    /// User-Agent header sent with every request.
    /// TOML: `backend.user_agent`.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxy: None,
            enable_multiplexing: false,
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("http://127.0.0.1:8000/core/").expect("invalid fixed default backend URL")
}

fn default_user_agent() -> String {
    concat!("integrations-client/", env!("CARGO_PKG_VERSION")).to_string()
}
