use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One installable add-on as reported by the backend.
///
/// `id` is server-assigned and is the identity key; everything else may change between
/// responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Integration {
    pub id: i64,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,

    #[serde(default)]
    pub installed: bool,

    /// Kept verbatim; the backend decides the format. See [`Integration::installed_at`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_available: Option<bool>,

    #[serde(default)]
    pub install_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_module_url: Option<String>,
}

impl Integration {
    /// `installed_on` parsed as RFC 3339, if present and well-formed.
    pub fn installed_at(&self) -> Option<DateTime<FixedOffset>> {
        self.installed_on
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    }
}
