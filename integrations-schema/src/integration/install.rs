use serde::{Deserialize, Serialize};

/// Outcome reported by `POST integrations/{id}/install/`.
///
/// `Default` is the value handed back when the request itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct InstallResult {
    #[serde(default)]
    pub output: String,

    #[serde(default)]
    pub success: bool,
}
