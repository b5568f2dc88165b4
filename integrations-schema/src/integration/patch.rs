use serde::{Deserialize, Serialize};

use super::Integration;

/// Partial update body for `PUT integrations/{id}/`.
///
/// Only fields that are `Some` are sent; the backend replies with the full record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct IntegrationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_available: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_module_url: Option<String>,
}

impl IntegrationPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the present fields onto `target`. `id` is never overwritten.
    pub fn apply_to(&self, target: &mut Integration) {
        if let Some(name) = &self.name {
            target.name = name.clone();
        }
        if let Some(desc) = &self.desc {
            target.desc = Some(desc.clone());
        }
        if let Some(enabled) = self.enabled {
            target.enabled = enabled;
        }
        if let Some(version) = &self.version {
            target.version = Some(version.clone());
        }
        if let Some(latest_version) = &self.latest_version {
            target.latest_version = Some(latest_version.clone());
        }
        if let Some(installed) = self.installed {
            target.installed = installed;
        }
        if let Some(installed_on) = &self.installed_on {
            target.installed_on = Some(installed_on.clone());
        }
        if let Some(update_available) = self.update_available {
            target.update_available = Some(update_available);
        }
        if let Some(install_url) = &self.install_url {
            target.install_url = install_url.clone();
        }
        if let Some(frontend_module_url) = &self.frontend_module_url {
            target.frontend_module_url = Some(frontend_module_url.clone());
        }
    }
}
