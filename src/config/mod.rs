mod backend;
mod basic;

pub use backend::BackendConfig;
pub use basic::BasicConfig;

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Process-level settings (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Integrations backend settings (see `backend` table in config.toml).
    #[serde(default)]
    pub backend: BackendConfig,
}

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Builds a Figment that merges defaults and `path` when that file exists.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        let path = path.as_ref();
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if path.is_file() {
            figment.merge(Toml::file(path))
        } else {
            figment
        }
    }

    /// Loads configuration by merging defaults and the TOML file at `path` if present.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }
}
