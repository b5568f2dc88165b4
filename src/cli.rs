use clap::{Parser, Subcommand};
use integrations_client::IntegrationPatch;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Parser)]
#[command(
    name = "integrations",
    about = "Manage integrations on a /core backend",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config.toml (default: ./config.toml)")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List integrations
    List {
        /// Only integrations that are currently enabled
        #[arg(long)]
        only_enabled: bool,
    },

    /// Create an integration from a JSON record
    Create {
        #[arg(long)]
        json: String,
    },

    /// Apply a partial JSON update to an integration
    Update {
        id: i64,
        #[arg(long)]
        json: String,
    },

    /// Delete an integration
    Delete { id: i64 },

    /// Install an integration on the backend
    Install { id: i64 },

    /// Print the locator of an integration's frontend module
    Frontend { id: i64 },
}

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid JSON argument: {0}")]
    Json(#[from] serde_json::Error),

    #[error("update patch has no fields to change")]
    EmptyPatch,
}

/// Parses the `update --json` argument. An empty patch is refused before any request is made.
pub fn parse_patch(raw: &str) -> Result<IntegrationPatch, CliError> {
    let patch: IntegrationPatch = serde_json::from_str(raw)?;
    if patch.is_empty() {
        return Err(CliError::EmptyPatch);
    }
    Ok(patch)
}
