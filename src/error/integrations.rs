use reqwest::StatusCode;
use thiserror::Error as ThisError;

use super::UPSTREAM_BODY_PREVIEW_CHARS;

/// Every way a backend call can fail.
///
/// The store collapses all of these into its single `is_error` flag; the variants exist for
/// logging and for callers that use the transport directly.
#[derive(Debug, ThisError)]
pub enum IntegrationsError {
    /// Transport-level failure (DNS, connect, body read, etc).
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("Upstream error: status={status}, body={body:.200}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Backend body that must be text was not UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl IntegrationsError {
    pub(crate) fn upstream_status(status: StatusCode, raw_body: &str) -> Self {
        IntegrationsError::UpstreamStatus {
            status,
            body: format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS),
        }
    }

    /// Status code when the backend produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            IntegrationsError::UpstreamStatus { status, .. } => Some(*status),
            IntegrationsError::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}
