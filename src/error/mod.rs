mod integrations;

pub use integrations::IntegrationsError;

/// Max characters of an upstream body kept in errors and logs.
pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;
