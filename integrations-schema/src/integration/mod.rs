//! Integration records exchanged with the `/core/integrations` backend.

mod install;
mod patch;
mod record;

pub use install::InstallResult;
pub use patch::IntegrationPatch;
pub use record::Integration;
