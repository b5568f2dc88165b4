pub mod integration;

pub use integration::{InstallResult, Integration, IntegrationPatch};
