pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod store;

pub use error::IntegrationsError;
pub use integrations_schema::{InstallResult, Integration, IntegrationPatch};
pub use store::{IntegrationStore, StoreEvent, StoreSnapshot, Subscription};
