//! Alerts module — webhook integration and best-effort threat notification

pub mod dispatcher;
pub mod handler;
pub mod integration;

pub use dispatcher::AlertDispatcher;
pub use handler::{integrations_router, IntegrationsState};
pub use integration::{Integration, IntegrationStore};
