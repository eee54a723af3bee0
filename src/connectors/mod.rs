//! External service connectors.
//!
//! Every integration is hidden behind a trait so services can be tested
//! without HTTP. `init` picks the real client or the mock from configuration.

pub mod config;
pub mod errors;
pub mod purchase_service;

pub use config::{ConnectorConfig, PurchaseServiceConfig};
pub use errors::ConnectorError;
pub use purchase_service::{
    PurchaseServiceClient, PurchaseServiceConnector, PurchasedItem, PurchasedItems,
};

pub use purchase_service::init as init_purchase_service;
