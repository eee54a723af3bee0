mod client;
pub mod mock;

pub use client::PurchaseServiceClient;

use super::config::ConnectorConfig;
use super::errors::ConnectorError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One product bought by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasedItem {
    pub product_id: i64,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
}

/// Purchase history of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchasedItems {
    #[serde(default)]
    pub items: Vec<PurchasedItem>,
}

impl PurchasedItems {
    pub fn contains(&self, product_id: i64) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }
}

/// Purchase history lookups used before a review may be written.
#[async_trait::async_trait]
pub trait PurchaseServiceConnector: Send + Sync {
    async fn purchased_items(&self, user_id: i64) -> Result<PurchasedItems, ConnectorError>;

    async fn has_purchased(&self, user_id: i64, product_id: i64) -> Result<bool, ConnectorError> {
        Ok(self.purchased_items(user_id).await?.contains(product_id))
    }
}

/// Builds the connector selected by configuration.
///
/// The token falls back to `PURCHASE_SERVICE_AUTH_TOKEN` when the config has none.
pub fn init(
    connector_config: &ConnectorConfig,
) -> Result<Arc<dyn PurchaseServiceConnector>, ConnectorError> {
    let connector: Arc<dyn PurchaseServiceConnector> = if let Some(purchase_config) =
        connector_config.purchase_service.as_ref().filter(|c| c.enabled)
    {
        let mut config = purchase_config.clone();
        if config.auth_token.is_none() {
            config.auth_token = std::env::var("PURCHASE_SERVICE_AUTH_TOKEN").ok();
        }
        tracing::info!("Initializing Purchase Service connector: {}", config.base_url);
        Arc::new(PurchaseServiceClient::new(config)?)
    } else {
        tracing::warn!("Purchase Service connector disabled - every purchase is approved");
        Arc::new(mock::MockPurchaseServiceConnector)
    };

    Ok(connector)
}
