use crate::connectors::errors::ConnectorError;

use super::{PurchaseServiceConnector, PurchasedItems};

/// Stand-in used when the purchase service is disabled - every product counts as bought
pub struct MockPurchaseServiceConnector;

#[async_trait::async_trait]
impl PurchaseServiceConnector for MockPurchaseServiceConnector {
    async fn purchased_items(&self, _user_id: i64) -> Result<PurchasedItems, ConnectorError> {
        Ok(PurchasedItems::default())
    }

    async fn has_purchased(&self, user_id: i64, product_id: i64) -> Result<bool, ConnectorError> {
        tracing::debug!(user_id, product_id, "purchase check skipped by mock connector");
        Ok(true)
    }
}
