use serde::{Deserialize, Serialize};

/// Configuration for external service connectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub purchase_service: Option<PurchaseServiceConfig>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            purchase_service: Some(PurchaseServiceConfig::default()),
        }
    }
}

/// Purchase history service connector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseServiceConfig {
    /// Disabled means every purchase is approved
    pub enabled: bool,
    /// Base URL, e.g. http://localhost:8081
    pub base_url: String,
    pub timeout_secs: u64,
    /// Total attempts per request, including the first one
    pub retry_attempts: usize,
    /// Bearer token (from env: PURCHASE_SERVICE_AUTH_TOKEN)
    #[serde(skip)]
    pub auth_token: Option<String>,
}

impl Default for PurchaseServiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://localhost:8081".to_string(),
            timeout_secs: 5,
            retry_attempts: 3,
            auth_token: None,
        }
    }
}
