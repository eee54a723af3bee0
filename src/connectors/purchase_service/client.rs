use crate::connectors::config::PurchaseServiceConfig;
use crate::connectors::errors::ConnectorError;

use reqwest::StatusCode;
use tracing::Instrument;

use super::{PurchaseServiceConnector, PurchasedItems};

const MAX_RETRY_ATTEMPTS: usize = 10;
const BASE_BACKOFF_MS: u64 = 100;

/// Delay after the `attempt`-th failure, counting from 1.
fn backoff(attempt: usize) -> std::time::Duration {
    let exponent = u32::try_from(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
    std::time::Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(2_u64.saturating_pow(exponent)))
}

/// HTTP client of the purchase history service
pub struct PurchaseServiceClient {
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
    pub(crate) auth_token: Option<String>,
    pub(crate) retry_attempts: usize,
}

impl PurchaseServiceClient {
    pub fn new(config: PurchaseServiceConfig) -> Result<Self, ConnectorError> {
        let timeout = std::time::Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConnectorError::Internal(format!("Failed to create HTTP client: {}", err)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            auth_token: config.auth_token,
            retry_attempts: config.retry_attempts.clamp(1, MAX_RETRY_ATTEMPTS),
        })
    }

    fn auth_header(&self) -> Option<String> {
        self.auth_token
            .as_ref()
            .map(|token| format!("Bearer {}", token))
    }

    /// Retries transient failures with exponential backoff: 100ms, 200ms, 400ms, ...
    async fn retry_request<F, T>(&self, mut f: F) -> Result<T, ConnectorError>
    where
        F: FnMut() -> futures::future::BoxFuture<'static, Result<T, ConnectorError>>,
    {
        let mut attempt = 0;
        loop {
            match f().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.retry_attempts || !err.is_transient() {
                        return Err(err);
                    }
                    tracing::warn!("purchase service request failed (attempt {}): {}", attempt, err);
                    tokio::time::sleep(backoff(attempt)).await;
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl PurchaseServiceConnector for PurchaseServiceClient {
    async fn purchased_items(&self, user_id: i64) -> Result<PurchasedItems, ConnectorError> {
        let span = tracing::info_span!("purchase_service_purchased_items", user_id = user_id);

        let url = format!("{}/api/users/{}/purchased-items", self.base_url, user_id);
        let http_client = self.http_client.clone();
        let auth = self.auth_header();

        self.retry_request(move || {
            let mut req = http_client.get(&url);
            if let Some(auth) = auth.clone() {
                req = req.header("Authorization", auth);
            }

            Box::pin(async move {
                let resp = req.send().await?;
                match resp.status() {
                    // unknown user: no purchase history yet
                    StatusCode::NOT_FOUND => Ok(PurchasedItems::default()),
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                        ConnectorError::Unauthorized(format!("purchase service answered {}", resp.status())),
                    ),
                    status if status.is_server_error() => Err(ConnectorError::ServiceUnavailable(
                        format!("purchase service answered {}", status),
                    )),
                    status if !status.is_success() => Err(ConnectorError::HttpError(format!(
                        "purchase service answered {}",
                        status
                    ))),
                    _ => {
                        let text = resp.text().await?;
                        serde_json::from_str::<PurchasedItems>(&text)
                            .map_err(|_| ConnectorError::InvalidResponse(text))
                    }
                }
            })
        })
        .instrument(span)
        .await
        .map_err(|err| {
            tracing::error!("purchased_items error: {}", err);
            err
        })
    }
}
