//! # Order Service Client
//!
//! Outbound client for the internal order API. The webhook handler calls it
//! from a detached task: failures here are logged, never surfaced to the
//! payment provider.

use async_trait::async_trait;
use store_core::{OrderStatusUpdate, StoreError, StoreResult};
use tracing::{debug, instrument};

/// Port for notifying the order service of a payment outcome.
///
/// The HTTP adapter below is the production implementation; tests substitute
/// a recording mock.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    /// Report that an order has been paid.
    async fn order_paid(&self, order_id: &str, update: &OrderStatusUpdate) -> StoreResult<()>;
}

/// HTTP client for the internal order API.
pub struct OrderApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl OrderApiClient {
    /// Create a client for the given base URL (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl OrderNotifier for OrderApiClient {
    #[instrument(skip(self, update), fields(order_id = %order_id))]
    async fn order_paid(&self, order_id: &str, update: &OrderStatusUpdate) -> StoreResult<()> {
        let url = format!("{}/orders/{}/webhook-status", self.base_url, order_id);

        debug!("Forwarding order status update to {}", url);

        let response = self
            .client
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::OrderServiceError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
