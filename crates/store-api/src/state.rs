//! # Application State
//!
//! Shared state for the axum application. Everything is explicitly
//! constructed and owned here — the database handle, the webhook verifier,
//! and the order-service client are injected, not ambient globals.

use crate::orders::{OrderApiClient, OrderNotifier};
use mongodb::Database;
use std::sync::Arc;
use store_stripe::{StripeConfig, StripeWebhookVerifier};
use tracing::warn;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the internal order API
    pub order_api_base_url: String,
    /// MongoDB connection string
    pub mongodb_uri: String,
    /// MongoDB database name
    pub mongodb_database: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            order_api_base_url: std::env::var("ORDER_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongodb_database: std::env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "storefront".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Webhook verifier; `None` means Stripe is not provisioned and the
    /// webhook endpoint runs in disabled mode
    pub verifier: Option<StripeWebhookVerifier>,
    /// Order-service notifier
    pub orders: Arc<dyn OrderNotifier>,
    /// Document store handle, owned for the process lifetime
    pub db: Database,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Wire up production state from config and an established DB handle.
    pub fn new(config: AppConfig, stripe: &StripeConfig, db: Database) -> Self {
        let verifier = if stripe.is_enabled() {
            stripe
                .webhook_secret
                .as_deref()
                .map(StripeWebhookVerifier::new)
        } else {
            warn!("Stripe secrets not provisioned; webhook processing disabled");
            None
        };

        let orders: Arc<dyn OrderNotifier> =
            Arc::new(OrderApiClient::new(&config.order_api_base_url));

        Self {
            verifier,
            orders,
            db,
            config,
        }
    }

    /// State with an explicit verifier and notifier (tests).
    #[cfg(test)]
    pub fn for_tests(
        verifier: Option<StripeWebhookVerifier>,
        orders: Arc<dyn OrderNotifier>,
        db: Database,
    ) -> Self {
        Self {
            verifier,
            orders,
            db,
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                order_api_base_url: "http://localhost:8000/api".to_string(),
                mongodb_uri: "mongodb://localhost:27017".to_string(),
                mongodb_database: "storefront-test".to_string(),
                environment: "test".to_string(),
            },
        }
    }
}
