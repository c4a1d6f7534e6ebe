//! # Storefront Edge Services
//!
//! Webhook reconciliation and request gating for the storefront.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_WEBHOOK_SECRET=whsec_...
//! export MONGODB_URI=mongodb://localhost:27017
//! export ORDER_API_BASE_URL=http://localhost:8000/api
//!
//! # Run the server
//! storefront
//! ```

use store_api::{routes, state::{AppConfig, AppState}};
use store_stripe::StripeConfig;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = AppConfig::from_env();
    let stripe = StripeConfig::from_env();

    info!("Environment: {}", config.environment);
    if stripe.is_enabled() {
        info!(
            "Stripe webhook processing: enabled ({} keys)",
            if stripe.is_test_mode() { "test" } else { "live" }
        );
    } else {
        info!("Stripe webhook processing: disabled");
    }

    // Fail-fast policy: a storefront without its document store is not
    // worth starting. No retry, no degraded mode.
    let db = match store_api::db::connect(&config.mongodb_uri, &config.mongodb_database).await {
        Ok(db) => db,
        Err(e) => {
            error!("MongoDB connection failed: {:#}", e);
            std::process::exit(1);
        }
    };

    let addr = config.socket_addr();
    let is_prod = config.is_production();

    let state = AppState::new(config, &stripe, db);
    let app = routes::create_router(state);

    info!("Storefront edge services starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Webhook: POST http://{}/api/stripe-webhook", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
