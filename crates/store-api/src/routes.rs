//! # Routes
//!
//! Axum router configuration for the storefront edge services.

use crate::gate::auth_gate;
use crate::handlers;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /api/stripe-webhook - Stripe webhook receiver (raw body)
///
/// The auth gate runs before routing for every request; only `/user` and
/// `/auth` prefixed paths are affected by it.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Webhook routes must receive the body byte-for-byte as sent.
    let webhook_routes = Router::new().route("/stripe-webhook", post(handlers::stripe_webhook));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api", webhook_routes)
        .layer(middleware::from_fn(auth_gate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
