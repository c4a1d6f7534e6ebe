//! # store-api
//!
//! HTTP layer for the storefront edge services.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Stripe webhook receiver (signature verification, order reconciliation)
//! - Auth gate middleware (cookie-presence redirects)
//! - MongoDB connector (process-wide, fail-fast at startup)
//! - Order-service forwarding client
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/stripe-webhook` | Stripe webhook receiver |

pub mod db;
pub mod gate;
pub mod handlers;
pub mod orders;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
