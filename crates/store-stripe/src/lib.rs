//! # store-stripe
//!
//! Stripe webhook verification for the storefront edge services.
//!
//! This crate provides:
//!
//! 1. **StripeConfig** — secrets from the environment, with a deliberate
//!    disabled mode when they are not provisioned
//! 2. **StripeWebhookVerifier** — HMAC-SHA256 signature verification over the
//!    raw request body, with the provider-default clock tolerance
//! 3. **CheckoutSessionData** — field extraction from
//!    `checkout.session.completed` events
//!
//! ## Quick Start
//!
//! ```rust
//! use store_stripe::{sign_payload, StripeWebhookVerifier, CheckoutSessionData};
//!
//! let secret = "whsec_example";
//! let body = br#"{"id":"evt_1","type":"checkout.session.completed","created":0,
//!                 "data":{"object":{"id":"cs_1","metadata":{"orderId":"ord_1"}}}}"#;
//!
//! // In production the header comes from the request; tests sign locally.
//! let header = sign_payload(secret, body, chrono::Utc::now().timestamp());
//!
//! let verifier = StripeWebhookVerifier::new(secret);
//! let event = verifier.verify_and_parse(body, &header).unwrap();
//! let session = CheckoutSessionData::from_event(&event);
//! assert_eq!(session.order_id(), Some("ord_1"));
//! ```

pub mod config;
pub mod webhook;

// Re-exports
pub use config::StripeConfig;
pub use webhook::{
    sign_payload, CheckoutSessionData, StripeWebhookVerifier, DEFAULT_TOLERANCE_SECS,
};
