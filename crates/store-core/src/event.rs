//! # Webhook Event Model
//!
//! Provider-agnostic shape of a verified webhook event. Only
//! `CheckoutCompleted` drives a side effect; every other variant is accepted
//! and ignored by the receiver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event kinds the receiver distinguishes.
///
/// The set is closed over what the dispatcher handles, with an explicit
/// `Unknown` passthrough so new provider events never fail delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// Checkout session completed — the only event that updates an order
    CheckoutCompleted,
    /// Checkout session expired without payment
    CheckoutExpired,
    /// Payment intent succeeded
    PaymentSucceeded,
    /// Payment intent failed
    PaymentFailed,
    /// Unrecognized event (accepted, logged, ignored)
    Unknown(String),
}

impl WebhookEventType {
    /// Map a provider event name (e.g. `checkout.session.completed`) to a variant.
    pub fn from_provider(name: &str) -> Self {
        match name {
            "checkout.session.completed" => WebhookEventType::CheckoutCompleted,
            "checkout.session.expired" => WebhookEventType::CheckoutExpired,
            "payment_intent.succeeded" => WebhookEventType::PaymentSucceeded,
            "payment_intent.payment_failed" => WebhookEventType::PaymentFailed,
            other => WebhookEventType::Unknown(other.to_string()),
        }
    }
}

/// A signature-verified webhook event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event ID from the provider
    pub event_id: String,

    /// Event type
    pub event_type: WebhookEventType,

    /// Raw event object (the session, payment intent, etc.)
    pub data: serde_json::Map<String, serde_json::Value>,

    /// When the provider created the event
    pub created: DateTime<Utc>,
}
