//! # Order Status Update
//!
//! The payload forwarded to the internal order service when a payment
//! outcome is observed. The order service owns all invariants and storage;
//! this type exists transiently per webhook call.

use serde::{Deserialize, Serialize};

/// Order status produced by the reconciliation flow.
///
/// Only `Paid` is ever emitted by the webhook path today; the enum leaves
/// room for other outcomes the order service already understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Paid => "paid",
        }
    }
}

/// Status update sent to `PUT /orders/{orderId}/webhook-status`.
///
/// Field names follow the order service's wire contract (camelCase).
/// The provider identifiers are informational and copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    /// New order status
    pub status: OrderStatus,

    /// Payment intent identifier from the provider (opaque)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,

    /// Checkout session identifier from the provider (opaque)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_session_id: Option<String>,
}

impl OrderStatusUpdate {
    /// Build the update for a completed checkout session.
    pub fn paid(
        payment_intent_id: Option<String>,
        stripe_session_id: Option<String>,
    ) -> Self {
        Self {
            status: OrderStatus::Paid,
            payment_intent_id,
            stripe_session_id,
        }
    }
}
