//! # Stripe Webhook Verification
//!
//! Verifies the `Stripe-Signature` header over the raw request body and
//! parses the event. The signature scheme is HMAC-SHA256 over
//! `"{timestamp}.{body}"` with the endpoint's signing secret; the header may
//! carry several `v1` candidates (secret rotation) and any match accepts.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use store_core::{StoreError, StoreResult, WebhookEvent, WebhookEventType};
use tracing::debug;

/// Provider-default clock tolerance for the signature timestamp.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Verifier for inbound Stripe webhook events.
#[derive(Debug, Clone)]
pub struct StripeWebhookVerifier {
    webhook_secret: String,
    tolerance_secs: i64,
}

impl StripeWebhookVerifier {
    /// Create a verifier with the provider-default tolerance window.
    pub fn new(webhook_secret: impl Into<String>) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Builder: override the tolerance window (tests, clock-skewed setups).
    pub fn with_tolerance(mut self, secs: i64) -> Self {
        self.tolerance_secs = secs;
        self
    }

    /// Verify the signature header against the raw body and parse the event.
    ///
    /// The body must be the request bytes exactly as received; any
    /// re-serialization breaks the signature.
    pub fn verify_and_parse(&self, payload: &[u8], signature: &str) -> StoreResult<WebhookEvent> {
        let sig_parts = parse_signature_header(signature)?;

        let now = Utc::now().timestamp();
        if (now - sig_parts.timestamp).abs() > self.tolerance_secs {
            return Err(StoreError::SignatureVerificationFailed(
                "Timestamp outside tolerance".to_string(),
            ));
        }

        let signed_payload = format!(
            "{}.{}",
            sig_parts.timestamp,
            String::from_utf8_lossy(payload)
        );
        let expected_sig = compute_hmac_sha256(&self.webhook_secret, &signed_payload);

        let valid = sig_parts
            .signatures
            .iter()
            .any(|sig| constant_time_compare(sig, &expected_sig));

        if !valid {
            return Err(StoreError::SignatureVerificationFailed(
                "Signature mismatch".to_string(),
            ));
        }

        let event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            StoreError::WebhookParseError(format!("Failed to parse webhook: {}", e))
        })?;

        debug!("Verified Stripe webhook: type={}", event.event_type);

        Ok(WebhookEvent {
            event_id: event.id,
            event_type: WebhookEventType::from_provider(&event.event_type),
            data: event.data.object,
            created: DateTime::from_timestamp(event.created, 0).unwrap_or_else(Utc::now),
        })
    }
}

/// Compute a `Stripe-Signature` header value for a payload.
///
/// This is what the provider does on its side; exposed so tests and local
/// tooling can produce deliverable events.
pub fn sign_payload(webhook_secret: &str, payload: &[u8], timestamp: i64) -> String {
    let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
    let sig = compute_hmac_sha256(webhook_secret, &signed_payload);
    format!("t={},v1={}", timestamp, sig)
}

/// Data extracted from a `checkout.session.completed` event.
#[derive(Debug, Clone)]
pub struct CheckoutSessionData {
    /// Provider session ID (`cs_...`)
    pub session_id: Option<String>,

    /// Payment intent ID (`pi_...`), if the session carried one
    pub payment_intent_id: Option<String>,

    /// Session metadata set at checkout creation time
    pub metadata: std::collections::HashMap<String, String>,
}

impl CheckoutSessionData {
    /// Extract session fields from a verified event.
    ///
    /// Missing fields are not errors: a session without metadata simply
    /// yields nothing to forward.
    pub fn from_event(event: &WebhookEvent) -> Self {
        let obj = &event.data;

        let session_id = obj.get("id").and_then(|v| v.as_str()).map(String::from);

        let payment_intent_id = obj
            .get("payment_intent")
            .and_then(|v| v.as_str())
            .map(String::from);

        let metadata = obj
            .get("metadata")
            .and_then(|m| m.as_object())
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            session_id,
            payment_intent_id,
            metadata,
        }
    }

    /// The externally issued order ID, set by the storefront at checkout
    /// creation under the `orderId` metadata key.
    pub fn order_id(&self) -> Option<&str> {
        self.metadata.get("orderId").map(|s| s.as_str())
    }
}

// =============================================================================
// Stripe wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeWebhookEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    created: i64,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: serde_json::Map<String, serde_json::Value>,
}

// =============================================================================
// Signature header parsing
// =============================================================================

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_signature_header(header: &str) -> StoreResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                timestamp = value.parse().ok();
            }
            "v1" => {
                signatures.push(value.to_string());
            }
            // Unknown schemes (v0, future) are skipped for forward compatibility
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        StoreError::SignatureVerificationFailed("Missing timestamp in signature".to_string())
    })?;

    if signatures.is_empty() {
        return Err(StoreError::SignatureVerificationFailed(
            "No v1 signature found".to_string(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn compute_hmac_sha256(secret: &str, message: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
