//! # Request Handlers
//!
//! Axum request handlers for the storefront edge services. The webhook
//! handler owns the provider-facing response contract: success for verified
//! or ignored events, client error for signature problems, and nothing about
//! internal forwarding ever surfaces to the provider.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use store_core::{OrderStatusUpdate, StoreError, WebhookEventType};
use store_stripe::CheckoutSessionData;
use tracing::{error, info, instrument};

/// Error response body. Messages are generic by design: internal detail
/// stays in the server-side log.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn error_to_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.public_message(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Handle Stripe webhook events.
///
/// The body arrives as raw bytes and is used verbatim for signature
/// verification — parsing happens only after the signature checks out.
#[instrument(skip(state, headers, body))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    // Disabled mode: secrets not provisioned. Answer success without
    // touching the payload so unprovisioned environments never fail.
    let Some(verifier) = &state.verifier else {
        info!("Stripe webhook received while disabled; skipping");
        return Ok(Json(
            serde_json::json!({ "message": "Stripe webhook disabled" }),
        ));
    };

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| error_to_response(StoreError::MissingSignature))?;

    let event = verifier.verify_and_parse(&body, signature).map_err(|e| {
        error!("Webhook verification failed: {}", e);
        error_to_response(e)
    })?;

    info!(
        "Received webhook: type={:?}, id={}",
        event.event_type, event.event_id
    );

    match &event.event_type {
        WebhookEventType::CheckoutCompleted => {
            let session = CheckoutSessionData::from_event(&event);

            match session.order_id() {
                Some(order_id) => {
                    let update = OrderStatusUpdate::paid(
                        session.payment_intent_id.clone(),
                        session.session_id.clone(),
                    );
                    forward_order_update(&state, order_id.to_string(), update);
                }
                None => {
                    // No order to reconcile. Still a success: retrying the
                    // delivery cannot produce different metadata.
                    info!(
                        "Checkout completed without orderId metadata: session={:?}",
                        session.session_id
                    );
                }
            }
        }
        other => {
            info!("Ignoring webhook event type: {:?}", other);
        }
    }

    Ok(Json(serde_json::json!({ "received": true })))
}

/// Fire-and-forget forwarding to the order service.
///
/// Detached on purpose: the provider's response must not wait for, or
/// reflect, the internal call. Failures are logged and swallowed — there is
/// no queued retry (see DESIGN.md).
fn forward_order_update(state: &AppState, order_id: String, update: OrderStatusUpdate) {
    let notifier = state.orders.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier.order_paid(&order_id, &update).await {
            error!("Order status forwarding failed for {}: {}", order_id, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::OrderNotifier;
    use crate::routes::create_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::sync::Arc;
    use store_core::StoreResult;
    use store_stripe::{sign_payload, StripeWebhookVerifier};
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    const SECRET: &str = "whsec_test_secret";

    /// Records forwarding calls on a channel so tests can await them.
    struct RecordingNotifier {
        tx: mpsc::UnboundedSender<(String, OrderStatusUpdate)>,
    }

    #[async_trait]
    impl OrderNotifier for RecordingNotifier {
        async fn order_paid(
            &self,
            order_id: &str,
            update: &OrderStatusUpdate,
        ) -> StoreResult<()> {
            self.tx
                .send((order_id.to_string(), update.clone()))
                .expect("test receiver alive");
            Ok(())
        }
    }

    async fn test_app(
        enabled: bool,
    ) -> (
        axum::Router,
        mpsc::UnboundedReceiver<(String, OrderStatusUpdate)>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let verifier = enabled.then(|| StripeWebhookVerifier::new(SECRET));
        let state = AppState::for_tests(
            verifier,
            Arc::new(RecordingNotifier { tx }),
            crate::db::lazy_handle().await,
        );
        (create_router(state), rx)
    }

    fn event_body(event_type: &str, metadata: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "id": "evt_1",
            "type": event_type,
            "created": Utc::now().timestamp(),
            "data": {
                "object": {
                    "id": "cs_test_123",
                    "payment_intent": "pi_test_456",
                    "metadata": metadata
                }
            }
        }))
        .unwrap()
    }

    fn webhook_request(body: Vec<u8>, signature: Option<String>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/stripe-webhook")
            .header("content-type", "application/json");
        if let Some(sig) = signature {
            builder = builder.header("stripe-signature", sig);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn recv_forward(
        rx: &mut mpsc::UnboundedReceiver<(String, OrderStatusUpdate)>,
    ) -> (String, OrderStatusUpdate) {
        tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .expect("forwarding call within timeout")
            .expect("channel open")
    }

    fn assert_no_forward(rx: &mut mpsc::UnboundedReceiver<(String, OrderStatusUpdate)>) {
        assert!(rx.try_recv().is_err(), "no forwarding call expected");
    }

    #[tokio::test]
    async fn test_missing_signature_is_client_error() {
        let (app, mut rx) = test_app(true).await;
        let body = event_body("checkout.session.completed", json!({"orderId": "ord_1"}));

        let response = app.oneshot(webhook_request(body, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_no_forward(&mut rx);
    }

    #[tokio::test]
    async fn test_invalid_signature_is_client_error() {
        let (app, mut rx) = test_app(true).await;
        let body = event_body("checkout.session.completed", json!({"orderId": "ord_1"}));
        let bad_sig = sign_payload("whsec_wrong", &body, Utc::now().timestamp());

        let response = app
            .oneshot(webhook_request(body, Some(bad_sig)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_no_forward(&mut rx);
    }

    #[tokio::test]
    async fn test_checkout_completed_forwards_exactly_once() {
        let (app, mut rx) = test_app(true).await;
        let body = event_body("checkout.session.completed", json!({"orderId": "ord_42"}));
        let sig = sign_payload(SECRET, &body, Utc::now().timestamp());

        let response = app.oneshot(webhook_request(body, Some(sig))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["received"], true);

        let (order_id, update) = recv_forward(&mut rx).await;
        assert_eq!(order_id, "ord_42");
        assert_eq!(update.status.as_str(), "paid");
        assert_eq!(update.payment_intent_id.as_deref(), Some("pi_test_456"));
        assert_eq!(update.stripe_session_id.as_deref(), Some("cs_test_123"));

        assert_no_forward(&mut rx);
    }

    #[tokio::test]
    async fn test_other_event_types_are_accepted_and_ignored() {
        let (app, mut rx) = test_app(true).await;
        let body = event_body("payment_intent.succeeded", json!({"orderId": "ord_1"}));
        let sig = sign_payload(SECRET, &body, Utc::now().timestamp());

        let response = app.oneshot(webhook_request(body, Some(sig))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        tokio::task::yield_now().await;
        assert_no_forward(&mut rx);
    }

    #[tokio::test]
    async fn test_unknown_event_type_is_accepted() {
        let (app, mut rx) = test_app(true).await;
        let body = event_body("charge.refunded", json!({}));
        let sig = sign_payload(SECRET, &body, Utc::now().timestamp());

        let response = app.oneshot(webhook_request(body, Some(sig))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_no_forward(&mut rx);
    }

    #[tokio::test]
    async fn test_missing_order_id_succeeds_without_forwarding() {
        let (app, mut rx) = test_app(true).await;
        let body = event_body("checkout.session.completed", json!({}));
        let sig = sign_payload(SECRET, &body, Utc::now().timestamp());

        let response = app.oneshot(webhook_request(body, Some(sig))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        tokio::task::yield_now().await;
        assert_no_forward(&mut rx);
    }

    #[tokio::test]
    async fn test_disabled_mode_short_circuits() {
        let (app, mut rx) = test_app(false).await;
        // Garbage payload, no signature: disabled mode must not care.
        let response = app
            .oneshot(webhook_request(b"{not even json".to_vec(), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_no_forward(&mut rx);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _rx) = test_app(true).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
