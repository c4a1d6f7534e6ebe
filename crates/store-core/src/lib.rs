//! # store-core
//!
//! Core types for the storefront edge services.
//!
//! This crate provides:
//! - `StoreError` for typed error handling with HTTP status mapping
//! - `OrderStatusUpdate` — the payload sent to the internal order service
//! - `WebhookEvent` / `WebhookEventType` — the verified event model
//! - `Product` and `ProductGallery` — product detail view state
//!
//! ## Example
//!
//! ```rust
//! use store_core::{OrderStatusUpdate, WebhookEventType};
//!
//! let kind = WebhookEventType::from_provider("checkout.session.completed");
//! assert_eq!(kind, WebhookEventType::CheckoutCompleted);
//!
//! let update = OrderStatusUpdate::paid(Some("pi_123".into()), Some("cs_456".into()));
//! assert_eq!(update.status.as_str(), "paid");
//! ```

pub mod error;
pub mod event;
pub mod gallery;
pub mod order;
pub mod product;

// Re-exports for convenience
pub use error::{StoreError, StoreResult};
pub use event::{WebhookEvent, WebhookEventType};
pub use gallery::ProductGallery;
pub use order::{OrderStatus, OrderStatusUpdate};
pub use product::Product;
