//! # Stripe Configuration
//!
//! Secrets are loaded from environment variables. Unlike most configuration,
//! absence here is not an error: environments without provisioned secrets
//! (CI, build-time analysis) run with the integration disabled and the
//! webhook endpoint answering success without processing.

use std::env;

/// Stripe configuration for the webhook receiver.
#[derive(Debug, Clone, Default)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...), if provisioned
    pub secret_key: Option<String>,

    /// Webhook signing secret (whsec_...), if provisioned
    pub webhook_secret: Option<String>,
}

impl StripeConfig {
    /// Load configuration from `STRIPE_SECRET_KEY` and `STRIPE_WEBHOOK_SECRET`.
    ///
    /// Never fails; missing variables put the integration in disabled mode.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            secret_key: env::var("STRIPE_SECRET_KEY").ok().filter(|v| !v.is_empty()),
            webhook_secret: env::var("STRIPE_WEBHOOK_SECRET")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            secret_key: Some(secret_key.into()),
            webhook_secret: Some(webhook_secret.into()),
        }
    }

    /// Whether webhook processing is enabled.
    ///
    /// Both secrets must be present: the API key to talk to Stripe and the
    /// signing secret to verify inbound events.
    pub fn is_enabled(&self) -> bool {
        self.secret_key.is_some() && self.webhook_secret.is_some()
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key
            .as_deref()
            .is_some_and(|k| k.starts_with("sk_test_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_secrets_required() {
        let config = StripeConfig::new("sk_test_abc123", "whsec_secret");
        assert!(config.is_enabled());

        let config = StripeConfig {
            secret_key: Some("sk_test_abc123".to_string()),
            webhook_secret: None,
        };
        assert!(!config.is_enabled());

        let config = StripeConfig {
            secret_key: None,
            webhook_secret: Some("whsec_secret".to_string()),
        };
        assert!(!config.is_enabled());

        assert!(!StripeConfig::default().is_enabled());
    }

    #[test]
    fn test_test_mode_detection() {
        assert!(StripeConfig::new("sk_test_abc", "whsec_x").is_test_mode());
        assert!(!StripeConfig::new("sk_live_abc", "whsec_x").is_test_mode());
        assert!(!StripeConfig::default().is_test_mode());
    }
}
