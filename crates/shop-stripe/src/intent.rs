//! # Stripe Payment Intents
//!
//! Implementation of the payment bridge over Stripe's PaymentIntents API.
//! One operation: price in, client secret out.

use crate::config::StripeConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shop_core::{PaymentBridge, PaymentIntent, ShopError, ShopResult};
use tracing::{debug, error, info, instrument};

/// Payment bridge backed by Stripe PaymentIntents
pub struct StripeIntents {
    config: StripeConfig,
    client: Client,
}

impl StripeIntents {
    /// Create a new bridge
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> ShopResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Convert a decimal price to the minor currency unit.
    /// The storefront charges in a single fixed currency, so the multiplier
    /// is a constant 100.
    fn to_minor_units(price: f64) -> i64 {
        (price * 100.0).round() as i64
    }
}

#[async_trait]
impl PaymentBridge for StripeIntents {
    #[instrument(skip(self))]
    async fn create_intent(&self, price: f64) -> ShopResult<PaymentIntent> {
        if !price.is_finite() || price < 0.0 {
            return Err(ShopError::InvalidRequest(format!(
                "invalid price: {price}"
            )));
        }

        let amount = Self::to_minor_units(price);

        debug!("Creating payment intent: amount={} (minor units)", amount);

        let form_params: Vec<(String, String)> = vec![
            ("amount".to_string(), amount.to_string()),
            ("currency".to_string(), "usd".to_string()),
            ("payment_method_types[]".to_string(), "card".to_string()),
        ];

        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| ShopError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(ShopError::ProviderError {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(ShopError::ProviderError {
                provider: "stripe".to_string(),
                message: format!("HTTP {status}: {body}"),
            });
        }

        let intent: StripeIntentResponse = serde_json::from_str(&body).map_err(|e| {
            ShopError::Serialization(format!("Failed to parse Stripe response: {e}"))
        })?;

        info!("Created payment intent: id={}", intent.id);

        Ok(PaymentIntent {
            client_secret: intent.client_secret,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeIntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_minor_unit_conversion() {
        assert_eq!(StripeIntents::to_minor_units(10.99), 1099);
        assert_eq!(StripeIntents::to_minor_units(0.0), 0);
        // Float-noise prices round instead of truncating
        assert_eq!(StripeIntents::to_minor_units(19.999999), 2000);
    }

    #[tokio::test]
    async fn test_create_intent_returns_client_secret() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header("Authorization", "Bearer sk_test_abc"))
            .and(body_string_contains("amount=1099"))
            .and(body_string_contains("currency=usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "pi_123",
                "client_secret": "pi_123_secret_456"
            })))
            .mount(&server)
            .await;

        let bridge = StripeIntents::new(
            StripeConfig::new("sk_test_abc").with_api_base_url(server.uri()),
        );

        let intent = bridge.create_intent(10.99).await.unwrap();
        assert_eq!(intent.client_secret, "pi_123_secret_456");
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
                "error": {"message": "Your card was declined."}
            })))
            .mount(&server)
            .await;

        let bridge = StripeIntents::new(
            StripeConfig::new("sk_test_abc").with_api_base_url(server.uri()),
        );

        let err = bridge.create_intent(5.0).await.unwrap_err();
        match err {
            ShopError::ProviderError { provider, message } => {
                assert_eq!(provider, "stripe");
                assert_eq!(message, "Your card was declined.");
            }
            other => panic!("expected ProviderError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_negative_price_rejected_before_the_wire() {
        let bridge = StripeIntents::new(StripeConfig::new("sk_test_abc"));
        assert!(matches!(
            bridge.create_intent(-1.0).await.unwrap_err(),
            ShopError::InvalidRequest(_)
        ));
    }
}
