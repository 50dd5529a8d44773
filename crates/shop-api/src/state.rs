//! # Application State
//!
//! Shared state for the axum application. Store handles, the token service,
//! and the payment bridge are built once at startup and handed in; handlers
//! never reach for process-wide globals.

use shop_core::{BoxedPaymentBridge, Collections, ShopError, TokenService};
use shop_store::in_memory_collections;
use shop_stripe::StripeIntents;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Bearer token lifetime in hours
    pub token_ttl_hours: i64,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            token_ttl_hours: std::env::var("ACCESS_TOKEN_TTL_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, ShopError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ShopError::Configuration(format!("invalid bind address {}:{}", self.host, self.port))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The five resource stores
    pub stores: Collections,
    /// Bearer credential issue/verify
    pub tokens: TokenService,
    /// Payment processor bridge
    pub payments: BoxedPaymentBridge,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Wire up state from the environment: in-memory stores, the token
    /// signing secret, and the Stripe bridge.
    pub fn new() -> Result<Self, ShopError> {
        let config = AppConfig::from_env();

        let secret = std::env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| ShopError::Configuration("ACCESS_TOKEN_SECRET not set".to_string()))?;
        let tokens = TokenService::new(secret, config.token_ttl_hours);

        let bridge = StripeIntents::from_env()?;

        Ok(Self {
            stores: in_memory_collections(),
            tokens,
            payments: Arc::new(bridge) as BoxedPaymentBridge,
            config,
        })
    }

    /// Build state from explicit parts (tests inject fakes here)
    pub fn with_parts(
        stores: Collections,
        tokens: TokenService,
        payments: BoxedPaymentBridge,
        config: AppConfig,
    ) -> Self {
        Self {
            stores,
            tokens,
            payments,
            config,
        }
    }
}
