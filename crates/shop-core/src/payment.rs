//! # Payment Bridge Trait
//!
//! Seam for the external payment processor. The processor exposes one
//! operation the storefront needs: turning a price into a payment intent
//! whose client secret the browser finishes the charge with.

use crate::error::ShopResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An authorized-but-not-yet-captured charge, as handed back by the processor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Opaque secret the client completes the payment with
    pub client_secret: String,
}

/// Core trait for payment processor implementations
#[async_trait]
pub trait PaymentBridge: Send + Sync {
    /// Create a payment intent for a decimal price.
    ///
    /// No retry on failure; a processor error propagates to the caller.
    async fn create_intent(&self, price: f64) -> ShopResult<PaymentIntent>;

    /// Get the provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared bridge handle (dynamic dispatch)
pub type BoxedPaymentBridge = Arc<dyn PaymentBridge>;
