//! # shop-stripe
//!
//! Stripe payment bridge for the toolshop storefront.
//!
//! The storefront needs exactly one thing from its payment processor: create
//! a payment intent for a price and hand the client secret back to the
//! browser. `StripeIntents` implements that over the PaymentIntents API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripeIntents;
//! use shop_core::PaymentBridge;
//!
//! let bridge = StripeIntents::from_env()?;
//! let intent = bridge.create_intent(129.99).await?;
//! // intent.client_secret goes back to the caller unchanged
//! ```

pub mod config;
pub mod intent;

// Re-exports
pub use config::StripeConfig;
pub use intent::StripeIntents;
