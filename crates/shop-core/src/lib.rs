//! # shop-core
//!
//! Core types and traits for the toolshop storefront backend.
//!
//! This crate provides:
//! - `DocumentStore` trait and `Collections` for the five resource stores
//! - `TokenService` for issuing and verifying bearer credentials
//! - `PaymentBridge` trait for the external payment processor
//! - `User`, `Order`, and `Payment` wire models
//! - `ShopError` for typed error handling

pub mod error;
pub mod order;
pub mod payment;
pub mod store;
pub mod token;
pub mod user;

// Re-exports for convenience
pub use error::{ShopError, ShopResult};
pub use order::{FinalizePayment, Order, Payment, StatusUpdate};
pub use payment::{BoxedPaymentBridge, PaymentBridge, PaymentIntent};
pub use store::{
    to_document, Collections, DeleteAck, Document, DocumentStore, Filter, InsertAck, StoreHandle,
    UpdateAck, ID_FIELD,
};
pub use token::TokenService;
pub use user::{Role, User};
