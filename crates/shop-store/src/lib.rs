//! # shop-store
//!
//! In-memory `DocumentStore` backend for the toolshop storefront.
//!
//! The document database is an external collaborator behind the
//! `shop_core::DocumentStore` seam; this crate is the backend the server and
//! the tests run against. Atomicity holds per single document and nothing
//! more: the compound order/payment operations in the API are two independent
//! writes with no transaction between them.

pub mod memory;

// Re-exports
pub use memory::{in_memory_collections, MemoryStore};
