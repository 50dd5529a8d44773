//! # Order and Payment Types
//!
//! Wire models for the order lifecycle. Orders are created open-shaped at
//! checkout; the payment-finalize step flips `paid` and records the
//! transaction. Field names stay camelCase on the wire.

use crate::store::Document;
use serde::{Deserialize, Serialize};

/// An order document.
///
/// `user` is a soft foreign key to an account email; an order referencing a
/// nonexistent user is not rejected. `status` is free text driven by the
/// workflow (e.g. pending → approved → shipped).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Owning user's email
    pub user: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default)]
    pub paid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    /// Arbitrary checkout fields (cart contents, address, ...)
    #[serde(flatten)]
    pub extra: Document,
}

/// A payment record, created when an order's payment is finalized.
///
/// Linked to an order only by sharing an identifier at update time; there is
/// no enforced constraint between the two collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub transaction_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Document,
}

/// Body of the payment-finalize step (PATCH on an order)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizePayment {
    pub transaction_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Document,
}

/// Body of the admin bulk status update (PUT on an order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}
