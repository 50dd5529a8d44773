//! # Document Store
//!
//! The store abstraction behind every resource collection.
//! Documents are arbitrary-shape JSON maps addressed by a string `_id`;
//! backends guarantee atomicity per single document only. There is no
//! multi-document transaction primitive.

use crate::error::ShopResult;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// A stored document: arbitrary fields, no schema
pub type Document = serde_json::Map<String, Value>;

/// Field name used to address documents
pub const ID_FIELD: &str = "_id";

/// Equality filter over document fields
#[derive(Debug, Clone, Default)]
pub struct Filter {
    fields: Document,
}

impl Filter {
    /// Create an empty filter (matches every document)
    pub fn new() -> Self {
        Self {
            fields: Document::new(),
        }
    }

    /// Filter addressing a single document by id
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().eq(ID_FIELD, id.into())
    }

    /// Builder: add a field equality constraint
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Check whether a document satisfies every constraint
    pub fn matches(&self, doc: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, value)| doc.get(field) == Some(value))
    }

    /// The filter's constraints as a document (used to seed upserts)
    pub fn as_document(&self) -> &Document {
        &self.fields
    }

    /// Check if the filter has no constraints
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Acknowledgment of a single-document insert
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    /// Id of the stored document (generated when the body carried none)
    pub inserted_id: String,
}

/// Acknowledgment of a single-document update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    /// Number of documents the filter matched (0 or 1)
    pub matched_count: u64,

    /// Number of documents actually changed
    pub modified_count: u64,

    /// Id of the inserted document when an upsert missed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

/// Acknowledgment of a single-document delete.
/// A zero count is an ordinary outcome, not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub deleted_count: u64,
}

/// Core trait for document store backends.
///
/// Each resource collection holds one `DocumentStore` handle; handlers receive
/// the handles as injected dependencies rather than reaching for process-wide
/// state.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Find every document matching the filter.
    /// Returns an empty vec, not an error, when nothing matches.
    async fn find(&self, filter: Filter) -> ShopResult<Vec<Document>>;

    /// Find the first document matching the filter, `None` on a miss.
    async fn find_one(&self, filter: Filter) -> ShopResult<Option<Document>>;

    /// Insert a document verbatim, generating an `_id` when absent.
    async fn insert_one(&self, doc: Document) -> ShopResult<InsertAck>;

    /// Apply `changes` field-by-field to the first matching document
    /// (set-merge). With `upsert`, a miss inserts filter ∪ changes instead.
    async fn update_one(
        &self,
        filter: Filter,
        changes: Document,
        upsert: bool,
    ) -> ShopResult<UpdateAck>;

    /// Delete the first matching document; a miss acks with count 0.
    async fn delete_one(&self, filter: Filter) -> ShopResult<DeleteAck>;
}

/// Type alias for a shared store handle (dynamic dispatch)
pub type StoreHandle = Arc<dyn DocumentStore>;

/// The five independent resource collections.
///
/// The only cross-collection coupling is Order↔Payment (an identifier shared
/// at update time) and Order↔User (email as a soft foreign key, never
/// enforced).
#[derive(Clone)]
pub struct Collections {
    pub products: StoreHandle,
    pub users: StoreHandle,
    pub orders: StoreHandle,
    pub payments: StoreHandle,
    pub reviews: StoreHandle,
}

impl Collections {
    /// Bundle five store handles
    pub fn new(
        products: StoreHandle,
        users: StoreHandle,
        orders: StoreHandle,
        payments: StoreHandle,
        reviews: StoreHandle,
    ) -> Self {
        Self {
            products,
            users,
            orders,
            payments,
            reviews,
        }
    }
}

/// Convert any serializable value into a `Document`.
/// Fails on values that do not serialize to a JSON object.
pub fn to_document<T: Serialize>(value: &T) -> ShopResult<Document> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(crate::error::ShopError::Serialization(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(e) => Err(crate::error::ShopError::Serialization(e.to_string())),
    }
}
