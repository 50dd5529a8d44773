//! # In-Memory Document Store
//!
//! A `DocumentStore` backend holding documents behind a `tokio` RwLock.
//! Each operation takes the lock once, so single-document read/modify/write
//! is atomic; nothing coordinates across documents or across stores.

use async_trait::async_trait;
use serde_json::Value;
use shop_core::{
    Collections, DeleteAck, Document, DocumentStore, Filter, InsertAck, ShopResult, UpdateAck,
    ID_FIELD,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// One in-memory collection
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<Vec<Document>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared handle suitable for `Collections`
    pub fn handle() -> Arc<dyn DocumentStore> {
        Arc::new(Self::new())
    }
}

/// Assign a generated id when the document carries none
fn ensure_id(doc: &mut Document) -> String {
    if let Some(Value::String(id)) = doc.get(ID_FIELD) {
        return id.clone();
    }
    let id = Uuid::new_v4().to_string();
    doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));
    id
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, filter: Filter) -> ShopResult<Vec<Document>> {
        let docs = self.docs.read().await;
        Ok(docs.iter().filter(|d| filter.matches(d)).cloned().collect())
    }

    async fn find_one(&self, filter: Filter) -> ShopResult<Option<Document>> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|d| filter.matches(d)).cloned())
    }

    async fn insert_one(&self, mut doc: Document) -> ShopResult<InsertAck> {
        let inserted_id = ensure_id(&mut doc);
        let mut docs = self.docs.write().await;
        docs.push(doc);
        debug!("inserted document {}", inserted_id);
        Ok(InsertAck { inserted_id })
    }

    async fn update_one(
        &self,
        filter: Filter,
        changes: Document,
        upsert: bool,
    ) -> ShopResult<UpdateAck> {
        let mut docs = self.docs.write().await;

        if let Some(doc) = docs.iter_mut().find(|d| filter.matches(d)) {
            let mut modified = false;
            for (field, value) in changes {
                if doc.get(&field) != Some(&value) {
                    doc.insert(field, value);
                    modified = true;
                }
            }
            return Ok(UpdateAck {
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
            });
        }

        if upsert {
            // Seed the new document from the filter so the key it was
            // addressed by is part of what gets stored
            let mut doc = filter.as_document().clone();
            doc.extend(changes);
            let upserted_id = ensure_id(&mut doc);
            docs.push(doc);
            debug!("upserted document {}", upserted_id);
            return Ok(UpdateAck {
                matched_count: 0,
                modified_count: 0,
                upserted_id: Some(upserted_id),
            });
        }

        Ok(UpdateAck {
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
        })
    }

    async fn delete_one(&self, filter: Filter) -> ShopResult<DeleteAck> {
        let mut docs = self.docs.write().await;
        match docs.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                docs.remove(index);
                Ok(DeleteAck { deleted_count: 1 })
            }
            None => Ok(DeleteAck { deleted_count: 0 }),
        }
    }
}

/// Wire up the five resource collections over fresh in-memory stores
pub fn in_memory_collections() -> Collections {
    Collections::new(
        MemoryStore::handle(),
        MemoryStore::handle(),
        MemoryStore::handle(),
        MemoryStore::handle(),
        MemoryStore::handle(),
    )
}
