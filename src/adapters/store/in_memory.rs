//! In-memory document store for testing.
//!
//! Faithful to the backend's observable semantics: `set` replaces,
//! `update` requires the document to exist and applies array
//! union/remove atomically per document, `delete` is idempotent.
//!
//! # Panics
//!
//! Methods may panic if internal locks are poisoned. Acceptable for test
//! code; production uses the REST adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{Document, DocumentStore, FieldChange, FieldOp, StoreError};

/// HashMap-backed document store.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, HashMap<String, Document>>>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Returns a document's fields, if present.
    pub fn document(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections
            .read()
            .expect("InMemoryDocumentStore: lock poisoned")
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    /// Number of documents in a collection.
    pub fn collection_len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .expect("InMemoryDocumentStore: lock poisoned")
            .get(collection)
            .map(HashMap::len)
            .unwrap_or(0)
    }
}

fn apply_change(doc: &mut Document, change: FieldChange) {
    match change.op {
        FieldOp::Set(value) => {
            doc.insert(change.field, value);
        }
        FieldOp::ArrayUnion(value) => {
            let entry = doc
                .entry(change.field)
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(items) = entry {
                if !items.contains(&value) {
                    items.push(value);
                }
            }
        }
        FieldOp::ArrayRemove(value) => {
            if let Some(Value::Array(items)) = doc.get_mut(&change.field) {
                items.retain(|item| item != &value);
            }
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.document(collection, id))
    }

    async fn set(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        self.collections
            .write()
            .expect("InMemoryDocumentStore: lock poisoned")
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        changes: Vec<FieldChange>,
    ) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .write()
            .expect("InMemoryDocumentStore: lock poisoned");
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        for change in changes {
            apply_change(doc, change);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if let Some(docs) = self
            .collections
            .write()
            .expect("InMemoryDocumentStore: lock poisoned")
            .get_mut(collection)
        {
            docs.remove(id);
        }
        Ok(())
    }
}
