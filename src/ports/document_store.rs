//! Document store port.
//!
//! Contract for the external schemaless database. Documents are JSON
//! objects addressed by `(collection, id)`. Updates support plain field
//! sets plus the store's atomic array-union/array-remove operations
//! (used for likes and comments). No transactions, no multi-document
//! consistency.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A stored document's fields.
pub type Document = serde_json::Map<String, Value>;

/// A single mutation applied to one field of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    /// Replace the field with the given value.
    Set(Value),
    /// Append the value to the array field unless an equal element exists.
    ArrayUnion(Value),
    /// Remove every array element equal to the value.
    ArrayRemove(Value),
}

/// A field name paired with the operation to apply to it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub op: FieldOp,
}

impl FieldChange {
    pub fn set(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FieldOp::Set(value),
        }
    }

    pub fn array_union(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FieldOp::ArrayUnion(value),
        }
    }

    pub fn array_remove(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FieldOp::ArrayRemove(value),
        }
    }
}

/// Errors reported by document store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `update` targeted a document that does not exist.
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    /// The backend rejected the request or was unreachable.
    #[error("document store request failed: {0}")]
    Backend(String),

    /// A value could not be (de)serialized.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a not-found error for a document address.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

/// External schemaless per-document database.
///
/// # Contract
///
/// Implementations must:
/// - Return `Ok(None)` from `get` for a missing document
/// - Create or fully replace on `set`
/// - Apply `update` changes atomically per document, returning
///   `StoreError::NotFound` if the document does not exist
/// - Treat `delete` of a missing document as success (idempotent)
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches a document by address.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Creates or replaces a document.
    async fn set(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError>;

    /// Applies field changes to an existing document.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        changes: Vec<FieldChange>,
    ) -> Result<(), StoreError>;

    /// Deletes a document. Succeeds if it was already absent.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_change_constructors_build_the_expected_ops() {
        let set = FieldChange::set("content", json!("hola"));
        assert_eq!(set.field, "content");
        assert_eq!(set.op, FieldOp::Set(json!("hola")));

        let union = FieldChange::array_union("likes", json!("u1"));
        assert_eq!(union.op, FieldOp::ArrayUnion(json!("u1")));

        let remove = FieldChange::array_remove("likes", json!("u1"));
        assert_eq!(remove.op, FieldOp::ArrayRemove(json!("u1")));
    }

    #[test]
    fn not_found_error_names_the_document() {
        let err = StoreError::not_found("posts", "p1");
        assert_eq!(format!("{}", err), "document posts/p1 not found");
    }

    #[test]
    fn document_store_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn DocumentStore) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn DocumentStore>>();
    }
}
