//! ToggleLike / AddComment / DeletePost / UpdatePost - post command handlers.
//!
//! Document-store passthroughs. Likes and comments live as arrays on the
//! post document and are mutated with the store's atomic array
//! operations, so concurrent clients cannot clobber each other's
//! entries.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::domain::documents::{now_iso, CommentDoc, COLLECTION_POSTS};
use crate::ports::{DocumentStore, FieldChange, StoreError};

/// Command to like or unlike a post.
#[derive(Debug, Clone)]
pub struct ToggleLikeCommand {
    pub post_id: String,
    pub user_id: String,
}

/// Handler that flips a user's like on a post.
pub struct ToggleLikeHandler {
    store: Arc<dyn DocumentStore>,
}

impl ToggleLikeHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Returns the new liked state: true if the like was added.
    pub async fn handle(&self, cmd: ToggleLikeCommand) -> Result<bool, StoreError> {
        let doc = self
            .store
            .get(COLLECTION_POSTS, &cmd.post_id)
            .await?
            .ok_or_else(|| StoreError::not_found(COLLECTION_POSTS, &cmd.post_id))?;

        let has_liked = doc
            .get("likes")
            .and_then(Value::as_array)
            .map(|likes| likes.iter().any(|v| v.as_str() == Some(&cmd.user_id)))
            .unwrap_or(false);

        let change = if has_liked {
            FieldChange::array_remove("likes", json!(cmd.user_id))
        } else {
            FieldChange::array_union("likes", json!(cmd.user_id))
        };
        self.store
            .update(COLLECTION_POSTS, &cmd.post_id, vec![change])
            .await?;

        tracing::debug!(post_id = %cmd.post_id, liked = !has_liked, "like toggled");
        Ok(!has_liked)
    }
}

/// Command to comment on a post.
#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub post_id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
}

/// Handler that appends a comment to a post.
pub struct AddCommentHandler {
    store: Arc<dyn DocumentStore>,
}

impl AddCommentHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Returns the stored comment.
    pub async fn handle(&self, cmd: AddCommentCommand) -> Result<CommentDoc, StoreError> {
        let comment = CommentDoc {
            user_id: cmd.user_id,
            user_name: cmd.user_name,
            content: cmd.content,
            created_at: now_iso(),
        };

        let change = FieldChange::array_union("comments", serde_json::to_value(&comment)?);
        self.store
            .update(COLLECTION_POSTS, &cmd.post_id, vec![change])
            .await?;

        tracing::debug!(post_id = %cmd.post_id, "comment added");
        Ok(comment)
    }
}

/// Command to delete a post.
#[derive(Debug, Clone)]
pub struct DeletePostCommand {
    pub post_id: String,
}

/// Handler that removes a post document.
pub struct DeletePostHandler {
    store: Arc<dyn DocumentStore>,
}

impl DeletePostHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DeletePostCommand) -> Result<(), StoreError> {
        self.store.delete(COLLECTION_POSTS, &cmd.post_id).await?;
        tracing::info!(post_id = %cmd.post_id, "post deleted");
        Ok(())
    }
}

/// Command to edit a post's fields.
#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub post_id: String,
    /// Fields to merge into the document.
    pub fields: serde_json::Map<String, Value>,
}

/// Handler that merges new fields into a post, stamping `updatedAt`.
pub struct UpdatePostHandler {
    store: Arc<dyn DocumentStore>,
}

impl UpdatePostHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: UpdatePostCommand) -> Result<(), StoreError> {
        let mut changes: Vec<FieldChange> = cmd
            .fields
            .into_iter()
            .map(|(field, value)| FieldChange::set(field, value))
            .collect();
        changes.push(FieldChange::set("updatedAt", json!(now_iso())));

        self.store
            .update(COLLECTION_POSTS, &cmd.post_id, changes)
            .await?;

        tracing::debug!(post_id = %cmd.post_id, "post updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryDocumentStore;

    async fn seed_post(store: &InMemoryDocumentStore, id: &str, likes: &[&str]) {
        let fields = json!({
            "userId": "author",
            "content": "Amanecer en el Teide",
            "createdAt": now_iso(),
            "likes": likes,
            "comments": [],
        });
        let Value::Object(fields) = fields else {
            unreachable!()
        };
        store.set(COLLECTION_POSTS, id, fields).await.unwrap();
    }

    #[tokio::test]
    async fn toggle_like_adds_then_removes() {
        let store = Arc::new(InMemoryDocumentStore::new());
        seed_post(&store, "p1", &[]).await;
        let handler = ToggleLikeHandler::new(store.clone());

        let cmd = ToggleLikeCommand {
            post_id: "p1".to_string(),
            user_id: "u1".to_string(),
        };
        assert!(handler.handle(cmd.clone()).await.unwrap());
        let doc = store.document(COLLECTION_POSTS, "p1").unwrap();
        assert_eq!(doc["likes"], json!(["u1"]));

        assert!(!handler.handle(cmd).await.unwrap());
        let doc = store.document(COLLECTION_POSTS, "p1").unwrap();
        assert_eq!(doc["likes"], json!([]));
    }

    #[tokio::test]
    async fn toggle_like_keeps_other_users_likes() {
        let store = Arc::new(InMemoryDocumentStore::new());
        seed_post(&store, "p1", &["u2"]).await;
        let handler = ToggleLikeHandler::new(store.clone());

        handler
            .handle(ToggleLikeCommand {
                post_id: "p1".to_string(),
                user_id: "u1".to_string(),
            })
            .await
            .unwrap();

        let doc = store.document(COLLECTION_POSTS, "p1").unwrap();
        assert_eq!(doc["likes"], json!(["u2", "u1"]));
    }

    #[tokio::test]
    async fn toggle_like_on_missing_post_is_not_found() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let handler = ToggleLikeHandler::new(store);

        let err = handler
            .handle(ToggleLikeCommand {
                post_id: "missing".to_string(),
                user_id: "u1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn add_comment_appends_with_author_and_timestamp() {
        let store = Arc::new(InMemoryDocumentStore::new());
        seed_post(&store, "p1", &[]).await;
        let handler = AddCommentHandler::new(store.clone());

        let comment = handler
            .handle(AddCommentCommand {
                post_id: "p1".to_string(),
                user_id: "u1".to_string(),
                user_name: "Ana".to_string(),
                content: "¡Qué vistas!".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(comment.user_name, "Ana");

        let doc = store.document(COLLECTION_POSTS, "p1").unwrap();
        let comments = doc["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["userName"], "Ana");
        assert_eq!(comments[0]["content"], "¡Qué vistas!");
        assert!(comments[0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn delete_post_removes_the_document_and_is_idempotent() {
        let store = Arc::new(InMemoryDocumentStore::new());
        seed_post(&store, "p1", &[]).await;
        let handler = DeletePostHandler::new(store.clone());

        let cmd = DeletePostCommand {
            post_id: "p1".to_string(),
        };
        handler.handle(cmd.clone()).await.unwrap();
        assert!(store.document(COLLECTION_POSTS, "p1").is_none());

        // Second delete still succeeds.
        handler.handle(cmd).await.unwrap();
    }

    #[tokio::test]
    async fn update_post_merges_fields_and_stamps_updated_at() {
        let store = Arc::new(InMemoryDocumentStore::new());
        seed_post(&store, "p1", &["u1"]).await;
        let handler = UpdatePostHandler::new(store.clone());

        let Value::Object(fields) = json!({"content": "Atardecer en el Teide"}) else {
            unreachable!()
        };
        handler
            .handle(UpdatePostCommand {
                post_id: "p1".to_string(),
                fields,
            })
            .await
            .unwrap();

        let doc = store.document(COLLECTION_POSTS, "p1").unwrap();
        assert_eq!(doc["content"], "Atardecer en el Teide");
        assert!(doc["updatedAt"].is_string());
        // Untouched fields survive the merge.
        assert_eq!(doc["likes"], json!(["u1"]));
    }
}
