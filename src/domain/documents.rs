//! Serde shapes for the documents stored in the backend.
//!
//! The document store itself is schemaless; these types document the
//! shapes the client reads and writes. Field names are camelCase on the
//! wire. Timestamps travel as ISO-8601 strings.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Collection holding one profile document per registered user.
pub const COLLECTION_USERS: &str = "users";

/// Collection holding the shared travel posts.
pub const COLLECTION_POSTS: &str = "posts";

/// Current time as an ISO-8601 UTC string, the store's timestamp format.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Profile document written at registration, keyed by the user's uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A comment stored inline on its post's `comments` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDoc {
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: String,
}

/// A travel post document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDoc {
    pub user_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Uids of users who liked the post.
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<CommentDoc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn now_iso_is_utc_iso8601() {
        let ts = now_iso();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn user_doc_serializes_camel_case() {
        let doc = UserDoc {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(value["name"], "Ana");
    }

    #[test]
    fn post_doc_defaults_missing_arrays() {
        let doc: PostDoc = serde_json::from_value(json!({
            "userId": "u1",
            "content": "Atardecer en Lisboa",
            "createdAt": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap();
        assert!(doc.likes.is_empty());
        assert!(doc.comments.is_empty());
        assert!(doc.image_url.is_none());
    }

    #[test]
    fn comment_doc_round_trips_wire_names() {
        let value = json!({
            "userId": "u1",
            "userName": "Ana",
            "content": "¡Qué vistas!",
            "createdAt": "2024-01-01T00:00:00.000Z"
        });
        let doc: CommentDoc = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(doc.user_name, "Ana");
        assert_eq!(serde_json::to_value(&doc).unwrap(), value);
    }
}
