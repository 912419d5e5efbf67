//! Domain layer containing the session model and document types.
//!
//! # Module Organization
//!
//! - `session` - The process-wide session model (identity + resolution state)
//! - `auth` - Identity provider failure vocabulary and localized auth errors
//! - `documents` - Serde shapes for the documents stored in the backend

pub mod auth;
pub mod documents;
pub mod session;

pub use auth::{AuthError, AuthErrorKind};
pub use documents::{now_iso, CommentDoc, PostDoc, UserDoc, COLLECTION_POSTS, COLLECTION_USERS};
pub use session::{Identity, Session, Uid};
