//! Ports - Interfaces for the external services this client depends on.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the core and the managed backend. Adapters implement these ports.
//!
//! - `IdentityProvider` - account creation, sign-in and the session
//!   change subscription
//! - `DocumentStore` - per-document CRUD plus atomic array operations
//! - `AppShell` - the surrounding application's mount point and shared
//!   session slot

mod app_shell;
mod document_store;
mod identity_provider;

pub use app_shell::AppShell;
pub use document_store::{Document, DocumentStore, FieldChange, FieldOp, StoreError};
pub use identity_provider::{IdentityProvider, ProviderError, SessionCallback};
