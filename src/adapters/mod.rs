//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the core to the managed backend and to the
//! surrounding application:
//! - `identity` - identity provider adapters (fake, REST)
//! - `store` - document store adapters (in-memory, REST)
//! - `shell` - application shell adapters (recording, console)

pub mod identity;
pub mod shell;
pub mod store;

pub use identity::{FakeIdentityProvider, RestIdentityConfig, RestIdentityProvider};
pub use shell::{ConsoleShell, RecordingShell};
pub use store::{InMemoryDocumentStore, RestDocumentStore, RestStoreConfig};
