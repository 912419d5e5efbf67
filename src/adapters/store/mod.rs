//! Document store adapters.
//!
//! - `in_memory` - HashMap-backed store for tests
//! - `rest` - the managed backend's document REST API

mod in_memory;
mod rest;

pub use in_memory::InMemoryDocumentStore;
pub use rest::{RestDocumentStore, RestStoreConfig};
