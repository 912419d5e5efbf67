//! Identity provider adapters.
//!
//! - `fake` - in-memory provider for tests and local runs
//! - `rest` - the managed backend's token REST endpoints

mod fake;
mod rest;

pub use fake::FakeIdentityProvider;
pub use rest::{RestIdentityConfig, RestIdentityProvider};
