//! Application shell port.
//!
//! The shell is the surrounding application (UI, router) this core
//! bootstraps. It exposes a shared read location for the current session
//! and a single `start()` entry point. Only the bootstrapper calls this
//! port, and it calls `start()` at most once per process.

use crate::domain::session::Session;

/// The surrounding application's mount point and shared session slot.
///
/// # Contract
///
/// - `publish_session` is called before `start()` and again on every
///   later session change, always from non-overlapping callback
///   invocations
/// - `start()` is called exactly once, after the first published
///   session; failures inside it are not retried by the caller
pub trait AppShell: Send + Sync {
    /// Makes the session snapshot readable by the rest of the application.
    fn publish_session(&self, session: &Session);

    /// Mounts the application. Called exactly once.
    fn start(&self);
}
