//! Recording shell for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::domain::session::Session;
use crate::ports::AppShell;

/// Shell that records every call for test assertions.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Acceptable for test
/// code.
#[derive(Default)]
pub struct RecordingShell {
    published: RwLock<Vec<Session>>,
    starts: AtomicUsize,
    /// Sessions published before the first start() call.
    published_before_start: AtomicUsize,
}

impl RecordingShell {
    /// Creates an empty recording shell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `start()` ran.
    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    /// Every session published so far, in order.
    pub fn published_sessions(&self) -> Vec<Session> {
        self.published
            .read()
            .expect("RecordingShell: lock poisoned")
            .clone()
    }

    /// The most recently published session.
    pub fn last_session(&self) -> Option<Session> {
        self.published
            .read()
            .expect("RecordingShell: lock poisoned")
            .last()
            .cloned()
    }

    /// True if a session was published before `start()` first ran.
    pub fn session_was_published_before_start(&self) -> bool {
        self.published_before_start.load(Ordering::SeqCst) > 0
    }
}

impl AppShell for RecordingShell {
    fn publish_session(&self, session: &Session) {
        if self.starts.load(Ordering::SeqCst) == 0 {
            self.published_before_start.fetch_add(1, Ordering::SeqCst);
        }
        self.published
            .write()
            .expect("RecordingShell: lock poisoned")
            .push(session.clone());
    }

    fn start(&self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_publishes_and_starts_in_order() {
        let shell = RecordingShell::new();
        shell.publish_session(&Session::resolved(None));
        shell.start();
        shell.publish_session(&Session::resolved(None));

        assert_eq!(shell.start_count(), 1);
        assert_eq!(shell.published_sessions().len(), 2);
        assert!(shell.session_was_published_before_start());
    }

    #[test]
    fn start_before_publish_is_visible() {
        let shell = RecordingShell::new();
        shell.start();
        shell.publish_session(&Session::resolved(None));
        assert!(!shell.session_was_published_before_start());
    }
}
