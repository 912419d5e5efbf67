//! Console shell for the demo binary.

use crate::domain::session::Session;
use crate::ports::AppShell;

/// Shell that logs session changes instead of mounting a UI.
#[derive(Debug, Default)]
pub struct ConsoleShell;

impl ConsoleShell {
    pub fn new() -> Self {
        Self
    }
}

impl AppShell for ConsoleShell {
    fn publish_session(&self, session: &Session) {
        match session.identity() {
            Some(identity) => tracing::info!(
                uid = %identity.uid,
                user = identity.display_name_or_email(),
                "session updated: authenticated"
            ),
            None => tracing::info!("session updated: anonymous"),
        }
    }

    fn start(&self) {
        tracing::info!("application shell started");
    }
}
