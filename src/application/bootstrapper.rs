//! Session-gated application bootstrap.
//!
//! The bootstrapper defers application startup until the first session
//! observation, then starts the shell exactly once and keeps forwarding
//! later snapshots without restarting it.
//!
//! Lifecycle: `Waiting` until the first notification from the session
//! store, then `Started` for the rest of the process. The startup guard
//! is keyed on that flag, never on session content, so rapid-fire
//! notifications cannot double-start the shell.
//!
//! There is deliberately no timeout: if the provider never resolves a
//! session, the shell never starts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::session_store::{SessionStore, SubscriptionHandle};
use crate::domain::session::Session;
use crate::ports::AppShell;

struct Gate {
    shell: Arc<dyn AppShell>,
    started: AtomicBool,
}

impl Gate {
    fn on_session(&self, session: &Session) {
        // Publish first: the shell must never start without a readable
        // session snapshot.
        self.shell.publish_session(session);

        if !self.started.swap(true, Ordering::SeqCst) {
            tracing::info!(
                authenticated = session.is_authenticated(),
                "first session observation received; starting application shell"
            );
            self.shell.start();
        }
    }
}

/// Starts the application shell on the first session observation.
///
/// Constructing it wires the subscription; the value keeps the gate and
/// its session-store subscription alive.
pub struct Bootstrapper {
    gate: Arc<Gate>,
    _subscription: SubscriptionHandle,
}

impl Bootstrapper {
    /// Wires the shell to the session store.
    ///
    /// From this point every session snapshot is published to the shell,
    /// and the first one also triggers `start()`. If the store is
    /// already resolved the shell starts immediately.
    pub fn attach(shell: Arc<dyn AppShell>, store: &SessionStore) -> Self {
        let gate = Arc::new(Gate {
            shell,
            started: AtomicBool::new(false),
        });
        let subscription = {
            let gate = Arc::clone(&gate);
            store.subscribe(move |session| gate.on_session(session))
        };
        Self {
            gate,
            _subscription: subscription,
        }
    }

    /// True once the shell's one-time startup has run.
    pub fn has_started(&self) -> bool {
        self.gate.started.load(Ordering::SeqCst)
    }
}
