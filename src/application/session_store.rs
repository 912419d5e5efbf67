//! Process-wide session state, observed from the identity provider.
//!
//! `SessionStore` owns the single mutable `Session` and fans provider
//! observations out to any number of subscribers. It is the only writer;
//! everything else reads `current()` snapshots or subscribes.
//!
//! Wiring: `attach()` establishes exactly one long-lived subscription to
//! the identity provider for the lifetime of the process. The store never
//! polls and performs no I/O of its own beyond that subscription.
//!
//! Delivery model: provider callbacks arrive as discrete, non-overlapping
//! invocations. `apply` swaps the snapshot in, then invokes listeners in
//! subscription order with the lock released, so a listener may itself
//! read `current()` or subscribe.

use std::sync::{Arc, RwLock, Weak};
use std::sync::atomic::{AtomicBool, Ordering};

use futures::channel::mpsc;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use uuid::Uuid;

use crate::domain::session::{Identity, Session};
use crate::ports::IdentityProvider;

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

struct Inner {
    state: RwLock<State>,
    attached: AtomicBool,
}

struct State {
    session: Session,
    /// Subscription order is delivery order.
    listeners: Vec<(Uuid, Listener)>,
}

impl Inner {
    fn remove_listener(&self, id: Uuid) {
        let mut state = self
            .state
            .write()
            .expect("SessionStore: state lock poisoned");
        state.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

/// Handle returned by [`SessionStore::subscribe`].
///
/// `unsubscribe` stops future notifications to the listener; calling it
/// again is a no-op. Dropping the handle without calling it leaves the
/// subscription alive.
pub struct SubscriptionHandle {
    id: Uuid,
    inner: Weak<Inner>,
}

impl SubscriptionHandle {
    /// Stops future notifications to this listener.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.remove_listener(self.id);
        }
    }
}

/// The process-wide session holder.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Creates a store in the initial unresolved, unauthenticated state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(State {
                    session: Session::unresolved(),
                    listeners: Vec::new(),
                }),
                attached: AtomicBool::new(false),
            }),
        }
    }

    /// Establishes the one long-lived provider subscription.
    ///
    /// Every snapshot the provider emits is applied to this store, in
    /// emission order. A second call is ignored - there is no
    /// re-subscription path.
    pub fn attach(&self, provider: &dyn IdentityProvider) {
        if self.inner.attached.swap(true, Ordering::SeqCst) {
            tracing::warn!("session store already attached to a provider; ignoring");
            return;
        }
        let store = self.clone();
        provider.subscribe_to_session_changes(Box::new(move |identity| store.apply(identity)));
        tracing::debug!("session store attached to identity provider");
    }

    /// The current session snapshot.
    ///
    /// Before the first provider observation this is the unresolved
    /// initial state.
    pub fn current(&self) -> Session {
        self.inner
            .state
            .read()
            .expect("SessionStore: state lock poisoned")
            .session
            .clone()
    }

    /// Registers a listener for session snapshots.
    ///
    /// If the session is already resolved the listener is invoked once
    /// immediately with the current snapshot, and again on every
    /// subsequent change. If not, its first invocation is the first
    /// provider observation.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4();
        let listener: Listener = Arc::new(listener);

        let resolved_snapshot = {
            let mut state = self
                .inner
                .state
                .write()
                .expect("SessionStore: state lock poisoned");
            state.listeners.push((id, Arc::clone(&listener)));
            state.session.is_resolved().then(|| state.session.clone())
        };

        // Immediate delivery happens outside the lock so the listener can
        // read current() or subscribe again.
        if let Some(snapshot) = resolved_snapshot {
            listener(&snapshot);
        }

        SubscriptionHandle {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// A stream view of session snapshots.
    ///
    /// Yields the current snapshot immediately if already resolved, then
    /// every subsequent change. Dropping the stream cancels its
    /// subscription.
    pub fn changes(&self) -> SessionChanges {
        let (tx, rx) = mpsc::unbounded();
        let handle = self.subscribe(move |session| {
            // Receiver gone means the stream was dropped; nothing to do.
            let _ = tx.unbounded_send(session.clone());
        });
        SessionChanges { rx, handle }
    }

    /// Applies one provider observation.
    ///
    /// Resolves the session, replaces the identity, then notifies
    /// listeners in subscription order with the lock released.
    pub(crate) fn apply(&self, identity: Option<Identity>) {
        let session = Session::resolved(identity);
        tracing::debug!(
            authenticated = session.is_authenticated(),
            "session observation applied"
        );

        let listeners: Vec<Listener> = {
            let mut state = self
                .inner
                .state
                .write()
                .expect("SessionStore: state lock poisoned");
            state.session = session.clone();
            state
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };

        for listener in listeners {
            listener(&session);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream of session snapshots from [`SessionStore::changes`].
pub struct SessionChanges {
    rx: mpsc::UnboundedReceiver<Session>,
    handle: SubscriptionHandle,
}

impl Stream for SessionChanges {
    type Item = Session;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

impl Drop for SessionChanges {
    fn drop(&mut self) {
        self.handle.unsubscribe();
    }
}
