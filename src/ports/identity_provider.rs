//! Identity provider port.
//!
//! Contract for the external authentication service. It is
//! provider-agnostic - the production adapter speaks the managed
//! backend's REST surface, and a fake exists for tests.
//!
//! The provider is the single external source of truth for the session:
//! it delivers an unbounded, ordered sequence of session snapshots
//! (identity present or absent) at arbitrary times. This crate
//! establishes exactly one long-lived subscription per process and never
//! polls.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::auth::AuthErrorKind;
use crate::domain::session::Identity;

/// Callback receiving session snapshots from the provider.
///
/// Invocations are discrete and non-overlapping; snapshots arrive in the
/// order the provider emits them.
pub type SessionCallback = Box<dyn Fn(Option<Identity>) + Send + Sync>;

/// A failure reported by the identity provider.
///
/// Carries the provider's failure code verbatim. The fixed vocabulary is
/// in [`crate::domain::auth::codes`]; anything else parses as unknown.
#[derive(Debug, Clone, Error)]
#[error("identity provider rejected the request ({code})")]
pub struct ProviderError {
    code: String,
}

impl ProviderError {
    /// Wraps a provider failure code.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// The raw provider code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The parsed failure kind.
    pub fn kind(&self) -> AuthErrorKind {
        AuthErrorKind::from_provider_code(&self.code)
    }
}

/// External authentication service.
///
/// # Contract
///
/// Implementations must:
/// - Return an opaque [`Identity`] handle on success
/// - Return a [`ProviderError`] carrying a code from the fixed
///   vocabulary (or any other string, treated as unknown) on failure
/// - Deliver session snapshots to every registered callback, in emission
///   order, including one initial snapshot once the persisted session
///   state has been resolved
/// - Reflect successful `create_user` / `sign_in` calls in a subsequent
///   session snapshot
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account from an email and password.
    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, ProviderError>;

    /// Signs in to an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError>;

    /// Sets the display name on an account, returning the updated handle.
    async fn set_display_name(
        &self,
        identity: &Identity,
        name: &str,
    ) -> Result<Identity, ProviderError>;

    /// Registers a callback for session snapshots.
    ///
    /// The subscription lives for the rest of the process; there is no
    /// cleanup path by contract.
    fn subscribe_to_session_changes(&self, callback: SessionCallback);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_exposes_code_and_kind() {
        let err = ProviderError::new("auth/weak-password");
        assert_eq!(err.code(), "auth/weak-password");
        assert_eq!(err.kind(), AuthErrorKind::WeakPassword);
    }

    #[test]
    fn provider_error_with_foreign_code_is_unknown() {
        let err = ProviderError::new("auth/too-many-requests");
        assert_eq!(err.kind(), AuthErrorKind::Unknown);
    }

    #[test]
    fn identity_provider_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn IdentityProvider) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn IdentityProvider>>();
    }
}
