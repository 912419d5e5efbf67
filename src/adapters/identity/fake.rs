//! In-memory identity provider for tests and local runs.
//!
//! Reproduces the managed backend's observable behavior without a
//! network: accounts live in a map, failures carry the real provider
//! codes, and session snapshots are emitted to subscribers on sign-up
//! and sign-in. Resolution of the initial (persisted) session is under
//! test control via [`FakeIdentityProvider::emit`].

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::auth::codes;
use crate::domain::session::{Identity, Uid};
use crate::ports::{IdentityProvider, ProviderError, SessionCallback};

struct Account {
    password: String,
    identity: Identity,
}

/// Fake provider backed by an account map.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Acceptable for test
/// code; production uses the REST adapter.
#[derive(Default)]
pub struct FakeIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    callbacks: RwLock<Vec<SessionCallback>>,
    forced_error: RwLock<Option<String>>,
}

impl FakeIdentityProvider {
    /// Creates a provider with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pre-registered account.
    pub fn with_user(self, email: &str, password: &str, display_name: Option<&str>) -> Self {
        let identity = Identity::new(
            Uid::new(Uuid::new_v4().to_string()),
            email,
            display_name.map(str::to_string),
        );
        self.accounts.write().unwrap().insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                identity,
            },
        );
        self
    }

    /// Forces the next operations to fail with the given provider code.
    pub fn force_error(&self, code: &str) {
        *self.forced_error.write().unwrap() = Some(code.to_string());
    }

    /// Clears a forced error.
    pub fn clear_error(&self) {
        *self.forced_error.write().unwrap() = None;
    }

    /// Emits a session snapshot to every subscriber, in emission order.
    ///
    /// Tests use this for the initial persisted-session resolution and
    /// for sign-outs.
    pub fn emit(&self, identity: Option<Identity>) {
        let callbacks = self.callbacks.read().unwrap();
        for callback in callbacks.iter() {
            callback(identity.clone());
        }
    }

    /// The registered identity for an email, if any.
    pub fn identity_for(&self, email: &str) -> Option<Identity> {
        self.accounts
            .read()
            .unwrap()
            .get(email)
            .map(|account| account.identity.clone())
    }

    fn check_forced_error(&self) -> Result<(), ProviderError> {
        match self.forced_error.read().unwrap().as_deref() {
            Some(code) => Err(ProviderError::new(code)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        self.check_forced_error()?;
        if !email.contains('@') {
            return Err(ProviderError::new(codes::INVALID_EMAIL));
        }
        if password.chars().count() < 6 {
            return Err(ProviderError::new(codes::WEAK_PASSWORD));
        }

        let identity = {
            let mut accounts = self.accounts.write().unwrap();
            if accounts.contains_key(email) {
                return Err(ProviderError::new(codes::EMAIL_ALREADY_IN_USE));
            }
            let identity = Identity::new(Uid::new(Uuid::new_v4().to_string()), email, None);
            accounts.insert(
                email.to_string(),
                Account {
                    password: password.to_string(),
                    identity: identity.clone(),
                },
            );
            identity
        };

        self.emit(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        self.check_forced_error()?;
        let identity = {
            let accounts = self.accounts.read().unwrap();
            let account = accounts
                .get(email)
                .ok_or_else(|| ProviderError::new(codes::USER_NOT_FOUND))?;
            if account.password != password {
                return Err(ProviderError::new(codes::WRONG_PASSWORD));
            }
            account.identity.clone()
        };

        self.emit(Some(identity.clone()));
        Ok(identity)
    }

    async fn set_display_name(
        &self,
        identity: &Identity,
        name: &str,
    ) -> Result<Identity, ProviderError> {
        self.check_forced_error()?;
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts
            .values_mut()
            .find(|account| account.identity.uid == identity.uid)
            .ok_or_else(|| ProviderError::new(codes::USER_NOT_FOUND))?;
        account.identity.display_name = Some(name.to_string());
        Ok(account.identity.clone())
    }

    fn subscribe_to_session_changes(&self, callback: SessionCallback) {
        self.callbacks.write().unwrap().push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::AuthErrorKind;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn create_user_registers_and_emits_a_snapshot() {
        let provider = FakeIdentityProvider::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_callback = Arc::clone(&seen);
        provider.subscribe_to_session_changes(Box::new(move |identity| {
            seen_by_callback.lock().unwrap().push(identity.is_some());
        }));

        let identity = provider
            .create_user("ana@example.com", "secreta")
            .await
            .unwrap();
        assert_eq!(identity.email, "ana@example.com");
        assert_eq!(*seen.lock().unwrap(), vec![true]);
    }

    #[tokio::test]
    async fn create_user_rejects_duplicates_weak_passwords_and_bad_emails() {
        let provider = FakeIdentityProvider::new().with_user("ana@example.com", "secreta", None);

        let err = provider
            .create_user("ana@example.com", "secreta")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::EmailAlreadyInUse);

        let err = provider.create_user("bob@example.com", "corta").await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::WeakPassword);

        let err = provider.create_user("sin-arroba", "secreta").await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::InvalidEmail);
    }

    #[tokio::test]
    async fn sign_in_validates_credentials() {
        let provider = FakeIdentityProvider::new().with_user("ana@example.com", "secreta", None);

        assert!(provider.sign_in("ana@example.com", "secreta").await.is_ok());

        let err = provider.sign_in("nadie@example.com", "x").await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::UserNotFound);

        let err = provider
            .sign_in("ana@example.com", "incorrecta")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::WrongPassword);
    }

    #[tokio::test]
    async fn set_display_name_updates_the_stored_identity() {
        let provider = FakeIdentityProvider::new().with_user("ana@example.com", "secreta", None);
        let identity = provider.identity_for("ana@example.com").unwrap();

        let updated = provider.set_display_name(&identity, "Ana").await.unwrap();
        assert_eq!(updated.display_name.as_deref(), Some("Ana"));
        assert_eq!(
            provider
                .identity_for("ana@example.com")
                .unwrap()
                .display_name
                .as_deref(),
            Some("Ana")
        );
    }

    #[tokio::test]
    async fn forced_errors_take_precedence() {
        let provider = FakeIdentityProvider::new().with_user("ana@example.com", "secreta", None);
        provider.force_error("auth/network-request-failed");

        let err = provider.sign_in("ana@example.com", "secreta").await.unwrap_err();
        assert_eq!(err.code(), "auth/network-request-failed");

        provider.clear_error();
        assert!(provider.sign_in("ana@example.com", "secreta").await.is_ok());
    }

    #[test]
    fn emit_fans_out_to_every_subscriber() {
        let provider = FakeIdentityProvider::new();
        let count = Arc::new(Mutex::new(0));
        for _ in 0..3 {
            let count = Arc::clone(&count);
            provider.subscribe_to_session_changes(Box::new(move |_| {
                *count.lock().unwrap() += 1;
            }));
        }
        provider.emit(None);
        assert_eq!(*count.lock().unwrap(), 3);
    }
}
