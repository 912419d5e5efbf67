//! REST identity provider - the managed backend's token endpoints.
//!
//! Speaks the backend's password-account REST surface:
//! `accounts:signUp`, `accounts:signInWithPassword` and
//! `accounts:update`, authenticated with the project API key. Backend
//! error messages (`EMAIL_EXISTS`, `INVALID_PASSWORD`, ...) are mapped
//! onto the `auth/...` code vocabulary the rest of the crate speaks.
//!
//! Session subscription: the adapter keeps the last known identity and
//! resolves subscribers once on registration (anonymous unless a
//! sign-in already happened), then again after every successful
//! sign-up or sign-in.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;

use crate::domain::auth::codes;
use crate::domain::session::{Identity, Uid};
use crate::ports::{IdentityProvider, ProviderError, SessionCallback};

/// Configuration for the REST identity provider.
#[derive(Debug, Clone)]
pub struct RestIdentityConfig {
    /// Project API key sent as the `key` query parameter.
    api_key: Secret<String>,
    /// Base URL of the identity endpoints.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl RestIdentityConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://identitytoolkit.googleapis.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL (e.g. a local emulator).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Identity provider over the backend's REST surface.
pub struct RestIdentityProvider {
    config: RestIdentityConfig,
    client: Client,
    callbacks: RwLock<Vec<SessionCallback>>,
    current: RwLock<Option<Identity>>,
    /// Token for the signed-in account, needed by `accounts:update`.
    id_token: RwLock<Option<String>>,
}

impl RestIdentityProvider {
    /// Creates a provider with the given configuration.
    pub fn new(config: RestIdentityConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ProviderError::new(format!("auth/internal-error: {err}")))?;
        Ok(Self {
            config,
            client,
            callbacks: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            id_token: RwLock::new(None),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.config.base_url,
            action,
            self.config.api_key()
        )
    }

    /// Maps a backend error message onto the provider code vocabulary.
    ///
    /// The backend sometimes suffixes messages (e.g. `WEAK_PASSWORD :
    /// Password should be at least 6 characters`), so matching is on the
    /// leading token.
    fn map_error_message(message: &str) -> ProviderError {
        let leading = message.split_whitespace().next().unwrap_or("");
        let code = match leading {
            "EMAIL_EXISTS" => codes::EMAIL_ALREADY_IN_USE,
            "INVALID_EMAIL" | "MISSING_EMAIL" => codes::INVALID_EMAIL,
            "WEAK_PASSWORD" | "MISSING_PASSWORD" => codes::WEAK_PASSWORD,
            "EMAIL_NOT_FOUND" => codes::USER_NOT_FOUND,
            "INVALID_PASSWORD" => codes::WRONG_PASSWORD,
            other => return ProviderError::new(format!("auth/{}", other.to_lowercase())),
        };
        ProviderError::new(code)
    }

    async fn post_account_request(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<AccountResponse, ProviderError> {
        let response = self
            .client
            .post(self.endpoint(action))
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, action, "identity request failed to send");
                ProviderError::new("auth/network-request-failed")
            })?;

        if response.status().is_success() {
            response
                .json::<AccountResponse>()
                .await
                .map_err(|_| ProviderError::new("auth/network-request-failed"))
        } else {
            let error: ErrorResponse = response
                .json()
                .await
                .map_err(|_| ProviderError::new("auth/network-request-failed"))?;
            Err(Self::map_error_message(&error.error.message))
        }
    }

    fn remember(&self, identity: &Identity, id_token: String) {
        *self.current.write().expect("RestIdentityProvider: lock poisoned") =
            Some(identity.clone());
        *self.id_token.write().expect("RestIdentityProvider: lock poisoned") = Some(id_token);
    }

    fn notify(&self, identity: Option<Identity>) {
        let callbacks = self
            .callbacks
            .read()
            .expect("RestIdentityProvider: lock poisoned");
        for callback in callbacks.iter() {
            callback(identity.clone());
        }
    }
}

impl From<AccountResponse> for Identity {
    fn from(account: AccountResponse) -> Self {
        Identity::new(Uid::new(account.local_id), account.email, account.display_name)
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        let account = self
            .post_account_request(
                "signUp",
                json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        let token = account.id_token.clone();
        let identity = Identity::from(account);
        self.remember(&identity, token);
        self.notify(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        let account = self
            .post_account_request(
                "signInWithPassword",
                json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        let token = account.id_token.clone();
        let identity = Identity::from(account);
        self.remember(&identity, token);
        self.notify(Some(identity.clone()));
        Ok(identity)
    }

    async fn set_display_name(
        &self,
        identity: &Identity,
        name: &str,
    ) -> Result<Identity, ProviderError> {
        let token = self
            .id_token
            .read()
            .expect("RestIdentityProvider: lock poisoned")
            .clone()
            .ok_or_else(|| ProviderError::new(codes::USER_NOT_FOUND))?;

        let account = self
            .post_account_request(
                "update",
                json!({
                    "idToken": token,
                    "displayName": name,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        let new_token = account.id_token.clone();
        let mut updated = Identity::from(account);
        // Some backends omit the email on update responses.
        if updated.email.is_empty() {
            updated.email = identity.email.clone();
        }
        self.remember(&updated, new_token);
        Ok(updated)
    }

    fn subscribe_to_session_changes(&self, callback: SessionCallback) {
        let snapshot = self
            .current
            .read()
            .expect("RestIdentityProvider: lock poisoned")
            .clone();
        // Resolve the new subscriber immediately: anonymous unless a
        // sign-in already happened in this process.
        callback(snapshot);
        self.callbacks
            .write()
            .expect("RestIdentityProvider: lock poisoned")
            .push(callback);
    }
}
