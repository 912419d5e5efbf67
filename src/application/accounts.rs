//! RegisterUser / LoginUser - account command handlers.
//!
//! Pure passthroughs to the identity provider plus, for registration,
//! the user's profile document. Provider failure codes are translated to
//! the fixed user-facing messages here; nothing is retried.

use std::sync::Arc;

use crate::domain::auth::{AuthError, AuthErrorKind};
use crate::domain::documents::{now_iso, UserDoc, COLLECTION_USERS};
use crate::domain::session::Identity;
use crate::ports::{DocumentStore, IdentityProvider};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Handler for registration.
///
/// Creates the account, sets the display name, then writes the
/// `users/{uid}` profile document. A provider failure aborts before any
/// document is written.
pub struct RegisterUserHandler {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn DocumentStore>,
}

impl RegisterUserHandler {
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self { provider, store }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<Identity, AuthError> {
        let identity = self
            .provider
            .create_user(&cmd.email, &cmd.password)
            .await
            .map_err(|err| {
                tracing::warn!(code = err.code(), "registration rejected by provider");
                AuthError::for_registration(err.kind())
            })?;

        let identity = self
            .provider
            .set_display_name(&identity, &cmd.name)
            .await
            .map_err(|err| AuthError::for_registration(err.kind()))?;

        let now = now_iso();
        let profile = UserDoc {
            name: cmd.name,
            email: cmd.email,
            created_at: now.clone(),
            updated_at: now,
        };
        let fields = match serde_json::to_value(&profile) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => return Err(AuthError::for_registration(AuthErrorKind::Unknown)),
        };
        self.store
            .set(COLLECTION_USERS, identity.uid.as_str(), fields)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "profile document write failed after account creation");
                AuthError::for_registration(AuthErrorKind::Unknown)
            })?;

        tracing::info!(uid = %identity.uid, "account registered");
        Ok(identity)
    }
}

/// Command to sign in to an existing account.
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

/// Handler for login.
pub struct LoginUserHandler {
    provider: Arc<dyn IdentityProvider>,
}

impl LoginUserHandler {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, cmd: LoginUserCommand) -> Result<Identity, AuthError> {
        let identity = self
            .provider
            .sign_in(&cmd.email, &cmd.password)
            .await
            .map_err(|err| {
                tracing::warn!(code = err.code(), "login rejected by provider");
                AuthError::for_login(err.kind())
            })?;

        tracing::info!(uid = %identity.uid, "user signed in");
        Ok(identity)
    }
}
