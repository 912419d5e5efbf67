//! Identity provider failure vocabulary and localized auth errors.
//!
//! The provider reports failures as codes from a fixed vocabulary
//! (`auth/email-already-in-use`, `auth/weak-password`, ...). Registration
//! and login translate those codes into one fixed user-facing message per
//! kind and re-raise a single generic `AuthError` carrying that message.
//! Unrecognized codes fall back to a per-operation default message.
//!
//! The session observer and bootstrapper never raise these - they only
//! react to provider-delivered state, which is well-formed by contract.

use thiserror::Error;

/// Provider failure codes this crate recognizes.
pub mod codes {
    pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
}

/// Known identity provider failure kinds, plus a fallback for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    EmailAlreadyInUse,
    InvalidEmail,
    WeakPassword,
    UserNotFound,
    WrongPassword,
    /// Any code outside the fixed vocabulary.
    Unknown,
}

impl AuthErrorKind {
    /// Parses a provider failure code.
    ///
    /// Codes outside the fixed vocabulary map to `Unknown`.
    pub fn from_provider_code(code: &str) -> Self {
        match code {
            codes::EMAIL_ALREADY_IN_USE => Self::EmailAlreadyInUse,
            codes::INVALID_EMAIL => Self::InvalidEmail,
            codes::WEAK_PASSWORD => Self::WeakPassword,
            codes::USER_NOT_FOUND => Self::UserNotFound,
            codes::WRONG_PASSWORD => Self::WrongPassword,
            _ => Self::Unknown,
        }
    }
}

/// A single generic authentication failure carrying a user-facing message.
///
/// Raised by the registration and login handlers after translating the
/// provider's failure code. The message is what the UI shows verbatim.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    /// Translates a failure kind for the registration flow.
    ///
    /// Kinds the registration UI has no specific copy for (wrong password,
    /// user not found) fall through to the registration default.
    pub fn for_registration(kind: AuthErrorKind) -> Self {
        let message = match kind {
            AuthErrorKind::EmailAlreadyInUse => "Este email ya está registrado",
            AuthErrorKind::InvalidEmail => "El email no es válido",
            AuthErrorKind::WeakPassword => "La contraseña debe tener al menos 6 caracteres",
            AuthErrorKind::UserNotFound
            | AuthErrorKind::WrongPassword
            | AuthErrorKind::Unknown => "Error al registrar usuario",
        };
        Self {
            kind,
            message: message.to_string(),
        }
    }

    /// Translates a failure kind for the login flow.
    pub fn for_login(kind: AuthErrorKind) -> Self {
        let message = match kind {
            AuthErrorKind::InvalidEmail => "Email inválido",
            AuthErrorKind::UserNotFound => "Usuario no encontrado",
            AuthErrorKind::WrongPassword => "Contraseña incorrecta",
            AuthErrorKind::EmailAlreadyInUse
            | AuthErrorKind::WeakPassword
            | AuthErrorKind::Unknown => "Error al iniciar sesión",
        };
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse_to_their_kinds() {
        assert_eq!(
            AuthErrorKind::from_provider_code("auth/email-already-in-use"),
            AuthErrorKind::EmailAlreadyInUse
        );
        assert_eq!(
            AuthErrorKind::from_provider_code("auth/invalid-email"),
            AuthErrorKind::InvalidEmail
        );
        assert_eq!(
            AuthErrorKind::from_provider_code("auth/weak-password"),
            AuthErrorKind::WeakPassword
        );
        assert_eq!(
            AuthErrorKind::from_provider_code("auth/user-not-found"),
            AuthErrorKind::UserNotFound
        );
        assert_eq!(
            AuthErrorKind::from_provider_code("auth/wrong-password"),
            AuthErrorKind::WrongPassword
        );
    }

    #[test]
    fn unrecognized_codes_parse_to_unknown() {
        assert_eq!(
            AuthErrorKind::from_provider_code("auth/network-request-failed"),
            AuthErrorKind::Unknown
        );
        assert_eq!(AuthErrorKind::from_provider_code(""), AuthErrorKind::Unknown);
    }

    #[test]
    fn registration_messages_match_the_fixed_copy() {
        assert_eq!(
            AuthError::for_registration(AuthErrorKind::EmailAlreadyInUse).message,
            "Este email ya está registrado"
        );
        assert_eq!(
            AuthError::for_registration(AuthErrorKind::InvalidEmail).message,
            "El email no es válido"
        );
        assert_eq!(
            AuthError::for_registration(AuthErrorKind::WeakPassword).message,
            "La contraseña debe tener al menos 6 caracteres"
        );
        assert_eq!(
            AuthError::for_registration(AuthErrorKind::Unknown).message,
            "Error al registrar usuario"
        );
    }

    #[test]
    fn login_messages_match_the_fixed_copy() {
        assert_eq!(
            AuthError::for_login(AuthErrorKind::InvalidEmail).message,
            "Email inválido"
        );
        assert_eq!(
            AuthError::for_login(AuthErrorKind::UserNotFound).message,
            "Usuario no encontrado"
        );
        assert_eq!(
            AuthError::for_login(AuthErrorKind::WrongPassword).message,
            "Contraseña incorrecta"
        );
        assert_eq!(
            AuthError::for_login(AuthErrorKind::Unknown).message,
            "Error al iniciar sesión"
        );
    }

    #[test]
    fn auth_error_displays_the_user_message() {
        let err = AuthError::for_login(AuthErrorKind::WrongPassword);
        assert_eq!(format!("{}", err), "Contraseña incorrecta");
    }
}
