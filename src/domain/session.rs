//! Session types for the domain layer.
//!
//! The `Session` is the process's current view of who (if anyone) is
//! authenticated. It is populated exclusively from identity provider
//! observations - no component constructs an authenticated session by hand.
//!
//! # Design Decisions
//!
//! - `Session` keeps its fields private so `is_authenticated()` is always
//!   derived from identity presence and can never drift out of sync
//! - `resolved` is monotonic: it becomes true on the first provider
//!   observation and never reverts for the lifetime of the process
//! - `Identity` is an opaque handle issued by the provider; this crate
//!   never validates or mints identities itself

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique user identifier issued by the identity provider.
///
/// Opaque by contract - the provider owns the format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    /// Wraps a provider-issued identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authenticated user handle as reported by the identity provider.
///
/// This is a **domain type** with no provider dependencies. Any managed
/// identity backend can populate it via the `IdentityProvider` port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The unique user identifier from the provider.
    pub uid: Uid,

    /// Email address the account was created with.
    pub email: String,

    /// Display name, if one has been set on the account.
    pub display_name: Option<String>,
}

impl Identity {
    /// Creates an identity handle from provider-reported fields.
    pub fn new(uid: Uid, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            uid,
            email: email.into(),
            display_name,
        }
    }

    /// Returns the display name, or the email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// The process's current view of who (if anyone) is authenticated.
///
/// Starts unresolved and anonymous; the first provider observation
/// resolves it. Only the session store mutates sessions - everything
/// else reads snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
    resolved: bool,
}

impl Session {
    /// The initial state: unresolved, unauthenticated.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// A session resolved by a provider observation.
    pub fn resolved(identity: Option<Identity>) -> Self {
        Self {
            identity,
            resolved: true,
        }
    }

    /// The current identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// True exactly when an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// True once the first provider observation has arrived.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_identity() -> Identity {
        Identity::new(Uid::new("u1"), "ana@example.com", Some("Ana".to_string()))
    }

    #[test]
    fn unresolved_session_is_anonymous_and_unresolved() {
        let session = Session::unresolved();
        assert!(!session.is_resolved());
        assert!(!session.is_authenticated());
        assert!(session.identity().is_none());
    }

    #[test]
    fn resolved_session_with_identity_is_authenticated() {
        let session = Session::resolved(Some(test_identity()));
        assert!(session.is_resolved());
        assert!(session.is_authenticated());
        assert_eq!(session.identity().unwrap().uid.as_str(), "u1");
    }

    #[test]
    fn resolved_session_without_identity_is_anonymous() {
        let session = Session::resolved(None);
        assert!(session.is_resolved());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn is_authenticated_is_derived_from_identity_presence() {
        assert_eq!(
            Session::resolved(Some(test_identity())).is_authenticated(),
            Session::resolved(Some(test_identity())).identity().is_some()
        );
        assert_eq!(
            Session::resolved(None).is_authenticated(),
            Session::resolved(None).identity().is_some()
        );
    }

    #[test]
    fn identity_display_name_or_email_falls_back_to_email() {
        let named = test_identity();
        assert_eq!(named.display_name_or_email(), "Ana");

        let unnamed = Identity::new(Uid::new("u2"), "bob@example.com", None);
        assert_eq!(unnamed.display_name_or_email(), "bob@example.com");
    }
}
