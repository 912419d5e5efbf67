//! Managed backend configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Managed backend configuration (identity provider + document store)
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Project identifier in the managed backend
    pub project_id: String,

    /// Project API key
    pub api_key: Secret<String>,

    /// Base URL for the identity endpoints
    #[serde(default = "default_identity_base_url")]
    pub identity_base_url: String,

    /// Base URL for the document endpoints
    #[serde(default = "default_store_base_url")]
    pub store_base_url: String,

    /// Request timeout in seconds for both services
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    /// Get the request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate backend configuration
    ///
    /// Base URLs must be HTTPS unless they point at localhost (a local
    /// emulator).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_id.is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND_PROJECT_ID"));
        }
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND_API_KEY"));
        }

        for url in [&self.identity_base_url, &self.store_base_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidBaseUrl);
            }
            let is_local = url.contains("://localhost") || url.contains("://127.0.0.1");
            if url.starts_with("http://") && !is_local {
                return Err(ValidationError::BaseUrlMustBeHttps);
            }
        }

        Ok(())
    }
}

fn default_identity_base_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_store_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
