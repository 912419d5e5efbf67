//! Demo binary: wires the REST adapters, the session observer and the
//! session-gated bootstrapper with a console shell, then waits.
//!
//! The shell "starts" (a log line) once the provider resolves the first
//! session and keeps logging every later session change until Ctrl-C.

use std::error::Error;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use travelshare_core::adapters::{ConsoleShell, RestIdentityConfig, RestIdentityProvider};
use travelshare_core::application::{Bootstrapper, SessionStore};
use travelshare_core::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;
    tracing::info!(project_id = %config.backend.project_id, "configuration loaded");

    let provider = Arc::new(RestIdentityProvider::new(
        RestIdentityConfig::new(config.backend.api_key.expose_secret().clone())
            .with_base_url(config.backend.identity_base_url.clone())
            .with_timeout(config.backend.request_timeout()),
    )?);

    let store = SessionStore::new();
    let _bootstrapper = Bootstrapper::attach(Arc::new(ConsoleShell::new()), &store);
    store.attach(provider.as_ref());

    tracing::info!("waiting for session changes; press Ctrl-C to exit");
    tokio::signal::ctrl_c().await?;
    Ok(())
}
