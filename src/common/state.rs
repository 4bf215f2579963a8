// Application state shared across all modules

use std::sync::Arc;

use super::config::AppConfig;
use crate::auth::token::{SessionAuthenticator, SessionTokenIssuer};
use crate::services::{FacebookVerifier, GoogleVerifier, ProviderVerifier};

/// Immutable per-process state. Cloning only bumps reference counts, so
/// concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub google_verifier: Arc<dyn ProviderVerifier>,
    pub facebook_verifier: Arc<dyn ProviderVerifier>,
    pub issuer: Arc<SessionTokenIssuer>,
    pub authenticator: Arc<SessionAuthenticator>,
}

impl AppState {
    /// Wires the production verifiers onto a shared HTTP client
    pub fn new(config: AppConfig, http: reqwest::Client) -> Self {
        let google_verifier = Arc::new(GoogleVerifier::from_config(http.clone(), &config));
        let facebook_verifier = Arc::new(FacebookVerifier::from_config(http, &config));
        Self::with_verifiers(config, google_verifier, facebook_verifier)
    }

    pub fn with_verifiers(
        config: AppConfig,
        google_verifier: Arc<dyn ProviderVerifier>,
        facebook_verifier: Arc<dyn ProviderVerifier>,
    ) -> Self {
        Self {
            issuer: Arc::new(SessionTokenIssuer::from_config(&config)),
            authenticator: Arc::new(SessionAuthenticator::from_config(&config)),
            config: Arc::new(config),
            google_verifier,
            facebook_verifier,
        }
    }
}
