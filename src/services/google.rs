// src/services/google.rs
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::verifier::{fetch_json, ProviderVerifier, VerificationError};
use crate::auth::identity::{GoogleClaims, Provider, ProviderClaims};
use crate::common::{safe_token_log, AppConfig};

/// Verifies Google ID tokens through the tokeninfo introspection endpoint
///
/// Docs: https://developers.google.com/identity/sign-in/web/backend-auth
pub struct GoogleVerifier {
    http: Client,
    tokeninfo_url: String,
    expected_audience: Option<String>,
    timeout: Duration,
}

impl GoogleVerifier {
    pub fn new(
        http: Client,
        tokeninfo_url: impl Into<String>,
        expected_audience: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            tokeninfo_url: tokeninfo_url.into(),
            expected_audience: expected_audience.filter(|aud| !aud.trim().is_empty()),
            timeout,
        }
    }

    pub fn from_config(http: Client, config: &AppConfig) -> Self {
        Self::new(
            http,
            config.google_tokeninfo_url.clone(),
            config.expected_google_audience().map(str::to_string),
            config.provider_timeout,
        )
    }

    pub async fn verify_id_token(&self, id_token: &str) -> Result<GoogleClaims, VerificationError> {
        debug!(
            id_token = %safe_token_log(id_token),
            "Initiating Google token validation with tokeninfo endpoint"
        );

        let request = self
            .http
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .timeout(self.timeout);

        let claims: GoogleClaims = fetch_json(request).await?;

        // A token minted for another client is not proof of identity here
        if let Some(expected) = &self.expected_audience {
            if &claims.audience != expected {
                warn!(
                    token_audience = %claims.audience,
                    expected_client_id = %expected,
                    "Google token audience validation failed - rejecting token"
                );
                return Err(VerificationError::AudienceMismatch {
                    actual: claims.audience,
                });
            }
        }

        debug!(
            provider_id = %claims.subject_id,
            issuer = %claims.issuer,
            "Google token validation successful"
        );
        Ok(claims)
    }
}

#[async_trait]
impl ProviderVerifier for GoogleVerifier {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    async fn verify(&self, credential: &str) -> Result<ProviderClaims, VerificationError> {
        self.verify_id_token(credential)
            .await
            .map(ProviderClaims::Google)
    }
}
