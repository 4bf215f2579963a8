// src/services/facebook.rs
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::verifier::{fetch_json, ProviderVerifier, VerificationError};
use crate::auth::identity::{FacebookClaims, Provider, ProviderClaims};
use crate::common::{safe_token_log, AppConfig};

const PROFILE_FIELDS: &str = "id,name,email";

/// Verifies Facebook access tokens by calling Graph `/me` with them
pub struct FacebookVerifier {
    http: Client,
    graph_url: String,
    timeout: Duration,
}

impl FacebookVerifier {
    pub fn new(http: Client, graph_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            graph_url: graph_url.into(),
            timeout,
        }
    }

    pub fn from_config(http: Client, config: &AppConfig) -> Self {
        Self::new(
            http,
            config.facebook_graph_url.clone(),
            config.provider_timeout,
        )
    }

    pub async fn verify_access_token(
        &self,
        access_token: &str,
    ) -> Result<FacebookClaims, VerificationError> {
        debug!(
            access_token = %safe_token_log(access_token),
            "Fetching Facebook profile with access token"
        );

        let request = self
            .http
            .get(&self.graph_url)
            .query(&[("access_token", access_token), ("fields", PROFILE_FIELDS)])
            .timeout(self.timeout);

        let claims: FacebookClaims = fetch_json(request).await?;

        debug!(
            provider_id = %claims.provider_id,
            has_email = claims.email.is_some(),
            "Facebook token validation successful"
        );
        Ok(claims)
    }
}

#[async_trait]
impl ProviderVerifier for FacebookVerifier {
    fn provider(&self) -> Provider {
        Provider::Facebook
    }

    async fn verify(&self, credential: &str) -> Result<ProviderClaims, VerificationError> {
        self.verify_access_token(credential)
            .await
            .map(ProviderClaims::Facebook)
    }
}
