// src/services/verifier.rs
//! Provider verification seam
//!
//! Each identity provider gets one `ProviderVerifier` implementation that asks
//! the provider itself whether a credential is genuine. Adding a provider means
//! adding an implementation, not another branch in the login flow.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::auth::identity::{Provider, ProviderClaims};
use crate::common::ApiError;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("provider did not answer in time")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("provider answered with status {0}")]
    Status(StatusCode),

    #[error("unparsable provider payload: {0}")]
    Payload(String),

    #[error("token audience {actual:?} does not match the configured client id")]
    AudienceMismatch { actual: String },
}

impl VerificationError {
    /// Every verification failure is a client-actionable 401, never a 5xx
    pub fn into_api_error(self, provider: Provider) -> ApiError {
        match self {
            VerificationError::AudienceMismatch { .. } => ApiError::AudienceMismatch,
            _ => ApiError::ProviderVerification(provider),
        }
    }
}

impl From<reqwest::Error> for VerificationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            VerificationError::Timeout
        } else {
            VerificationError::Request(e)
        }
    }
}

/// Confirms a provider-issued credential and returns its normalized claims
#[async_trait]
pub trait ProviderVerifier: Send + Sync {
    fn provider(&self) -> Provider;

    async fn verify(&self, credential: &str) -> Result<ProviderClaims, VerificationError>;
}

/// Shared outbound client. No retries: a provider outage surfaces as a 401.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}

/// Sends the request and parses a 2xx JSON body
pub(crate) async fn fetch_json<T>(request: RequestBuilder) -> Result<T, VerificationError>
where
    T: DeserializeOwned,
{
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(VerificationError::Status(status));
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| VerificationError::Payload(e.to_string()))
}
