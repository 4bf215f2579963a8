//! Credential exchange shared by every provider
//!
//! A login moves `ReceivedCredential -> Verifying -> Mapping -> Issuing ->
//! Responded`, and can drop to `Rejected` from any stage. Only the verifier
//! differs between providers.

use std::fmt;
use tracing::{debug, info, warn};

use super::identity::{map_identity, InternalIdentity};
use super::models::{AuthResponse, UserDto};
use super::token::SessionTokenIssuer;
use crate::common::{safe_email_log, ApiError};
use crate::services::monitoring::capture_internal_error;
use crate::services::ProviderVerifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    ReceivedCredential,
    Verifying,
    Mapping,
    Issuing,
    Responded,
    Rejected,
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthStage::ReceivedCredential => "received_credential",
            AuthStage::Verifying => "verifying",
            AuthStage::Mapping => "mapping",
            AuthStage::Issuing => "issuing",
            AuthStage::Responded => "responded",
            AuthStage::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// A freshly minted session for a verified identity
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub identity: InternalIdentity,
    pub token: String,
}

impl From<IssuedSession> for AuthResponse {
    fn from(session: IssuedSession) -> Self {
        Self {
            token: session.token,
            user: UserDto::from(session.identity),
        }
    }
}

/// Result of one login attempt; expected failures are values, not panics
pub type AuthOutcome = Result<IssuedSession, ApiError>;

/// Verifies a provider credential, maps it to an internal identity and
/// issues a session token for it.
pub async fn exchange_credential(
    verifier: &dyn ProviderVerifier,
    issuer: &SessionTokenIssuer,
    credential: &str,
) -> AuthOutcome {
    let provider = verifier.provider();
    info!(provider = %provider, "🔐 Received auth request");
    debug!(provider = %provider, stage = %AuthStage::Verifying, "Verifying provider credential");

    let claims = verifier.verify(credential).await.map_err(|e| {
        warn!(
            provider = %provider,
            stage = %AuthStage::Verifying,
            next = %AuthStage::Rejected,
            error = %e,
            "Provider verification failed"
        );
        e.into_api_error(provider)
    })?;

    debug!(provider = %provider, stage = %AuthStage::Mapping, "Mapping provider claims");
    let identity = map_identity(&claims);

    debug!(
        provider = %provider,
        stage = %AuthStage::Issuing,
        user_id = %identity.user_id,
        "Issuing session token"
    );
    let token = issuer
        .issue(&identity.user_id, &identity.email, &identity.name)
        .map_err(|e| {
            capture_internal_error(&e, "session token signing");
            ApiError::InternalServer("session token signing failed".to_string())
        })?;

    info!(
        provider = %provider,
        stage = %AuthStage::Responded,
        user_id = %identity.user_id,
        email = %safe_email_log(&identity.email),
        "User authentication successful"
    );

    Ok(IssuedSession { identity, token })
}
