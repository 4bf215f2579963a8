//! Session token issuance and validation
//!
//! Session tokens are HS256 JWTs carrying `iss`, `aud`, `userId`, `email`,
//! `name` and `exp`. Nothing is stored server-side: a token is valid until
//! its `exp` passes, across restarts, and there is no revocation list.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::Error as JwtError, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};

use super::models::SessionClaims;
use crate::common::config::{AppConfig, SESSION_TTL_SECS};

/// Identity recovered from a valid session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

/// Signs session tokens with the process-wide key
#[derive(Clone)]
pub struct SessionTokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
    ttl_secs: i64,
}

impl SessionTokenIssuer {
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            ttl_secs: SESSION_TTL_SECS,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, &config.jwt_issuer, &config.jwt_audience)
    }

    /// Issues a token expiring 30 days from now
    pub fn issue(&self, user_id: &str, email: &str, name: &str) -> Result<String, JwtError> {
        self.issue_at(user_id, email, name, Utc::now().timestamp())
    }

    /// Issues a token as if minted at `issued_at` (seconds since the epoch)
    pub fn issue_at(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
        issued_at: i64,
    ) -> Result<String, JwtError> {
        let claims = SessionClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            user_id: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            exp: issued_at + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }
}

/// Validates bearer tokens on protected routes. Holds no session state.
#[derive(Clone)]
pub struct SessionAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionAuthenticator {
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, &config.jwt_issuer, &config.jwt_audience)
    }

    /// Checks signature, issuer, audience and expiry
    pub fn validate(&self, token: &str) -> Result<SessionIdentity, JwtError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        Ok(SessionIdentity {
            user_id: claims.user_id,
            email: claims.email,
            name: claims.name,
        })
    }
}
