//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::{debug, warn};

use crate::common::{safe_email_log, ApiError, AppState};

/// Authenticated user extractor
///
/// Validates the bearer session token and exposes the identity it carries.
/// Any failure rejects the request with a 401 before the handler runs.
#[derive(Debug)]
pub struct AuthedUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state): Extension<AppState> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let unauthenticated = || ApiError::Unauthenticated {
            realm: app_state.config.jwt_realm.clone(),
        };

        let header = match parts.headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) {
            Some(h) => h,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(unauthenticated());
            }
        };

        let token = match bearer_token(header) {
            Some(t) => t,
            None => {
                warn!("Authentication failed: Authorization header is not a bearer token");
                return Err(unauthenticated());
            }
        };

        match app_state.authenticator.validate(token) {
            Ok(identity) => {
                debug!(
                    user_id = %identity.user_id,
                    email = %safe_email_log(&identity.email),
                    "User authentication successful via extractor"
                );
                Ok(AuthedUser {
                    id: identity.user_id,
                    email: identity.email,
                    name: identity.name,
                })
            }
            Err(e) => {
                warn!(error = %e, "Session token validation failed");
                Err(unauthenticated())
            }
        }
    }
}

/// Extracts the token from `Bearer <token>`; the scheme is case-insensitive
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
