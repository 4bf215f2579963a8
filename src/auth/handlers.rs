//! Authentication handlers

use axum::extract::{rejection::JsonRejection, Extension, Json};
use tracing::warn;

use super::extractors::AuthedUser;
use super::flow::{exchange_credential, AuthStage};
use super::models::{AuthResponse, FacebookAuthRequest, GoogleAuthRequest, UserDto};
use crate::common::{ApiError, AppState};

/// Folds every body rejection (bad JSON, wrong content type, missing field)
/// into the single malformed-request response
fn malformed_body(rejection: JsonRejection) -> ApiError {
    warn!(
        stage = %AuthStage::ReceivedCredential,
        next = %AuthStage::Rejected,
        error = %rejection.body_text(),
        "Rejecting login request with malformed body"
    );
    ApiError::MalformedRequest
}

/// POST /auth/google
/// Exchanges a Google ID token for a session token
///
/// # Request Body
/// ```json
/// { "idToken": "<google id token>" }
/// ```
///
/// # Response
/// ```json
/// {
///   "token": "<session token>",
///   "user": { "id": "google_<sub>", "name": "...", "email": "...", "photoUrl": "..." }
/// }
/// ```
pub async fn google_auth(
    Extension(state): Extension<AppState>,
    payload: Result<Json<GoogleAuthRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(request) = payload.map_err(malformed_body)?;

    let session =
        exchange_credential(state.google_verifier.as_ref(), &state.issuer, &request.id_token)
            .await?;

    Ok(Json(session.into()))
}

/// POST /auth/facebook
/// Exchanges a Facebook access token for a session token
///
/// # Request Body
/// ```json
/// { "accessToken": "<facebook access token>" }
/// ```
///
/// The response has the same shape as `/auth/google`, without `photoUrl`.
pub async fn facebook_auth(
    Extension(state): Extension<AppState>,
    payload: Result<Json<FacebookAuthRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(request) = payload.map_err(malformed_body)?;

    let session = exchange_credential(
        state.facebook_verifier.as_ref(),
        &state.issuer,
        &request.access_token,
    )
    .await?;

    Ok(Json(session.into()))
}

/// GET /auth/me
/// Returns the identity carried by the bearer session token
///
/// # Response
/// ```json
/// { "id": "...", "name": "...", "email": "..." }
/// ```
pub async fn me_handler(authed: AuthedUser) -> Json<UserDto> {
    Json(UserDto {
        id: authed.id,
        name: authed.name,
        email: authed.email,
        photo_url: None,
    })
}
