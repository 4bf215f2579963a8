// Error handling types for the API

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

use crate::auth::identity::Provider;

/// API error types
///
/// Client-facing messages are fixed per category. Details that could leak
/// provider responses or signing internals are only logged.
#[derive(Debug)]
pub enum ApiError {
    /// Request body could not be read as the expected JSON
    MalformedRequest,
    /// Provider rejected the credential, was unreachable, or answered garbage
    ProviderVerification(Provider),
    /// Google ID token was minted for a different client
    AudienceMismatch,
    /// Missing, invalid, or expired session token on a protected route
    Unauthenticated { realm: String },
    InternalServer(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MalformedRequest => write!(f, "Bad Request: malformed request body"),
            ApiError::ProviderVerification(provider) => {
                write!(f, "Unauthorized: {} verification failed", provider.display_name())
            }
            ApiError::AudienceMismatch => write!(f, "Unauthorized: token audience mismatch"),
            ApiError::Unauthenticated { .. } => write!(f, "Unauthorized: invalid session"),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest => StatusCode::BAD_REQUEST,
            ApiError::ProviderVerification(_)
            | ApiError::AudienceMismatch
            | ApiError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            ApiError::InternalServer(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ApiError::MalformedRequest => "Invalid request body".to_string(),
            ApiError::ProviderVerification(provider) => {
                format!("Invalid {} token", provider.display_name())
            }
            ApiError::AudienceMismatch => "Token audience mismatch".to_string(),
            ApiError::Unauthenticated { realm } => {
                // Protected routes answer with a bare challenge and no body
                let challenge = format!("Bearer realm=\"{}\"", realm);
                let mut response = status.into_response();
                match HeaderValue::from_str(&challenge) {
                    Ok(value) => {
                        response.headers_mut().insert(WWW_AUTHENTICATE, value);
                    }
                    Err(e) => warn!(error = %e, "Realm is not a valid header value"),
                }
                return response;
            }
            ApiError::InternalServer(msg) => {
                error!(detail = %msg, "Internal server error");
                "Internal server error".to_string()
            }
        };

        let error_response = ErrorResponse {
            error: error_message,
        };

        (status, Json(error_response)).into_response()
    }
}
