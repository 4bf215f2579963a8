//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /auth/google` - Exchange a Google ID token for a session token
/// - `POST /auth/facebook` - Exchange a Facebook access token for a session token
/// - `GET /auth/me` - Identity of the bearer session token
pub fn auth_routes() -> Router {
    Router::new()
        .route("/auth/google", post(handlers::google_auth))
        .route("/auth/facebook", post(handlers::facebook_auth))
        .route("/auth/me", get(handlers::me_handler))
}
