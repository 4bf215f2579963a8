// Process-wide configuration resolved once at startup

use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_JWT_SECRET: &str = "dev-secret-change-in-production";
pub const DEFAULT_JWT_ISSUER: &str = "https://handy.com";
pub const DEFAULT_JWT_AUDIENCE: &str = "handy-app";
pub const DEFAULT_JWT_REALM: &str = "Handy App";
pub const DEFAULT_GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
pub const DEFAULT_FACEBOOK_GRAPH_URL: &str = "https://graph.facebook.com/me";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Session tokens are valid for 30 days from issuance.
pub const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Immutable application configuration.
///
/// Every value has a development fallback. `JWT_SECRET` in particular must be
/// overridden in production; [`AppConfig::uses_default_secret`] lets startup
/// warn about it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_realm: String,
    /// Expected `aud` of Google ID tokens. Blank disables the audience check.
    pub google_client_id: String,
    pub google_tokeninfo_url: String,
    pub facebook_graph_url: String,
    pub provider_timeout: Duration,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub sentry_dsn: Option<String>,
    pub environment: String,
}

impl AppConfig {
    /// Reads the process environment. Call after `dotenv().ok()`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let provider_timeout_secs = parse_or_default(
            "PROVIDER_TIMEOUT_SECS",
            lookup("PROVIDER_TIMEOUT_SECS"),
            DEFAULT_PROVIDER_TIMEOUT_SECS,
        );
        let port = parse_or_default("PORT", lookup("PORT"), DEFAULT_PORT);

        let cors_origins = string_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            jwt_secret: string_or("JWT_SECRET", DEFAULT_JWT_SECRET),
            jwt_issuer: string_or("JWT_ISSUER", DEFAULT_JWT_ISSUER),
            jwt_audience: string_or("JWT_AUDIENCE", DEFAULT_JWT_AUDIENCE),
            jwt_realm: string_or("JWT_REALM", DEFAULT_JWT_REALM),
            google_client_id: lookup("GOOGLE_CLIENT_ID").unwrap_or_default(),
            google_tokeninfo_url: string_or("GOOGLE_TOKENINFO_URL", DEFAULT_GOOGLE_TOKENINFO_URL),
            facebook_graph_url: string_or("FACEBOOK_GRAPH_URL", DEFAULT_FACEBOOK_GRAPH_URL),
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            port,
            cors_origins,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.trim().is_empty()),
            environment: string_or("ENVIRONMENT", "development"),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// The Google audience check only runs when a client id is configured
    pub fn expected_google_audience(&self) -> Option<&str> {
        if self.google_client_id.trim().is_empty() {
            None
        } else {
            Some(&self.google_client_id)
        }
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match raw {
        None => default,
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(key = %key, value = %value, default = %default, "Unparsable configuration value, using default");
                default
            }
        },
    }
}
