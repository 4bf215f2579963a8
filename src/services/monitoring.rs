// Monitoring with optional Sentry integration
use tracing::{error, info};

use crate::common::AppConfig;

/// Initializes Sentry when a DSN is configured. Keep the guard alive for the
/// lifetime of the process; dropping it flushes pending events.
pub fn init_sentry(config: &AppConfig) -> Option<sentry::ClientInitGuard> {
    let Some(dsn) = &config.sentry_dsn else {
        info!("Sentry DSN not configured");
        return None;
    };

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.environment.clone().into()),
            traces_sample_rate: 0.0,
            ..Default::default()
        },
    ));

    if guard.is_enabled() {
        info!("Sentry initialized successfully");
    }
    Some(guard)
}

/// Logs an unexpected server-side failure and forwards it to Sentry
pub fn capture_internal_error(error: &dyn std::error::Error, context: &str) {
    error!(error = %error, context = %context, "Internal error occurred");

    sentry::with_scope(
        |scope| scope.set_tag("context", context),
        || sentry::capture_error(error),
    );
}
