//! Tracing setup and request logging helpers

use std::time::Duration;

use reviewbot_domain::ReviewBotError;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` controls the filter (default `info`); `REVIEWBOT_LOG_FORMAT=json`
/// switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("REVIEWBOT_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Log the outcome of an HTTP request with structured fields.
///
/// `route` should be a stable identifier without request data.
#[inline]
pub fn log_request(route: &str, elapsed: Duration, status: u16) {
    let duration_ms = elapsed.as_millis() as u64;

    if status < 500 {
        info!(route, status, duration_ms, "request_completed");
    } else {
        warn!(route, status, duration_ms, "request_failed");
    }
}

/// Convert a `ReviewBotError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &ReviewBotError) -> &'static str {
    match error {
        ReviewBotError::InvalidRequest(_) => "invalid_request",
        ReviewBotError::NotImplemented(_) => "not_implemented",
        ReviewBotError::NotFound(_) => "not_found",
        ReviewBotError::Provider(_) => "provider",
        ReviewBotError::UnsupportedDocumentType(_) => "unsupported_document",
        ReviewBotError::Config(_) => "config",
        ReviewBotError::Network(_) => "network",
        ReviewBotError::Auth(_) => "auth",
        ReviewBotError::Internal(_) => "internal",
    }
}
