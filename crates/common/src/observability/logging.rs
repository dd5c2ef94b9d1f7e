//! Tracing subscriber initialization
//!
//! Installs a global `tracing-subscriber` registry with an [`EnvFilter`] and a
//! `fmt` layer in either human-readable or JSON form. `RUST_LOG`, when set,
//! takes precedence over the configured directive.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Errors raised while installing the tracing subscriber
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log directive '{directive}': {reason}")]
    InvalidDirective { directive: String, reason: String },

    #[error("Tracing subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Builds the filter from `RUST_LOG`, falling back to `directive`.
pub fn build_filter(directive: &str) -> Result<EnvFilter, ObservabilityError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(directive.trim()).map_err(|err| ObservabilityError::InvalidDirective {
        directive: directive.to_string(),
        reason: err.to_string(),
    })
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the directive cannot be parsed or a global subscriber
/// is already installed.
pub fn init_tracing(directive: &str, json: bool) -> Result<(), ObservabilityError> {
    let filter = build_filter(directive)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if json {
        registry.with(fmt::layer().json().with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|err| ObservabilityError::AlreadyInitialized(err.to_string()))?;
    tracing::debug!(json, "tracing initialized");
    Ok(())
}
