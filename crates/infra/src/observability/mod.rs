//! Tracing setup driven by [`LoggingConfig`]

use vocawik_common::observability::init_tracing;
use vocawik_domain::{LogFormat, LoggingConfig, Result, VocawikError};

/// Installs the global tracing subscriber for the configured level and
/// format.
///
/// # Errors
///
/// Returns `VocawikError::Config` for an invalid level directive and
/// `VocawikError::Internal` when a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use vocawik_common::observability::ObservabilityError;

    init_tracing(&config.level, config.format == LogFormat::Json).map_err(|err| match err {
        ObservabilityError::InvalidDirective { .. } => VocawikError::Config(err.to_string()),
        ObservabilityError::AlreadyInitialized(_) => VocawikError::Internal(err.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_initialization_is_reported() {
        let config = LoggingConfig::default();

        // Another test in this binary may have installed a subscriber first.
        let _ = init_logging(&config);
        let err = init_logging(&config).unwrap_err();

        assert!(matches!(err, VocawikError::Internal(_)));
    }
}
