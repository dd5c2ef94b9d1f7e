//! Error types used by setup and infrastructure code
//!
//! Request failures have their own taxonomy in [`crate::types`]; this error
//! covers everything around the pipeline (config, client construction,
//! tracing initialization).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Vocawik setup and infrastructure operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum VocawikError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Vocawik operations
pub type Result<T> = std::result::Result<T, VocawikError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = VocawikError::Config("missing base url".into());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json, serde_json::json!({ "type": "Config", "message": "missing base url" }));
        assert_eq!(err.to_string(), "Configuration error: missing base url");
    }
}
