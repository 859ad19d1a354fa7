//! Error types shared across the crate.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by descriptor and reducer operations.
///
/// `reduce` itself never returns these; they surface from strict
/// composition, `try_reduce` and message conversion.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A descriptor with an empty `type` was composed under options that forbid it
    #[error("Action type must not be empty")]
    EmptyType,

    /// Two descriptors share a `type` and duplicates are rejected
    #[error("Action type '{action_type}' is registered more than once")]
    DuplicateType { action_type: String },

    /// Payload could not be encoded or decoded
    #[error("Invalid payload for '{action_type}': {source}")]
    Payload {
        action_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// Payload is not the type the matched descriptor expects
    #[error("Payload for '{action_type}' is not a {expected}")]
    PayloadType {
        action_type: String,
        expected: &'static str,
    },

    /// Composition options failed to load
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ActionError {
    /// Short machine-readable kind, stable across releases.
    pub fn error_type(&self) -> &'static str {
        match self {
            ActionError::EmptyType => "empty_type",
            ActionError::DuplicateType { .. } => "duplicate_type",
            ActionError::Payload { .. } => "invalid_payload",
            ActionError::PayloadType { .. } => "payload_type_mismatch",
            ActionError::Config(_) => "config_error",
        }
    }
}
