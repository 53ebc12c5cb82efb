//! Error types for algotrace.
//!
//! Cores and the runner return `Result<T, TraceError>` instead of panicking.
//! Degenerate instances (empty arrays, zero capacity, single-node graphs) are
//! not errors: they produce a minimal valid trace.

use thiserror::Error;

use crate::trace::Algorithm;

/// Result type alias for algotrace operations.
pub type TraceResult<T> = Result<T, TraceError>;

/// Unified error type for all algotrace operations.
#[derive(Debug, Error)]
pub enum TraceError {
    // ===== Instance Errors =====
    /// Malformed or out-of-range instance data.
    #[error("invalid {algorithm} instance: {reason}")]
    InvalidInstance {
        /// Algorithm the instance was submitted to.
        algorithm: Algorithm,
        /// What is wrong with the instance.
        reason: String,
    },

    /// Instance exceeds a configured size limit.
    #[error("{algorithm} instance too large: {what} is {actual}, limit is {limit}")]
    LimitExceeded {
        /// Algorithm the instance was submitted to.
        algorithm: Algorithm,
        /// Which dimension exceeded the limit.
        what: &'static str,
        /// Observed size.
        actual: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Edge or source refers to a node label that does not exist.
    #[error("unknown node label '{label}'")]
    UnknownNode {
        /// The unresolved label.
        label: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Trace Errors =====
    /// A deserialized trace breaks the trace invariants.
    #[error("Malformed trace: {0}")]
    MalformedTrace(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TraceError {
    /// Create an invalid-instance error.
    #[must_use]
    pub fn invalid(algorithm: Algorithm, reason: impl Into<String>) -> Self {
        Self::InvalidInstance {
            algorithm,
            reason: reason.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create a malformed-trace error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedTrace(message.into())
    }

    /// Check if this error rejects the submitted instance (as opposed to
    /// configuration or I/O failures).
    #[must_use]
    pub const fn is_instance_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInstance { .. } | Self::LimitExceeded { .. } | Self::UnknownNode { .. }
        )
    }
}
