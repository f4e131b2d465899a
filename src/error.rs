//! Error types for the audit engine.
//!
//! The core pipeline itself never fails: missing page data degrades to
//! worst-case findings and collaborator failures trigger fallbacks. These
//! errors exist for the collaborator boundaries (AI client, cache store).

use thiserror::Error;

/// Domain-specific errors for audit operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),

    /// External service error (Claude, cache store, etc.)
    #[error("Service error ({service}): {message}")]
    ServiceError { service: &'static str, message: String },

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AuditError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkError(msg.into())
    }

    /// Create a service error
    pub fn service(service: &'static str, msg: impl Into<String>) -> Self {
        Self::ServiceError { service, message: msg.into() }
    }
}

/// Result type alias using AuditError.
pub type Result<T> = std::result::Result<T, AuditError>;
