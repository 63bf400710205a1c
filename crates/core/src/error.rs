//! Core Error Types
//!
//! Defines the foundational error types used across the ReqForge workspace.
//! These error types are dependency-free (only thiserror + std) to keep the
//! core crate lightweight.
//!
//! The main application crate extends these with additional error variants
//! (e.g., Config, Store) that require heavier dependencies.

use thiserror::Error;

/// Core error type for the ReqForge workspace.
///
/// Only `MalformedInput` is ever surfaced to a pipeline caller as a hard
/// failure; every other variant is handled internally by degrading the run
/// or producing a structured rejection.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Ingress document is unparsable or empty
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors (handler conformance, config values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors (unknown handler name)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Handler synthesis errors (invalid artifact, duplicate name, timeout)
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a malformed input error
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a synthesis error
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
