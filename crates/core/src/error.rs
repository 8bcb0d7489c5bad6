//! Domain error model.

use thiserror::Error;

/// Result type used across the catalog and pricing layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// `UpstreamUnavailable` is produced by the remote mirror adapters. Read paths
/// recover from it by falling back to the local catalog; only the stock update
/// surfaces it to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The catalog snapshot has not been loaded yet (retryable).
    #[error("catalog not loaded yet")]
    NotLoaded,

    /// No record exists for the requested identifier.
    #[error("not found")]
    NotFound,

    /// A request or pricing input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The remote mirror could not serve the call.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(msg.into())
    }
}
