//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// malformed requests, missing records). Transport concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value object rejected its input (temperature below absolute zero,
    /// coordinate out of range, unknown scale token, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A request was malformed before it could reach storage
    /// (non-positive id, empty date, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation is behind a feature flag that is switched off.
    #[error("feature disabled: {0}")]
    FeatureDisabled(&'static str),

    /// The backing store failed (e.g. a poisoned lock).
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
