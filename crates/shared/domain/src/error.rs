//! Domain-level errors.
//!
//! Independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Password hashing or verification could not run
    #[error("Hashing error: {0}")]
    Hashing(String),
}

impl DomainError {
    /// Create a hashing error
    pub fn hashing(msg: impl Into<String>) -> Self {
        DomainError::Hashing(msg.into())
    }
}

/// Reasons an access or refresh token was rejected.
///
/// These stay inside the service. Callers only ever see `Unauthorized`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Token could not be parsed, or its claims are unusable
    #[error("token is malformed")]
    Malformed,

    /// Header declares a signing algorithm other than HS256
    #[error("unexpected signing algorithm")]
    WrongAlgorithm,

    /// Signature does not match the configured secret
    #[error("token signature is invalid")]
    InvalidSignature,

    /// Token is past its expiry
    #[error("token has expired")]
    Expired,

    /// Refresh token was revoked
    #[error("token has been revoked")]
    Revoked,

    /// No refresh token record matches
    #[error("token not found")]
    NotFound,
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
