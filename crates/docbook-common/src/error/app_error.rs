//! Application error types
//!
//! Errors raised above the domain: sign-in outcomes, startup failures and
//! service errors on their way out of the binary.

use docbook_core::DomainError;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Sign-in outcomes
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Your account is pending admin approval")]
    PendingApproval,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Stable machine-readable code, logged when the binary exits on error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// True when the fault lies with the installation (storage, hashing,
    /// configuration) rather than with what the user asked for
    #[must_use]
    pub fn is_internal(&self) -> bool {
        match self {
            Self::Internal(_) | Self::Config(_) => true,
            Self::Domain(e) => is_internal_domain(e),
            _ => false,
        }
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Storage and corruption failures; everything else a caller can act on
fn is_internal_domain(err: &DomainError) -> bool {
    !(err.is_not_found() || err.is_validation() || err.is_authorization() || err.is_conflict())
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
