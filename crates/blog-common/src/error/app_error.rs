//! Application error types
//!
//! Errors raised by the shared infrastructure (tokens, hashing, storage,
//! configuration) plus wrapped domain errors. Status codes are plain `u16`
//! so this crate stays independent of the HTTP stack.

use blog_core::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Login or password did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// HTTP status for a domain error, shared by every layer that wraps one
pub fn domain_status(err: &DomainError) -> u16 {
    if err.is_not_found() {
        404
    } else if err.is_authorization() {
        403
    } else if err.is_validation() {
        400
    } else if err.is_conflict() {
        409
    } else {
        500
    }
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => 401,
            Self::Forbidden(_) => 403,
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => 500,
            Self::Domain(e) => domain_status(e),
        }
    }

    /// Machine-readable code for the `error.code` response field
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Whether this error came from a rejected access or refresh token
    #[must_use]
    pub fn is_token_error(&self) -> bool {
        matches!(self, Self::InvalidToken | Self::TokenExpired)
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}
