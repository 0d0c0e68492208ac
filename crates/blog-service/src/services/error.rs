//! Service layer error type
//!
//! Field-scoped input problems are kept apart from everything else because
//! the API renders them as `errorsMessages` rather than a generic error.

use blog_common::{domain_status, AppError};
use blog_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(DomainError),

    /// Token or hashing failure from the shared infrastructure
    #[error(transparent)]
    App(AppError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch the resource
    #[error("Forbidden: {0}")]
    PermissionDenied(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Rejected value of one request field
    #[error("{field}: {message}")]
    InvalidField { field: &'static str, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Unauthorized(_) => 401,
            Self::PermissionDenied(_) => 403,
            Self::Validation(_) | Self::InvalidField { .. } => 400,
            Self::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::PermissionDenied(_) => "FORBIDDEN",
            Self::Validation(_) | Self::InvalidField { .. } => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::LoginAlreadyExists => Self::invalid_field("login", err.to_string()),
            DomainError::EmailAlreadyExists => Self::invalid_field("email", err.to_string()),
            DomainError::NotCommentAuthor | DomainError::NotSessionOwner => {
                Self::PermissionDenied(err.to_string())
            }
            other => Self::Domain(other),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        if err.is_token_error() || matches!(err, AppError::InvalidCredentials) {
            return Self::Unauthorized(err.to_string());
        }
        match err {
            AppError::Domain(e) => e.into(),
            other => Self::App(other),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => Self::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => Self::NotFound(format!("{resource} {id}")),
            ServiceError::Unauthorized(_) => Self::InvalidCredentials,
            ServiceError::PermissionDenied(msg) => Self::Forbidden(msg),
            ServiceError::Validation(msg) => Self::Validation(msg),
            ServiceError::InvalidField { field, message } => {
                Self::Validation(format!("{field}: {message}"))
            }
            ServiceError::Internal(msg) => Self::internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
