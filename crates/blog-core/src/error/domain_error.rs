//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Blog not found: {0}")]
    BlogNotFound(Uuid),

    #[error("Post not found: {0}")]
    PostNotFound(Uuid),

    #[error("Comment not found: {0}")]
    CommentNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Device session not found: {0}")]
    SessionNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown query field: {0}")]
    InvalidQueryField(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not comment author")]
    NotCommentAuthor,

    #[error("Device session belongs to another user")]
    NotSessionOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Login already in use")]
    LoginAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::BlogNotFound(_) => "UNKNOWN_BLOG",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::SessionNotFound(_) => "UNKNOWN_DEVICE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidQueryField(_) => "INVALID_QUERY_FIELD",

            // Authorization
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::NotSessionOwner => "NOT_SESSION_OWNER",

            // Conflict
            Self::LoginAlreadyExists => "LOGIN_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BlogNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::UserNotFound(_)
                | Self::SessionNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidQueryField(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotCommentAuthor | Self::NotSessionOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::LoginAlreadyExists | Self::EmailAlreadyExists)
    }
}
