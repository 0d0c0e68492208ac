//! Response types and error handling for API endpoints
//!
//! Input problems tied to a field render as
//! `{"errorsMessages": [{"message", "field"}]}`; every other error renders
//! as `{"error": {"code", "message"}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_common::AppError;
use blog_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    App(#[from] AppError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A path id that cannot name any resource
    #[error("Resource not found")]
    NotFound,

    #[error("Missing authorization")]
    MissingAuth,

    #[error("Invalid authorization")]
    InvalidAuth,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::App(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Validation(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MissingAuth | Self::InvalidAuth => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::Service(e) => e.error_code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) | Self::InvalidBody(_) => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::InvalidAuth => "INVALID_AUTHORIZATION",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    /// Per-field messages, when this error is about request fields
    fn field_errors(&self) -> Option<Vec<FieldError>> {
        match self {
            Self::Validation(errors) => {
                let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
                fields.sort_by(|a, b| a.0.cmp(&b.0));
                Some(
                    fields
                        .into_iter()
                        .filter_map(|(field, errs)| {
                            let first = errs.first()?;
                            let message = first
                                .message
                                .as_ref()
                                .map_or_else(|| format!("{field} is invalid"), ToString::to_string);
                            Some(FieldError::new(&field, message))
                        })
                        .collect(),
                )
            }
            Self::Service(ServiceError::InvalidField { field, message }) => {
                Some(vec![FieldError::new(field, message.clone())])
            }
            Self::InvalidBody(msg) => Some(vec![FieldError::new("body", msg.clone())]),
            _ => None,
        }
    }
}

/// `website_url` -> `websiteUrl`; names already in camelCase pass through
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// One entry of `errorsMessages`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
    pub field: String,
}

impl FieldError {
    fn new(field: &str, message: String) -> Self {
        Self {
            message,
            field: camel_case(field),
        }
    }
}

/// Body for field-level errors
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrorsBody {
    pub errors_messages: Vec<FieldError>,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let Some(errors_messages) = self.field_errors() {
            return (status, Json(FieldErrorsBody { errors_messages })).into_response();
        }

        let message = if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
