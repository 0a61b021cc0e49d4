//! API error types for handler operations
//!
//! Every failed request is converted into a JSON envelope through
//! `IntoResponse`, and that conversion is the single place failures get logged.
//!
//! # Example
//!
//! ```rust
//! use todo_service::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::not_found();
//! assert_eq!(error.kind, ApiErrorKind::NotFound);
//! assert_eq!(error.kind.status_code().as_u16(), 404);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, RepositoryErrorKind};

const INTERNAL_MESSAGE: &str = "the server encountered a problem and could not process your request";

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Malformed or oversized request body
    BadRequest,
    /// Unknown route, invalid id or missing record
    NotFound,
    /// Route exists but not for this method
    MethodNotAllowed,
    /// Version mismatch on update
    EditConflict,
    /// Request exceeded the service timeout
    RequestTimeout,
    /// Field-level validation failures
    ValidationFailed,
    /// Store or transport failure
    Internal,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "bad_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::MethodNotAllowed => write!(f, "method_not_allowed"),
            Self::EditConflict => write!(f, "edit_conflict"),
            Self::RequestTimeout => write!(f, "request_timeout"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::Internal => write!(f, "internal_error"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::EditConflict => StatusCode::CONFLICT,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error kind
    #[must_use]
    pub fn error_code(&self) -> String {
        self.to_string().to_uppercase()
    }
}

/// The `error` member of the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Human-readable message
    Message(String),
    /// Field name to message
    Fields(BTreeMap<String, String>),
}

/// Structured API error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The category of error
    pub kind: ApiErrorKind,
    /// What the client is told
    pub detail: ErrorDetail,
    /// Internal cause, logged but never sent to the client
    pub source: Option<String>,
}

impl ApiError {
    /// Create a new API error with a message
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            detail: ErrorDetail::Message(message.into()),
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::BadRequest, message)
    }

    pub fn not_found() -> Self {
        Self::new(
            ApiErrorKind::NotFound,
            "the requested resource could not be found",
        )
    }

    pub fn method_not_allowed(method: &Method) -> Self {
        Self::new(
            ApiErrorKind::MethodNotAllowed,
            format!("the {} method is not supported for this resource", method),
        )
    }

    pub fn edit_conflict() -> Self {
        Self::new(
            ApiErrorKind::EditConflict,
            "unable to update the record due to an edit conflict, please try again",
        )
    }

    pub fn request_timeout() -> Self {
        Self::new(
            ApiErrorKind::RequestTimeout,
            "the request took too long to process",
        )
    }

    /// Validation failures keyed by field
    pub fn failed_validation(errors: BTreeMap<String, String>) -> Self {
        Self {
            kind: ApiErrorKind::ValidationFailed,
            detail: ErrorDetail::Fields(errors),
            source: None,
        }
    }

    /// Internal failure; `cause` is logged, the client gets a generic message
    pub fn internal(cause: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Internal,
            detail: ErrorDetail::Message(INTERNAL_MESSAGE.to_string()),
            source: Some(cause.into()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            ErrorDetail::Message(message) => write!(f, "API {} error: {}", self.kind, message)?,
            ErrorDetail::Fields(fields) => {
                write!(f, "API {} error on fields {:?}", self.kind, fields.keys())?
            }
        }
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Response body for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub code: String,
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        match self.kind {
            ApiErrorKind::Internal => tracing::error!(
                kind = %self.kind,
                source = self.source.as_deref().unwrap_or_default(),
                "request failed"
            ),
            ApiErrorKind::EditConflict => tracing::warn!(kind = %self.kind, "request conflicted"),
            ApiErrorKind::RequestTimeout => tracing::warn!(kind = %self.kind, "request timed out"),
            _ => tracing::info!(kind = %self.kind, error = ?self.detail, "request rejected"),
        }

        let body = ErrorResponse {
            error: self.detail,
            code: self.kind.error_code(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err.kind {
            RepositoryErrorKind::NotFound => ApiError::not_found(),
            RepositoryErrorKind::EditConflict => ApiError::edit_conflict(),
            RepositoryErrorKind::Timeout | RepositoryErrorKind::Database => {
                ApiError::internal(err.to_string())
            }
        }
    }
}
