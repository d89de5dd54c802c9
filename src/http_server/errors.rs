//! # API Errors
//!
//! Maps store failures onto HTTP status codes. The mapping looks only at the
//! error kind, never at message text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::{ErrorKind, StoreError};

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// A store operation failed
    #[error("{0}")]
    Store(#[from] StoreError),

    /// The request itself is malformed
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(err) if err.kind().is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable code for the error body
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Store(err) => err.code(),
            ApiError::BadRequest(_) => "TABLEDB_BAD_REQUEST",
        }
    }

    /// The store error kind, if this came from the store
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Store(err) => Some(err.kind()),
            ApiError::BadRequest(_) => None,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code().as_u16(),
            kind: err.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
