//! API error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tgcheck_core::CoreError;
use thiserror::Error;

/// Errors returned to API callers as `{"error": "<message>"}`.
///
/// Probe failures are not errors here; they come back as a 200 response
/// with `status = "error"`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Empty, malformed or too-short username.
    #[error(transparent)]
    InvalidInput(#[from] CoreError),

    /// Request body is not valid JSON.
    #[error("Invalid JSON")]
    MalformedRequest,

    /// Query string could not be decoded.
    #[error("Invalid query string")]
    MalformedQuery,

    /// Unknown route.
    #[error("Not found")]
    NotFound,

    /// Unexpected fault in a handler.
    #[error("Server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::MalformedRequest | Self::MalformedQuery => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
