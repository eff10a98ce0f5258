//! # API Errors
//!
//! Every failure of a chirp request maps to one of these. The `Display`
//! text is exactly what clients receive in `{"error": ...}`; the wrapped
//! detail is kept for logs only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::response::ErrorBody;
use crate::policy::ValidationError;
use crate::storage::StorageError;

/// Result type for chirp requests
pub type ApiResult<T> = Result<T, ApiError>;

/// Chirp request errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Payload is not `{"body": <string>}`
    #[error("Invalid request payload")]
    InvalidPayload(String),

    /// Body exceeds the length limit
    #[error("Chirp is too long")]
    TooLong(#[from] ValidationError),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store write failed
    #[error("Could not save chirp")]
    SaveFailed(#[source] StorageError),

    /// Create worker did not finish
    #[error("Could not save chirp")]
    SaveInterrupted(String),

    /// Store read failed
    #[error("Could not retrieve chirps")]
    RetrieveFailed(#[source] StorageError),

    /// List worker did not finish
    #[error("Could not retrieve chirps")]
    RetrieveInterrupted(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::TooLong(_) => StatusCode::BAD_REQUEST,
            ApiError::SaveFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::SaveInterrupted(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RetrieveFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RetrieveInterrupted(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Internal detail for logging; never sent to clients
    pub fn detail(&self) -> String {
        match self {
            ApiError::InvalidPayload(reason) => reason.clone(),
            ApiError::TooLong(e) => e.to_string(),
            ApiError::SaveFailed(e) => e.to_string(),
            ApiError::SaveInterrupted(reason) => reason.clone(),
            ApiError::RetrieveFailed(e) => e.to_string(),
            ApiError::RetrieveInterrupted(reason) => reason.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody::from(&self));
        (status, body).into_response()
    }
}
