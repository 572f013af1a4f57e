//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use dirshare_core::BrowseError;
use tracing::error;

/// Errors returned by request handlers.
///
/// Server-side failures carry no detail to the client; the cause is logged
/// when the error is created.
#[derive(Debug)]
pub enum ApiError {
    /// The path is outside the root, missing, or the wrong kind.
    NotFound,
    /// The request itself is malformed.
    BadRequest(String),
    /// The request body exceeds the upload limit.
    PayloadTooLarge,
    /// Anything else.
    Internal,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Self::PayloadTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "upload too large").into_response()
            }
            Self::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

impl From<BrowseError> for ApiError {
    fn from(err: BrowseError) -> Self {
        if err.is_not_found() {
            return Self::NotFound;
        }
        if err.is_client_error() {
            return Self::BadRequest(err.to_string());
        }
        error!(error = %err, "request failed");
        Self::Internal
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        error!(error = %err, "blocking task failed");
        Self::Internal
    }
}
