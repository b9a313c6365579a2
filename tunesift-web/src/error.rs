//! Error types for tunesift-web
//!
//! Provider failures are caught at each call site and folded into
//! [`ServiceError`], which renders as an HTML page the user can act on.

use crate::api::ui;
use crate::provider::ProviderError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Request-level error taxonomy
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing, unknown or rejected credential; the user must sign in again
    #[error("Authentication expired")]
    AuthExpired,

    /// Provider unreachable, throttled or failing; safe to retry
    #[error("Streaming service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Provider did not answer within the request timeout
    #[error("Streaming service timed out")]
    UpstreamTimeout,

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid form input
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ProviderError> for ServiceError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Unauthorized => ServiceError::AuthExpired,
            ProviderError::Timeout => ServiceError::UpstreamTimeout,
            ProviderError::NotFound(what) => ServiceError::NotFound(what),
            other => ServiceError::UpstreamUnavailable(other.to_string()),
        }
    }
}

impl From<tunesift_common::Error> for ServiceError {
    fn from(e: tunesift_common::Error) -> Self {
        match e {
            tunesift_common::Error::InvalidInput(msg) => ServiceError::InvalidInput(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::AuthExpired => StatusCode::UNAUTHORIZED,
            ServiceError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ServiceError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();

        let page = match &self {
            ServiceError::AuthExpired => ui::error_page(
                "Session expired",
                "Your Spotify session has expired or was never started.",
                ("/", "Sign in again"),
            ),
            ServiceError::UpstreamUnavailable(_) | ServiceError::UpstreamTimeout => {
                tracing::warn!("Upstream failure: {}", self);
                ui::error_page(
                    "Spotify is not responding",
                    "The streaming service could not complete the request. Please try again.",
                    ("/search", "Back to search"),
                )
            }
            ServiceError::NotFound(_) => ui::error_page(
                "Not found",
                "That playlist no longer exists.",
                ("/search", "Back to search"),
            ),
            ServiceError::InvalidInput(msg) => {
                ui::error_page("Invalid request", msg, ("/search", "Back to search"))
            }
            ServiceError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ui::error_page(
                    "Something went wrong",
                    "An internal error occurred.",
                    ("/search", "Back to search"),
                )
            }
        };

        (status, Html(page)).into_response()
    }
}

/// Result type for handlers and services
pub type ServiceResult<T> = Result<T, ServiceError>;
