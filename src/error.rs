//! Request-level errors for the relay API.
//!
//! Every failure becomes a JSON response `{"error": ..., "code": ...}`.
//! Server-side detail is logged; 5xx messages sent to clients stay generic.

use crate::token::TokenError;
use crate::videosdk::UpstreamError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Maps to:
/// - BadRequest: 400
/// - TokenSigning: 500
/// - Upstream timeout: 504
/// - any other Upstream failure: 502 (400 if the request itself was unusable)
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    TokenSigning(#[from] TokenError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::TokenSigning(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Upstream(UpstreamError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            RelayError::Upstream(UpstreamError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RelayError::BadRequest(_) | RelayError::Upstream(UpstreamError::InvalidRequest(_)) => {
                "BAD_REQUEST"
            }
            RelayError::TokenSigning(_) => "TOKEN_SIGNING_FAILED",
            RelayError::Upstream(UpstreamError::Timeout(_)) => "UPSTREAM_TIMEOUT",
            RelayError::Upstream(UpstreamError::InvalidResponse { .. }) => {
                "UPSTREAM_INVALID_RESPONSE"
            }
            RelayError::Upstream(_) => "UPSTREAM_UNAVAILABLE",
        }
    }

    /// A required body field was absent or blank
    pub fn missing_field(field: &str) -> Self {
        RelayError::BadRequest(format!("Missing required field: {}", field))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            RelayError::BadRequest(reason) => reason.clone(),
            RelayError::Upstream(UpstreamError::InvalidRequest(err)) => {
                tracing::warn!(error = %err, "Rejected unusable upstream request");
                "Token is not a valid Authorization header value".to_string()
            }
            RelayError::TokenSigning(err) => {
                tracing::error!(error = %err, "Token signing failed");
                "Failed to issue token".to_string()
            }
            RelayError::Upstream(err) => {
                tracing::error!(error = %err, "VideoSDK request failed");
                match err {
                    UpstreamError::Timeout(_) => "VideoSDK did not respond in time".to_string(),
                    UpstreamError::InvalidResponse { .. } => {
                        "VideoSDK returned an invalid response".to_string()
                    }
                    _ => "VideoSDK is unavailable".to_string(),
                }
            }
        };

        let body = ErrorResponse {
            error: message,
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for RelayError {
    fn from(rejection: JsonRejection) -> Self {
        RelayError::BadRequest(rejection.body_text())
    }
}
