use super::state::AppState;
use crate::error::RelayError;
use crate::videosdk::UpstreamResponse;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const LIVENESS_MESSAGE: &str = "Video SDK Server live!";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateMeetingRequest {
    /// Token from /get-token, forwarded as the Authorization header
    pub token: Option<String>,

    /// VideoSDK region code, passed through untouched
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateMeetingRequest {
    pub token: Option<String>,
}

fn require(value: Option<String>, field: &str) -> Result<String, RelayError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RelayError::missing_field(field)),
    }
}

/// Relay the upstream status and JSON body unchanged
fn forward(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(upstream.body)).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Liveness check, never touches the upstream
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, LIVENESS_MESSAGE)
}

/// GET /get-token
/// Issue a signed VideoSDK token
pub async fn get_token(State(state): State<AppState>) -> Result<Json<TokenResponse>, RelayError> {
    let issued = state.signer.issue()?;

    info!("Issued token expiring at {}", issued.claims.exp);

    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

/// POST /create-meeting/
/// Create a meeting on VideoSDK; the reply carries `meetingId`
pub async fn create_meeting(
    State(state): State<AppState>,
    body: Result<Json<CreateMeetingRequest>, JsonRejection>,
) -> Result<Response, RelayError> {
    let Json(req) = body.map_err(|e| {
        warn!("Rejected create-meeting body: {}", e);
        RelayError::from(e)
    })?;

    let token = require(req.token, "token")?;
    let region = require(req.region, "region")?;

    let upstream = state.meetings.create_meeting(&token, &region).await?;

    Ok(forward(upstream))
}

/// POST /validate-meeting/:meeting_id
/// Check that a meeting exists and the token may access it
pub async fn validate_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
    body: Result<Json<ValidateMeetingRequest>, JsonRejection>,
) -> Result<Response, RelayError> {
    let Json(req) = body.map_err(|e| {
        warn!("Rejected validate-meeting body for {}: {}", meeting_id, e);
        RelayError::from(e)
    })?;

    let token = require(req.token, "token")?;

    let upstream = state.meetings.validate_meeting(&token, &meeting_id).await?;

    Ok(forward(upstream))
}
