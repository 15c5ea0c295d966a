use serde::Serialize;
use thiserror::Error;

/// JSON body sent to `POST /api/meetings`
#[derive(Debug, Serialize)]
pub struct CreateMeetingBody<'a> {
    pub region: &'a str,
}

/// Upstream reply, passed back to the caller as-is
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// HTTP status returned by the upstream
    pub status: u16,
    /// Parsed JSON body (for create-meeting this carries `meetingId`)
    pub body: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Invalid upstream endpoint {0}")]
    InvalidEndpoint(String),

    /// The request could not be built, e.g. a token that is not a valid header value
    #[error("Upstream request could not be built: {0}")]
    InvalidRequest(#[source] reqwest::Error),

    #[error("Upstream request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("Upstream unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("Upstream returned a non-JSON body (status {status})")]
    InvalidResponse {
        status: u16,
        #[source]
        source: reqwest::Error,
    },
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            UpstreamError::InvalidRequest(err)
        } else if err.is_timeout() {
            UpstreamError::Timeout(err)
        } else {
            UpstreamError::Unreachable(err)
        }
    }
}
