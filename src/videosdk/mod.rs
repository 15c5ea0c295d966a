//! Outbound client for the VideoSDK meetings REST API
//!
//! Handlers talk to the upstream through the `MeetingsApi` trait so the
//! transport can be swapped in tests.

mod client;
mod types;

pub use client::VideoSdkClient;
pub use types::{CreateMeetingBody, UpstreamError, UpstreamResponse};

use async_trait::async_trait;

/// Meeting operations exposed by the upstream API
///
/// `token` is forwarded as the raw `Authorization` header value; it is not
/// inspected here.
#[async_trait]
pub trait MeetingsApi: Send + Sync {
    /// POST /api/meetings with `{ region }`
    async fn create_meeting(
        &self,
        token: &str,
        region: &str,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// POST /api/meetings/{meeting_id} with no body
    async fn validate_meeting(
        &self,
        token: &str,
        meeting_id: &str,
    ) -> Result<UpstreamResponse, UpstreamError>;
}
