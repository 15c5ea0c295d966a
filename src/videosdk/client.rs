use super::types::{CreateMeetingBody, UpstreamError, UpstreamResponse};
use super::MeetingsApi;
use crate::config::VideoSdkConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Url};
use std::time::Duration;
use tracing::{info, warn};

/// reqwest-backed `MeetingsApi` talking to a VideoSDK endpoint
#[derive(Clone)]
pub struct VideoSdkClient {
    http: Client,
    base_url: Url,
}

impl VideoSdkClient {
    pub fn new(api_endpoint: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(api_endpoint)
            .with_context(|| format!("Invalid VideoSDK endpoint: {}", api_endpoint))?;

        if base_url.cannot_be_a_base() {
            anyhow::bail!("VideoSDK endpoint cannot carry a path: {}", api_endpoint);
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!("videosdk-relay/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &VideoSdkConfig) -> Result<Self> {
        Self::new(&config.api_endpoint, config.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/meetings[/{meeting_id}]`, with the id as one encoded segment
    fn meetings_url(&self, meeting_id: Option<&str>) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UpstreamError::InvalidEndpoint(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(["api", "meetings"]);
            if let Some(id) = meeting_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<UpstreamResponse, UpstreamError> {
        let response = request.send().await.map_err(|e| {
            warn!("VideoSDK request failed: {}", e);
            UpstreamError::from(e)
        })?;

        let status = response.status().as_u16();

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|source| {
                warn!("VideoSDK returned unreadable body (status {}): {}", status, source);
                if source.is_timeout() {
                    UpstreamError::Timeout(source)
                } else {
                    UpstreamError::InvalidResponse { status, source }
                }
            })?;

        Ok(UpstreamResponse { status, body })
    }
}

#[async_trait]
impl MeetingsApi for VideoSdkClient {
    async fn create_meeting(
        &self,
        token: &str,
        region: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.meetings_url(None)?;
        info!("Creating VideoSDK meeting (region={})", region);

        // .json() also sets Content-Type: application/json
        let request = self
            .http
            .post(url)
            .header(AUTHORIZATION, token)
            .json(&CreateMeetingBody { region });

        let response = self.send(request).await?;
        info!("VideoSDK create-meeting answered {}", response.status);
        Ok(response)
    }

    async fn validate_meeting(
        &self,
        token: &str,
        meeting_id: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.meetings_url(Some(meeting_id))?;
        info!("Validating VideoSDK meeting {}", meeting_id);

        let request = self.http.post(url).header(AUTHORIZATION, token);

        let response = self.send(request).await?;
        info!(
            "VideoSDK validate-meeting for {} answered {}",
            meeting_id, response.status
        );
        Ok(response)
    }
}
