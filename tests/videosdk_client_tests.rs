// Integration tests for the VideoSDK client against a wiremock upstream

use serde_json::json;
use std::time::Duration;
use videosdk_relay::{MeetingsApi, UpstreamError, VideoSdkClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> VideoSdkClient {
    VideoSdkClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_create_meeting_posts_region_with_raw_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/meetings"))
        .and(header("authorization", "tok-123"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "region": "sg001" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meetingId": "abcd-efgh-ijkl",
            "region": "sg001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .create_meeting("tok-123", "sg001")
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body["meetingId"], "abcd-efgh-ijkl");
}

#[tokio::test]
async fn test_validate_meeting_posts_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/meetings/abc123"))
        .and(header("authorization", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meetingId": "abc123" })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .validate_meeting("tok-123", "abc123")
        .await
        .unwrap();

    assert_eq!(response.body, json!({ "meetingId": "abc123" }));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_upstream_error_status_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/meetings/missing"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid meetingId" })),
        )
        .mount(&server)
        .await;

    let response = client_for(&server)
        .validate_meeting("tok", "missing")
        .await
        .unwrap();

    assert_eq!(response.status, 400);
    assert_eq!(response.body["message"], "Invalid meetingId");
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/meetings"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_meeting("tok", "sg001")
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::InvalidResponse { status: 502, .. }));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/meetings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "meetingId": "late" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = VideoSdkClient::new(&server.uri(), Duration::from_millis(200)).unwrap();
    let err = client.create_meeting("tok", "sg001").await.unwrap_err();

    assert!(matches!(err, UpstreamError::Timeout(_)));
}

#[tokio::test]
async fn test_unreachable_upstream() {
    // Reserve a port, then free it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = VideoSdkClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    let err = client.validate_meeting("tok", "abc123").await.unwrap_err();

    assert!(matches!(err, UpstreamError::Unreachable(_)));
}

#[tokio::test]
async fn test_token_with_newline_is_invalid_request() {
    let server = MockServer::start().await;

    let err = client_for(&server)
        .create_meeting("tok\nInjected: yes", "sg001")
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
