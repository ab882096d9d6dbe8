//! End-to-end polling through the HTTP status endpoints

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mockito::{Server, ServerGuard};
use quill_client::{
    CancellationToken, ClientConfig, ClientError, PollConfig, QuillClient, UnsuccessfulPolicy,
};
use quill_core::domain::generation::{JobState, SessionId};

fn client_for(server: &ServerGuard) -> QuillClient {
    QuillClient::new(ClientConfig::new("qk_test").with_base_url(server.url())).unwrap()
}

fn fast(max_attempts: u32) -> PollConfig {
    PollConfig::new(max_attempts, Duration::from_millis(10))
}

/// Serves `bodies` in order, repeating the last one once they run out
async fn scripted_status(
    server: &mut ServerGuard,
    path: &str,
    bodies: Vec<&'static str>,
) -> (mockito::Mock, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let mock = server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            bodies[n.min(bodies.len() - 1)].as_bytes().to_vec()
        })
        .create_async()
        .await;
    (mock, hits)
}

#[tokio::test]
async fn test_wait_for_generation_until_completed() {
    let mut server = Server::new_async().await;
    let (_mock, hits) = scripted_status(
        &mut server,
        "/v1/generate/sess_1/status",
        vec![
            r#"{"success":true,"data":{"session_id":"sess_1","status":"generating","progress":10}}"#,
            r#"{"success":false,"error":"status cache miss"}"#,
            r#"{"success":true,"data":{"session_id":"sess_1","status":"processing","progress":90}}"#,
            r#"{"success":true,"data":{"session_id":"sess_1","status":"completed","content":"X","publication_id":"pub_7"}}"#,
        ],
    )
    .await;

    let client = client_for(&server);
    let done = client
        .wait_for_generation(&SessionId::parse("sess_1").unwrap(), Some(fast(10)))
        .await
        .unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 4);
    let status = done.data.unwrap();
    assert_eq!(status.status, Some(JobState::Completed));
    assert_eq!(status.content.as_deref(), Some("X"));
    assert_eq!(status.publication_id.as_deref(), Some("pub_7"));
}

#[tokio::test]
async fn test_wait_for_generation_failed() {
    let mut server = Server::new_async().await;
    let (_mock, hits) = scripted_status(
        &mut server,
        "/v1/generate/sess_2/status",
        vec![
            r#"{"success":true,"data":{"session_id":"sess_2","status":"generating"}}"#,
            r#"{"success":true,"data":{"session_id":"sess_2","status":"failed","error":"model overloaded"}}"#,
        ],
    )
    .await;

    let client = client_for(&server);
    let err = client
        .wait_for_generation(&SessionId::parse("sess_2").unwrap(), Some(fast(10)))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Publication generation failed");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_wait_for_bulk_generation_timeout() {
    let mut server = Server::new_async().await;
    let (_mock, hits) = scripted_status(
        &mut server,
        "/v1/generate/bulk/bulk_1/status",
        vec![
            r#"{"success":true,"data":{"session_id":"bulk_1","status":"processing","total":3,"completed":1}}"#,
        ],
    )
    .await;

    let client = client_for(&server);
    let err = client
        .wait_for_bulk_generation(&SessionId::parse("bulk_1").unwrap(), Some(fast(3)))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::JobTimeout { .. }));
    assert_eq!(err.to_string(), "Bulk generation timed out");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_wait_for_bulk_generation_completed_results() {
    let mut server = Server::new_async().await;
    let (_mock, _hits) = scripted_status(
        &mut server,
        "/v1/generate/bulk/bulk_2/status",
        vec![
            r#"{"success":true,"data":{"session_id":"bulk_2","status":"completed","total":2,"completed":1,"failed":1,"results":[{"index":0,"status":"completed","publication_id":"pub_1"},{"index":1,"status":"failed","error":"too short"}]}}"#,
        ],
    )
    .await;

    let client = client_for(&server);
    let done = client
        .wait_for_bulk_generation(&SessionId::parse("bulk_2").unwrap(), Some(fast(3)))
        .await
        .unwrap();

    let status = done.data.unwrap();
    assert_eq!(status.failed, 1);
    assert_eq!(status.results[1].error.as_deref(), Some("too short"));
}

#[tokio::test]
async fn test_http_error_during_poll_propagates() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/generate/sess_3/status")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false,"error":"invalid api key"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .wait_for_generation(&SessionId::parse("sess_3").unwrap(), Some(fast(5)))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, ClientError::ApiError { status: 401, .. }));
}

#[tokio::test]
async fn test_unsuccessful_policy_fail() {
    let mut server = Server::new_async().await;
    let (_mock, hits) = scripted_status(
        &mut server,
        "/v1/generate/sess_4/status",
        vec![r#"{"success":false,"error":"session expired"}"#],
    )
    .await;

    let client = client_for(&server);
    let config = fast(5).with_unsuccessful_policy(UnsuccessfulPolicy::Fail);
    let err = client
        .wait_for_generation(&SessionId::parse("sess_4").unwrap(), Some(config))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::StatusCheckFailed { .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancelled_wait() {
    let mut server = Server::new_async().await;
    let (_mock, hits) = scripted_status(
        &mut server,
        "/v1/generate/sess_5/status",
        vec![r#"{"success":true,"data":{"session_id":"sess_5","status":"generating"}}"#],
    )
    .await;

    let client = client_for(&server);
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let config = PollConfig::new(100, Duration::from_secs(60));
    let err = client
        .wait_for_generation_with_cancel(&SessionId::parse("sess_5").unwrap(), Some(config), &token)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Cancelled));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

/// Pending-looking first response, then completion
async fn wait_through(first: &'static str) -> (quill_client::Result<String>, usize) {
    let mut server = Server::new_async().await;
    let (_mock, hits) = scripted_status(
        &mut server,
        "/v1/generate/sess_6/status",
        vec![
            first,
            r#"{"success":true,"data":{"status":"completed","content":"X"}}"#,
        ],
    )
    .await;

    let client = client_for(&server);
    let result = client
        .wait_for_generation(&SessionId::parse("sess_6").unwrap(), Some(fast(5)))
        .await
        .map(|done| done.data.and_then(|status| status.content).unwrap_or_default());
    (result, hits.load(Ordering::SeqCst))
}

#[tokio::test]
async fn test_unsuccessful_check_with_empty_object_keeps_polling() {
    let (result, hits) = wait_through(r#"{"success":false,"data":{}}"#).await;
    assert_eq!(result.unwrap(), "X");
    assert_eq!(hits, 2);
}

#[tokio::test]
async fn test_unsuccessful_check_with_empty_array_keeps_polling() {
    let (result, hits) = wait_through(r#"{"success":false,"data":[]}"#).await;
    assert_eq!(result.unwrap(), "X");
    assert_eq!(hits, 2);
}

#[tokio::test]
async fn test_status_without_session_id_keeps_polling() {
    let (result, hits) = wait_through(r#"{"success":true,"data":{"status":"generating"}}"#).await;
    assert_eq!(result.unwrap(), "X");
    assert_eq!(hits, 2);
}

#[tokio::test]
async fn test_fractional_progress_keeps_polling() {
    let (result, hits) = wait_through(
        r#"{"success":true,"data":{"session_id":"sess_6","status":"generating","progress":42.5}}"#,
    )
    .await;
    assert_eq!(result.unwrap(), "X");
    assert_eq!(hits, 2);
}

#[tokio::test]
async fn test_completed_payload_without_session_id_is_returned() {
    let (result, hits) =
        wait_through(r#"{"success":true,"data":{"status":"completed","content":"X"}}"#).await;
    assert_eq!(result.unwrap(), "X");
    assert_eq!(hits, 1);
}
