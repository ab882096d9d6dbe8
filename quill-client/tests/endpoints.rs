//! Request plumbing tests against a mock HTTP server

use mockito::{Matcher, Server, ServerGuard};
use quill_client::{ClientConfig, ClientError, QuillClient};
use quill_core::domain::generation::{JobState, SessionId};
use quill_core::domain::publication::{ContentType, PublicationStatus};
use quill_core::dto::generation::{BulkGenerateRequest, GenerateRequest};
use quill_core::dto::publication::{ListPublicationsQuery, UpdatePublication};

const PUBLICATION: &str = r#"{
    "id": "pub_1",
    "title": "Tides",
    "content": "The moon pulls...",
    "content_type": "article",
    "status": "draft",
    "word_count": 512,
    "created_at": "2025-03-01T10:00:00Z",
    "updated_at": "2025-03-01T10:05:00Z"
}"#;

fn client_for(server: &ServerGuard) -> QuillClient {
    QuillClient::new(ClientConfig::new("qk_test").with_base_url(server.url())).unwrap()
}

#[tokio::test]
async fn test_generate_sends_bearer_and_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/generate")
        .match_header("authorization", "Bearer qk_test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "topic": "Tides",
            "content_type": "article",
            "tone": "calm"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"data":{"session_id":"sess_1","status":"generating"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let started = client
        .generate(GenerateRequest::new("Tides", ContentType::Article).with_tone("calm"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(started.session_id.as_str(), "sess_1");
    assert_eq!(started.status, JobState::Generating);
}

#[tokio::test]
async fn test_generate_rejects_empty_topic_without_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/generate")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .generate(GenerateRequest::new("", ContentType::Article))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidRequest(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bulk_item_limits() {
    let server = Server::new_async().await;
    let client = client_for(&server);

    let err = client
        .generate_bulk(BulkGenerateRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));

    let items = (0..101)
        .map(|i| GenerateRequest::new(format!("topic {}", i), ContentType::SocialPost))
        .collect();
    let err = client
        .generate_bulk(BulkGenerateRequest::new(items))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_status_check_returns_unsuccessful_envelope() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/generate/sess_1/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false,"error":"session warming up"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let envelope = client
        .get_generation_status(&SessionId::parse("sess_1").unwrap())
        .await
        .unwrap();

    assert!(!envelope.success);
    assert_eq!(envelope.error_message(), Some("session warming up"));
}

#[tokio::test]
async fn test_session_id_is_sent_as_one_path_segment() {
    let mut server = Server::new_async().await;
    let status = server
        .mock("GET", "/v1/generate/..%2F..%2Faccount%3Fx=/status")
        .match_header("authorization", "Bearer qk_test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"data":{"status":"generating"}}"#)
        .expect(1)
        .create_async()
        .await;
    let account = server
        .mock("GET", Matcher::Regex("^/account".to_string()))
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let envelope = client
        .get_generation_status(&SessionId::parse("../../account?x=").unwrap())
        .await
        .unwrap();

    status.assert_async().await;
    account.assert_async().await;
    assert_eq!(envelope.state(), Some(&JobState::Generating));
}

#[tokio::test]
async fn test_publication_id_with_slash_is_encoded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/v1/publications/a%2Fb")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    client.delete_publication("a/b").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_dot_segment_id_rejected_without_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_publication("..").await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_list_publications_encodes_query() {
    let mut server = Server::new_async().await;
    let body = format!(
        r#"{{"success":true,"data":{{"items":[{}],"total":1,"page":2,"limit":10}}}}"#,
        PUBLICATION
    );
    let mock = server
        .mock("GET", "/v1/publications")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("status".into(), "draft".into()),
            Matcher::UrlEncoded("search".into(), "moon tides".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server);
    let page = client
        .list_publications(&ListPublicationsQuery {
            page: Some(2),
            limit: Some(10),
            status: Some(PublicationStatus::Draft),
            search: Some("moon tides".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].word_count, 512);
}

#[tokio::test]
async fn test_update_publication_patches_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/v1/publications/pub_1")
        .match_body(Matcher::Json(serde_json::json!({"status": "published"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"success":true,"data":{}}}"#, PUBLICATION))
        .create_async()
        .await;

    let client = client_for(&server);
    let update = UpdatePublication {
        status: Some(PublicationStatus::Published),
        ..Default::default()
    };
    let publication = client.update_publication("pub_1", &update).await.unwrap();

    mock.assert_async().await;
    assert_eq!(publication.id, "pub_1");

    let err = client
        .update_publication("pub_1", &UpdatePublication::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_not_found_uses_envelope_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/publications/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false,"error":"Publication not found"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_publication("missing").await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        ClientError::NotFound(message) => assert_eq!(message, "Publication not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_keeps_raw_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/account")
        .with_status(502)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_account().await.unwrap_err();

    assert!(err.is_server_error());
    assert!(err.to_string().contains("upstream unavailable"));
}

#[tokio::test]
async fn test_unsuccessful_envelope_on_ok_status_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/account")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false,"message":"API key revoked"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_account().await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::ApiError { status: 200, ref message } if message == "API key revoked"
    ));
}

#[tokio::test]
async fn test_missing_data_is_a_parse_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/templates")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.list_templates().await.unwrap_err();

    assert!(matches!(err, ClientError::ParseError(_)));
}

#[tokio::test]
async fn test_delete_accepts_empty_envelope_and_no_content() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/v1/publications/pub_1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"message":"deleted"}"#)
        .create_async()
        .await;
    server
        .mock("DELETE", "/v1/files/file_1")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    client.delete_publication("pub_1").await.unwrap();
    client.delete_file("file_1").await.unwrap();
}

#[tokio::test]
async fn test_upload_bytes_sends_multipart() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/files")
        .match_header("authorization", "Bearer qk_test")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="brief.md""#.into()),
            Matcher::Regex("(?i)content-type: text/markdown".into()),
            Matcher::Regex("# Launch brief".into()),
            Matcher::Regex(r#"name="purpose""#.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success":true,"data":{"id":"file_9","filename":"brief.md","size_bytes":14,"mime_type":"text/markdown","created_at":"2025-03-01T10:00:00Z"}}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let file = client
        .upload_bytes("brief.md", b"# Launch brief".to_vec(), Some("reference"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(file.id, "file_9");
    assert_eq!(file.size_bytes, 14);
}

#[tokio::test]
async fn test_upload_missing_file_is_io_error() {
    let server = Server::new_async().await;
    let client = client_for(&server);

    let err = client
        .upload_file("/definitely/not/here.pdf", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Io(_)));
}
