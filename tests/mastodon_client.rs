mod common;

use std::path::PathBuf;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::post;
use common::{FakeInstance, TOKEN, png_bytes, spawn_server};
use mastorelay::domain::entities::{AccessToken, MediaId, StatusRequest, Visibility};
use mastorelay::domain::errors::PlatformError;
use mastorelay::domain::ports::MicroblogPort;
use mastorelay::infrastructure::MastodonClient;
use tempfile::TempDir;

fn client(base_url: &str) -> MastodonClient {
    MastodonClient::new(base_url, AccessToken::new_unchecked(TOKEN)).unwrap()
}

fn staged_png(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, png_bytes(8, 8)).unwrap();
    path
}

#[tokio::test]
async fn test_create_media_uploads_multipart_file() {
    let instance = FakeInstance::default();
    let base_url = spawn_server(instance.router()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = staged_png(&dir, "image-0");

    let media_id = client(&base_url).create_media(&path).await.unwrap();

    assert_eq!(media_id, MediaId::from("42"));
    let uploads = instance.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].field, "file");
    assert_eq!(uploads[0].file_name.as_deref(), Some("image-0.png"));
    assert_eq!(uploads[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(uploads[0].size, png_bytes(8, 8).len());
    assert_eq!(
        uploads[0].authorization.as_deref(),
        Some(format!("Bearer {TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_create_media_tolerates_trailing_slash_in_base_url() {
    let instance = FakeInstance::default();
    let base_url = spawn_server(instance.router()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = staged_png(&dir, "image-3");

    let result = client(&format!("{base_url}/")).create_media(&path).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_media_with_bad_token_is_unauthorized() {
    let instance = FakeInstance::default();
    let base_url = spawn_server(instance.router()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = staged_png(&dir, "image-0");

    let client =
        MastodonClient::new(base_url, AccessToken::new_unchecked("wrong-token-value")).unwrap();
    let result = client.create_media(&path).await;

    match result {
        Err(PlatformError::Unauthorized { message }) => {
            assert_eq!(message, "The access token is invalid");
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
    assert!(instance.uploads().is_empty());
}

#[tokio::test]
async fn test_create_media_missing_file_is_io_error() {
    let instance = FakeInstance::default();
    let base_url = spawn_server(instance.router()).await;
    let dir = tempfile::tempdir().unwrap();

    let result = client(&base_url)
        .create_media(&dir.path().join("image-9"))
        .await;

    assert!(matches!(result, Err(PlatformError::Io { .. })));
}

#[tokio::test]
async fn test_create_status_sends_json_body() {
    let instance = FakeInstance::default();
    let base_url = spawn_server(instance.router()).await;

    let request = StatusRequest::new(
        "hello\n\n[bob](https://example.com/bob)\n\n#art".to_string(),
        Visibility::Unlisted,
        vec![MediaId::from("42"), MediaId::from("43")],
    );
    let status = client(&base_url).create_status(&request).await.unwrap();

    assert_eq!(status.id, "109");
    assert_eq!(status.link(), "https://relay.test/@bot/109");
    assert_eq!(status.visibility, Visibility::Unlisted);
    assert_eq!(
        status.media_ids,
        vec![MediaId::from("42"), MediaId::from("43")]
    );

    let recorded = instance.statuses();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].body["status"], request.text.as_str());
    assert_eq!(recorded[0].body["visibility"], "unlisted");
    assert_eq!(recorded[0].body["media_ids"], serde_json::json!(["42", "43"]));
    assert!(recorded[0].idempotency_key.is_some());
    assert_eq!(
        recorded[0].authorization.as_deref(),
        Some(format!("Bearer {TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_create_status_validation_failure_is_rejected() {
    let router = Router::new().route(
        "/api/v1/statuses",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                axum::Json(
                    serde_json::json!({ "error": "Validation failed: Text can't be blank" }),
                ),
            )
        }),
    );
    let base_url = spawn_server(router).await;

    let request = StatusRequest::new(String::new(), Visibility::Public, Vec::new());
    let result = client(&base_url).create_status(&request).await;

    match result {
        Err(PlatformError::Rejected { status, message }) => {
            assert_eq!(status, 422);
            assert!(message.contains("Validation failed"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let router = Router::new().route(
        "/api/v1/statuses",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, "30")],
                "Too many requests",
            )
        }),
    );
    let base_url = spawn_server(router).await;

    let request = StatusRequest::new("text".to_string(), Visibility::Public, Vec::new());
    let result = client(&base_url).create_status(&request).await;

    assert!(matches!(
        result,
        Err(PlatformError::RateLimited {
            retry_after_secs: Some(30)
        })
    ));
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let router = Router::new().route(
        "/api/v1/statuses",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base_url = spawn_server(router).await;

    let request = StatusRequest::new("text".to_string(), Visibility::Public, Vec::new());
    let result = client(&base_url).create_status(&request).await;

    assert!(matches!(result, Err(PlatformError::Unavailable { .. })));
}

#[tokio::test]
async fn test_unreachable_instance_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let request = StatusRequest::new("text".to_string(), Visibility::Public, Vec::new());
    let result = client(&format!("http://{addr}"))
        .create_status(&request)
        .await;

    assert!(result.unwrap_err().is_network_error());
}
