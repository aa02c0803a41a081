#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

pub const TOKEN: &str = "test-access-token-0123";

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height))
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecordedStatus {
    pub body: Value,
    pub authorization: Option<String>,
    pub idempotency_key: Option<String>,
}

/// Minimal Mastodon instance that records what it receives.
#[derive(Debug, Clone, Default)]
pub struct FakeInstance {
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    statuses: Arc<Mutex<Vec<RecordedStatus>>>,
}

impl FakeInstance {
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/v2/media", post(upload_media))
            .route("/api/v1/statuses", post(create_status))
            .with_state(self.clone())
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<RecordedStatus> {
        self.statuses.lock().unwrap().clone()
    }
}

fn header_value(headers: &HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

async fn upload_media(
    State(instance): State<FakeInstance>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let authorization = header_value(&headers, header::AUTHORIZATION);
    if authorization.as_deref() != Some(format!("Bearer {TOKEN}").as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "The access token is invalid" })),
        );
    }

    let mut uploads = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(ToString::to_string);
        let content_type = field.content_type().map(ToString::to_string);
        let data = field.bytes().await.unwrap();
        uploads.push(RecordedUpload {
            field: name,
            file_name,
            content_type,
            size: data.len(),
            authorization: authorization.clone(),
        });
    }

    let mut recorded = instance.uploads.lock().unwrap();
    recorded.extend(uploads);
    let id = (41 + recorded.len()).to_string();

    (
        StatusCode::OK,
        Json(json!({ "id": id, "type": "image", "url": null })),
    )
}

async fn create_status(
    State(instance): State<FakeInstance>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let media_attachments: Vec<Value> = body["media_ids"]
        .as_array()
        .map(|ids| {
            ids.iter()
                .map(|id| json!({ "id": id, "type": "image" }))
                .collect()
        })
        .unwrap_or_default();

    let response = json!({
        "id": "109",
        "uri": "https://relay.test/users/bot/statuses/109",
        "url": "https://relay.test/@bot/109",
        "visibility": body["visibility"],
        "created_at": "2026-10-19T12:00:00.000Z",
        "media_attachments": media_attachments,
    });

    instance.statuses.lock().unwrap().push(RecordedStatus {
        body,
        authorization: header_value(&headers, header::AUTHORIZATION),
        idempotency_key: header_value(&headers, "idempotency-key"),
    });

    (StatusCode::OK, Json(response))
}
