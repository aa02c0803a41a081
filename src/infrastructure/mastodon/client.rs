//! Mastodon REST API client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::{CreateStatusBody, ErrorResponse, MediaAttachmentResponse, StatusResponse};
use crate::domain::entities::{AccessToken, MediaId, Status, StatusRequest};
use crate::domain::errors::PlatformError;
use crate::domain::ports::MicroblogPort;

const USER_AGENT: &str = concat!("mastorelay/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Mastodon API client for media and status endpoints.
pub struct MastodonClient {
    client: Client,
    base_url: String,
    token: AccessToken,
}

impl std::fmt::Debug for MastodonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MastodonClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl MastodonClient {
    /// Creates client for the given instance.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, token: AccessToken) -> Result<Self, PlatformError> {
        Self::with_timeout(base_url, token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates client with a custom request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_timeout(
        base_url: impl Into<String>,
        token: AccessToken,
        timeout: Duration,
    ) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn map_send_error(e: &reqwest::Error) -> PlatformError {
        warn!(error = %e, "Failed to reach Mastodon instance");
        if e.is_timeout() {
            PlatformError::network("request timed out")
        } else if e.is_connect() {
            PlatformError::network("failed to connect to instance")
        } else {
            PlatformError::network(e.to_string())
        }
    }

    async fn handle_error_response(response: reqwest::Response) -> PlatformError {
        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let error_message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.error,
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::UNAUTHORIZED => PlatformError::Unauthorized {
                message: error_message,
            },
            StatusCode::FORBIDDEN => PlatformError::Forbidden {
                message: error_message,
            },
            StatusCode::TOO_MANY_REQUESTS => PlatformError::RateLimited { retry_after_secs },
            s if s.is_server_error() => PlatformError::Unavailable {
                message: error_message,
            },
            s if s.is_client_error() => PlatformError::rejected(s.as_u16(), error_message),
            _ => PlatformError::unexpected(format!(
                "unexpected response: {status} - {error_message}"
            )),
        }
    }
}

/// Returns the upload file name and MIME type for a staged file.
///
/// The format is sniffed from the contents; staged raw files carry no
/// extension.
fn describe_upload(path: &Path, bytes: &[u8]) -> (String, &'static str) {
    let stem = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();

    match image::guess_format(bytes) {
        Ok(format) => {
            let has_extension = path.extension().is_some();
            let name = match format.extensions_str().first() {
                Some(ext) if !has_extension => format!("{stem}.{ext}"),
                _ => stem,
            };
            (name, format.to_mime_type())
        }
        Err(_) => (stem, "application/octet-stream"),
    }
}

#[async_trait]
impl MicroblogPort for MastodonClient {
    async fn create_media(&self, path: &Path) -> Result<MediaId, PlatformError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| PlatformError::Io {
            message: format!("{}: {e}", path.display()),
        })?;

        let (file_name, mime) = describe_upload(path, &bytes);
        debug!(file = %file_name, mime, size = bytes.len(), "Uploading media");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| PlatformError::unexpected(format!("invalid MIME type: {e}")))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("/api/v2/media"))
            .bearer_auth(self.token.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let media: MediaAttachmentResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse media response");
            PlatformError::unexpected(format!("failed to parse response: {e}"))
        })?;

        debug!(media_id = %media.id, kind = ?media.kind, "Media created");
        Ok(MediaId::new(media.id))
    }

    async fn create_status(&self, request: &StatusRequest) -> Result<Status, PlatformError> {
        let body = CreateStatusBody {
            status: &request.text,
            visibility: request.visibility,
            media_ids: request.media_ids.iter().map(MediaId::as_str).collect(),
        };
        let idempotency_key = uuid::Uuid::new_v4().to_string();

        debug!(
            visibility = %request.visibility,
            media = request.media_ids.len(),
            "Creating status"
        );

        let response = self
            .client
            .post(self.endpoint("/api/v1/statuses"))
            .bearer_auth(self.token.as_str())
            .header("Idempotency-Key", idempotency_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let status: StatusResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse status response");
            PlatformError::unexpected(format!("failed to parse response: {e}"))
        })?;

        debug!(status_id = %status.id, "Status created");
        Ok(status.into())
    }
}
