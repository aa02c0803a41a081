use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{MediaId, Status, Visibility};

/// Mastodon media attachment response.
#[derive(Debug, Deserialize)]
pub struct MediaAttachmentResponse {
    /// Media ID.
    pub id: String,
    /// Attachment kind reported by the server.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Mastodon status creation body.
#[derive(Debug, Serialize)]
pub struct CreateStatusBody<'a> {
    /// Status text.
    pub status: &'a str,
    /// Visibility scope.
    pub visibility: Visibility,
    /// Attached media IDs.
    pub media_ids: Vec<&'a str>,
}

/// Mastodon status response.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    /// Status ID.
    pub id: String,
    /// ActivityPub URI.
    pub uri: String,
    /// HTML page URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Visibility scope.
    pub visibility: Visibility,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Attached media.
    #[serde(default)]
    pub media_attachments: Vec<MediaAttachmentResponse>,
}

impl From<StatusResponse> for Status {
    fn from(response: StatusResponse) -> Self {
        Self {
            id: response.id,
            uri: response.uri,
            url: response.url,
            visibility: response.visibility,
            created_at: response.created_at,
            media_ids: response
                .media_attachments
                .into_iter()
                .map(|media| MediaId::new(media.id))
                .collect(),
        }
    }
}

/// Mastodon API error response structure.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message from the server.
    pub error: String,
}
