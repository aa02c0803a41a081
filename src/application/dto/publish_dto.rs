//! Publish pipeline DTOs.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::{MediaId, Status, Visibility};
use crate::domain::errors::{MediaError, PlatformError};
use crate::domain::services::DEFAULT_HASHTAGS;

/// Settings applied to every publish call.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Audience scope of the published status.
    pub visibility: Visibility,
    /// Separator between URLs in the attachment field.
    pub attachment_delimiter: String,
    /// Hashtag line appended to the caption.
    pub hashtags: String,
    /// Directory under which staging areas are created.
    pub staging_root: PathBuf,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            visibility: Visibility::default(),
            attachment_delimiter: ",".to_string(),
            hashtags: DEFAULT_HASHTAGS.to_string(),
            staging_root: std::env::temp_dir(),
        }
    }
}

/// Why an attachment was left out of the status.
#[derive(Debug, Error)]
pub enum SkipReason {
    /// Download failed.
    #[error("fetch failed: {0}")]
    Fetch(MediaError),
    /// Writing the staged file failed.
    #[error("staging failed: {0}")]
    Stage(MediaError),
    /// Media upload failed.
    #[error("upload failed: {0}")]
    Upload(PlatformError),
}

/// Result of processing one attachment.
#[derive(Debug)]
pub enum ItemOutcome {
    /// Attachment is on the platform.
    Uploaded {
        /// Source URL.
        url: String,
        /// Identifier returned by the platform.
        media_id: MediaId,
        /// Whether the compressed artifact was uploaded.
        compressed: bool,
    },
    /// Attachment was dropped.
    Skipped {
        /// Source URL.
        url: String,
        /// Failure that stopped this item.
        reason: SkipReason,
    },
}

impl ItemOutcome {
    /// Returns the media identifier of an uploaded item.
    #[must_use]
    pub const fn media_id(&self) -> Option<&MediaId> {
        match self {
            Self::Uploaded { media_id, .. } => Some(media_id),
            Self::Skipped { .. } => None,
        }
    }

    /// Returns the source URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Uploaded { url, .. } | Self::Skipped { url, .. } => url,
        }
    }
}

/// Successful publish with the per-item breakdown.
#[derive(Debug)]
pub struct PublishOutcome {
    /// Status created on the platform.
    pub status: Status,
    /// One entry per attachment URL, in input order.
    pub items: Vec<ItemOutcome>,
}

impl PublishOutcome {
    /// Returns the number of skipped attachments.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.items.iter().filter(|item| item.media_id().is_none()).count()
    }
}
