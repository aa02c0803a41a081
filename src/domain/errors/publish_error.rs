//! Publish pipeline error types.

use thiserror::Error;

use super::PlatformError;

/// Terminal failures of a publish call.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Not a single attachment made it to the platform.
    #[error("no attachments: none of the {requested} image(s) could be uploaded")]
    NoAttachments {
        /// Number of attachment URLs in the post.
        requested: usize,
    },

    /// Status submission was rejected or failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl PublishError {
    /// Creates no-attachments error.
    #[must_use]
    pub const fn no_attachments(requested: usize) -> Self {
        Self::NoAttachments { requested }
    }
}
