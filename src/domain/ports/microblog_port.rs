//! Microblogging platform port definition.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::entities::{MediaId, Status, StatusRequest};
use crate::domain::errors::PlatformError;

/// Port for the remote platform's media and status endpoints.
#[async_trait]
pub trait MicroblogPort: Send + Sync {
    /// Uploads the file at `path` as a new media object.
    async fn create_media(&self, path: &Path) -> Result<MediaId, PlatformError>;

    /// Publishes a status.
    async fn create_status(&self, request: &StatusRequest) -> Result<Status, PlatformError>;
}
