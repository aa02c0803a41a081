//! Publish post use case implementation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::dto::{ItemOutcome, PublishOptions, PublishOutcome, SkipReason};
use crate::application::services::{ImageOptimizer, StagingArea};
use crate::domain::entities::{MediaId, Post, Status, StatusRequest};
use crate::domain::errors::PublishError;
use crate::domain::ports::{ImageFetcherPort, MicroblogPort};
use crate::domain::services::compose_caption;

/// Relays a post and its images to the microblogging platform.
///
/// Attachments are processed one after another inside a single staging
/// area: fetch, stage, optimize, upload. A failing attachment is skipped;
/// the status is published with whatever media made it through.
#[derive(Clone)]
pub struct PublishPostUseCase {
    fetcher: Arc<dyn ImageFetcherPort>,
    optimizer: ImageOptimizer,
    platform: Arc<dyn MicroblogPort>,
    options: PublishOptions,
}

impl PublishPostUseCase {
    /// Creates new publish use case.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn ImageFetcherPort>,
        optimizer: ImageOptimizer,
        platform: Arc<dyn MicroblogPort>,
        options: PublishOptions,
    ) -> Self {
        Self {
            fetcher,
            optimizer,
            platform,
            options,
        }
    }

    /// Publishes the post and returns the created status.
    ///
    /// # Errors
    /// Returns [`PublishError::NoAttachments`] if no image could be uploaded,
    /// or the platform error if status creation fails.
    pub async fn execute(&self, post: &Post) -> Result<Status, PublishError> {
        self.execute_with_report(post)
            .await
            .map(|outcome| outcome.status)
    }

    /// Publishes the post and returns the status with per-item outcomes.
    ///
    /// # Errors
    /// Same as [`PublishPostUseCase::execute`].
    pub async fn execute_with_report(&self, post: &Post) -> Result<PublishOutcome, PublishError> {
        let urls = post.attachment_urls(&self.options.attachment_delimiter);
        debug!(author = %post.author, attachments = urls.len(), "Publishing post");

        let items = self.upload_attachments(&urls).await;
        let media_ids: Vec<MediaId> = items
            .iter()
            .filter_map(ItemOutcome::media_id)
            .cloned()
            .collect();

        for item in &items {
            if let ItemOutcome::Skipped { url, reason } = item {
                debug!(url = %url, reason = %reason, "Attachment skipped");
            }
        }

        if media_ids.is_empty() {
            warn!(requested = urls.len(), "No attachments uploaded, not publishing");
            return Err(PublishError::no_attachments(urls.len()));
        }

        info!(
            requested = urls.len(),
            uploaded = media_ids.len(),
            "Attachments uploaded"
        );

        let caption = compose_caption(post, &self.options.hashtags);
        let request = StatusRequest::new(caption, self.options.visibility, media_ids);

        let status = self.platform.create_status(&request).await.map_err(|e| {
            error!(error = %e, "Failed to create status");
            e
        })?;

        info!(status_id = %status.id, link = %status.link(), "Status published");

        Ok(PublishOutcome { status, items })
    }

    /// Runs every attachment through the pipeline inside one staging area.
    ///
    /// Returns an empty list if the staging area cannot be created.
    async fn upload_attachments(&self, urls: &[String]) -> Vec<ItemOutcome> {
        let mut staging = match StagingArea::acquire(&self.options.staging_root) {
            Ok(staging) => staging,
            Err(e) => {
                error!(error = %e, "Cannot create staging area, aborting");
                return Vec::new();
            }
        };

        let mut items = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            items.push(self.process_attachment(&staging, index, url).await);
        }

        if let Err(e) = staging.release().await {
            warn!(path = %staging.path().display(), error = %e, "Failed to remove staging area");
        }

        items
    }

    async fn process_attachment(
        &self,
        staging: &StagingArea,
        index: usize,
        url: &str,
    ) -> ItemOutcome {
        let skipped = |reason: SkipReason| ItemOutcome::Skipped {
            url: url.to_string(),
            reason,
        };

        let bytes = match self.fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to fetch attachment");
                return skipped(SkipReason::Fetch(e));
            }
        };

        let raw = match staging.stage(index, &bytes).await {
            Ok(path) => path,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to stage attachment");
                return skipped(SkipReason::Stage(e));
            }
        };

        let artifact = self.optimizer.optimize(&raw).await;
        let upload_path = artifact.effective_path();

        match self.platform.create_media(upload_path).await {
            Ok(media_id) => {
                info!(url = %url, media_id = %media_id, "Attachment uploaded");
                ItemOutcome::Uploaded {
                    url: url.to_string(),
                    media_id,
                    compressed: artifact.is_compressed(),
                }
            }
            Err(e) => {
                warn!(
                    url = %url,
                    file = %upload_path.display(),
                    error = %e,
                    "Failed to upload attachment"
                );
                skipped(SkipReason::Upload(e))
            }
        }
    }
}
