//! Scoped working directory for a single publish call.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::domain::errors::MediaError;

const STAGING_PREFIX: &str = "mastorelay-";

/// Uniquely named temporary directory owned by one publish call.
///
/// Call [`StagingArea::release`] when done. If the guard is dropped without
/// being released (early return, panic), the directory is removed
/// synchronously on drop.
#[derive(Debug)]
pub struct StagingArea {
    path: PathBuf,
    released: bool,
}

impl StagingArea {
    /// Creates a fresh directory under `root`.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn acquire(root: &Path) -> Result<Self, MediaError> {
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(root)
            .map_err(|e| MediaError::staging(root, format!("failed to create directory: {e}")))?;
        let path = dir.keep();

        debug!(path = %path.display(), "Acquired staging area");

        Ok(Self {
            path,
            released: false,
        })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the raw file path for the attachment at `index`.
    #[must_use]
    pub fn raw_path(&self, index: usize) -> PathBuf {
        self.path.join(format!("image-{index}"))
    }

    /// Writes raw bytes for the attachment at `index`.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub async fn stage(&self, index: usize, bytes: &[u8]) -> Result<PathBuf, MediaError> {
        let path = self.raw_path(index);

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| MediaError::staging(&path, format!("failed to create file: {e}")))?;

        file.write_all(bytes)
            .await
            .map_err(|e| MediaError::staging(&path, format!("failed to write file: {e}")))?;

        file.flush()
            .await
            .map_err(|e| MediaError::staging(&path, format!("failed to flush file: {e}")))?;

        debug!(path = %path.display(), size = bytes.len(), "Staged attachment");
        Ok(path)
    }

    /// Removes the directory tree. Safe to call more than once.
    ///
    /// # Errors
    /// Returns error if an existing directory cannot be removed.
    pub async fn release(&mut self) -> io::Result<()> {
        self.released = true;
        remove_staging_dir(&self.path).await?;
        debug!(path = %self.path.display(), "Released staging area");
        Ok(())
    }

    /// Returns true once [`StagingArea::release`] has run.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed staging area on drop"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to remove staging area");
            }
        }
    }
}

/// Recursively removes `path`, treating a missing directory as success.
///
/// # Errors
/// Returns error for any failure other than the path not existing.
pub async fn remove_staging_dir(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Staging area already removed");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
