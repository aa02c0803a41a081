//! Staged image optimization through an external compressor.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::CompressError;
use crate::domain::ports::{CompressOptions, Compressor};

/// Tuning for the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerSettings {
    /// Baseline quality on a 0-100 scale.
    pub quality: u8,
    /// Images wider than this are downscaled.
    pub resize_threshold: u32,
    /// Width used when downscaling.
    pub resize_width: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            quality: 80,
            resize_threshold: 3840,
            resize_width: 2000,
        }
    }
}

impl OptimizerSettings {
    /// Computes compressor options for an image of the given width.
    #[must_use]
    pub const fn options_for_width(&self, width: u32) -> CompressOptions {
        let options = CompressOptions::new(self.quality);
        if width > self.resize_threshold {
            options.with_resize(self.resize_width)
        } else {
            options
        }
    }
}

/// Artifact to upload for a staged image.
#[derive(Debug)]
pub enum OptimizeOutcome {
    /// Compressed sibling file was produced.
    Compressed {
        /// Path of the compressed file.
        path: PathBuf,
    },
    /// Compression did not happen; the raw file stands in.
    Skipped {
        /// Path of the raw staged file.
        original: PathBuf,
        /// Why compression was skipped.
        reason: CompressError,
    },
}

impl OptimizeOutcome {
    /// Returns the file that should be uploaded.
    #[must_use]
    pub fn effective_path(&self) -> &Path {
        match self {
            Self::Compressed { path } => path,
            Self::Skipped { original, .. } => original,
        }
    }

    /// Returns true if the compressed artifact exists.
    #[must_use]
    pub const fn is_compressed(&self) -> bool {
        matches!(self, Self::Compressed { .. })
    }
}

/// Converts staged images into compressed artifacts.
#[derive(Clone)]
pub struct ImageOptimizer {
    compressor: Arc<dyn Compressor>,
    settings: OptimizerSettings,
}

impl std::fmt::Debug for ImageOptimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageOptimizer")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ImageOptimizer {
    /// Creates a new optimizer.
    #[must_use]
    pub fn new(compressor: Arc<dyn Compressor>, settings: OptimizerSettings) -> Self {
        Self {
            compressor,
            settings,
        }
    }

    /// Optimizes the raw file at `raw`.
    ///
    /// Never fails: every problem is logged and reported as
    /// [`OptimizeOutcome::Skipped`] so the raw file is uploaded instead.
    pub async fn optimize(&self, raw: &Path) -> OptimizeOutcome {
        let skip = |reason: CompressError| OptimizeOutcome::Skipped {
            original: raw.to_path_buf(),
            reason,
        };

        if !self.compressor.is_available().await {
            warn!(
                file = %raw.display(),
                "Compression tool unavailable, uploading original image"
            );
            return skip(CompressError::Unavailable);
        }

        let (width, height) = match read_dimensions(raw).await {
            Ok(dimensions) => dimensions,
            Err(e) => {
                warn!(file = %raw.display(), error = %e, "Could not read image dimensions");
                return skip(e);
            }
        };

        let options = self.settings.options_for_width(width);
        let output = compressed_path(raw, self.compressor.extension());

        debug!(
            file = %raw.display(),
            width,
            height,
            resize = ?options.resize_width,
            "Compressing image"
        );

        match self.compressor.compress(raw, &output, &options).await {
            Ok(()) => {
                info!(file = %output.display(), "Image compressed");
                OptimizeOutcome::Compressed { path: output }
            }
            Err(e) => {
                warn!(file = %raw.display(), error = %e, "Compression failed, uploading original");
                skip(e)
            }
        }
    }
}

/// Returns `<raw>.<extension>`.
#[must_use]
pub fn compressed_path(raw: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(raw.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Reads pixel dimensions, sniffing the format from file contents.
async fn read_dimensions(path: &Path) -> Result<(u32, u32), CompressError> {
    let owned = path.to_path_buf();
    let unreadable = |message: String| CompressError::UnreadableImage {
        path: path.to_path_buf(),
        message,
    };

    tokio::task::spawn_blocking(move || -> Result<(u32, u32), String> {
        image::ImageReader::open(&owned)
            .and_then(image::ImageReader::with_guessed_format)
            .map_err(|e| e.to_string())?
            .into_dimensions()
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| unreadable(format!("dimension task panicked: {e}")))?
    .map_err(unreadable)
}
