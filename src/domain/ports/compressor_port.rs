//! External image compressor capability.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::CompressError;

/// Options passed to the compression tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Quality on a 0-100 scale.
    pub quality: u8,
    /// Target width when downscaling; height follows proportionally.
    pub resize_width: Option<u32>,
}

impl CompressOptions {
    /// Creates options with the given quality and no resize.
    #[must_use]
    pub const fn new(quality: u8) -> Self {
        Self {
            quality,
            resize_width: None,
        }
    }

    /// Adds a resize directive.
    #[must_use]
    pub const fn with_resize(mut self, width: u32) -> Self {
        self.resize_width = Some(width);
        self
    }

    /// Renders the options as command-line flags.
    ///
    /// A height of `0` keeps the aspect ratio.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-q".to_string(), self.quality.to_string()];
        if let Some(width) = self.resize_width {
            args.extend(["-resize".to_string(), width.to_string(), "0".to_string()]);
        }
        args
    }
}

/// Capability for transcoding a staged image with an external codec.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Compressor: Send + Sync {
    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &'static str;

    /// Probes whether the tool can be invoked.
    async fn is_available(&self) -> bool;

    /// Compresses `input` into `output`.
    async fn compress(
        &self,
        input: &Path,
        output: &Path,
        options: &CompressOptions,
    ) -> Result<(), CompressError>;
}
