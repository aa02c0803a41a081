//! Image compression error types.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons the compressed artifact was not produced.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CompressError {
    #[error("compression tool is not available")]
    Unavailable,

    #[error("cannot read image dimensions of {}: {message}", .path.display())]
    UnreadableImage { path: PathBuf, message: String },

    #[error("failed to launch compression tool: {message}")]
    Spawn { message: String },

    #[error("compression tool exited unsuccessfully (code {code:?}): {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("compression tool timed out after {secs}s")]
    Timeout { secs: u64 },
}
