//! Per-attachment error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that cause a single attachment to be skipped.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum MediaError {
    #[error("unsupported image source {url}: {reason}")]
    UnsupportedSource { url: String, reason: String },

    #[error("failed to fetch {url}: {message}")]
    Network { url: String, message: String },

    #[error("failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("{url} is not a recognised image: {message}")]
    NotAnImage { url: String, message: String },

    #[error("staging failed for {}: {message}", .path.display())]
    Staging { path: PathBuf, message: String },
}

impl MediaError {
    /// Creates network error.
    #[must_use]
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates unsupported source error.
    #[must_use]
    pub fn unsupported(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedSource {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates staging error.
    #[must_use]
    pub fn staging(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Staging {
            path: path.into(),
            message: message.into(),
        }
    }
}
