//! Remote platform error types.

use thiserror::Error;

/// Errors reported by the microblogging platform client.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PlatformError {
    #[error("access token rejected: {message}")]
    Unauthorized { message: String },

    #[error("access denied: {message}")]
    Forbidden { message: String },

    #[error("request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("rate limited by the platform")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("platform temporarily unavailable: {message}")]
    Unavailable { message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("failed to read media file: {message}")]
    Io { message: String },

    #[error("unexpected platform response: {message}")]
    Unexpected { message: String },
}

impl PlatformError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Creates rejection error.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Unavailable { .. } | Self::RateLimited { .. }
        )
    }
}
