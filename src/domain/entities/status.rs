//! Published status and media identifiers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Visibility;

/// Opaque identifier of an uploaded media object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(String);

impl MediaId {
    /// Creates a media identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MediaId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Status submission payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRequest {
    /// Caption text.
    pub text: String,
    /// Audience scope.
    pub visibility: Visibility,
    /// Attached media, in display order.
    pub media_ids: Vec<MediaId>,
}

impl StatusRequest {
    /// Creates a status request.
    #[must_use]
    pub const fn new(text: String, visibility: Visibility, media_ids: Vec<MediaId>) -> Self {
        Self {
            text,
            visibility,
            media_ids,
        }
    }
}

/// Status record returned by the remote platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Remote status ID.
    pub id: String,
    /// Canonical URI of the status.
    pub uri: String,
    /// HTML page of the status, if any.
    pub url: Option<String>,
    /// Audience scope applied by the server.
    pub visibility: Visibility,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Attached media, in display order.
    pub media_ids: Vec<MediaId>,
}

impl Status {
    /// Returns the browsable link, falling back to the URI.
    #[must_use]
    pub fn link(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.uri)
    }
}
