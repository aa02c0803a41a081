//! HTTP image fetcher.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::errors::MediaError;
use crate::domain::ports::ImageFetcherPort;

const DEFAULT_USER_AGENT: &str = concat!("mastorelay/", env!("CARGO_PKG_VERSION"));

/// Configuration for the image fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFetcherConfig {
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Overall request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent sent with each request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ImageFetcherConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Downloads attachment images over HTTP(S), one attempt per URL.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    http_client: Client,
}

impl HttpImageFetcher {
    /// Creates a new fetcher.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &ImageFetcherConfig) -> Result<Self, MediaError> {
        let http_client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MediaError::network("", format!("failed to create HTTP client: {e}")))?;

        Ok(Self { http_client })
    }

    fn parse_source(url: &str) -> Result<Url, MediaError> {
        let parsed = Url::parse(url).map_err(|e| MediaError::unsupported(url, e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(MediaError::unsupported(
                url,
                format!("scheme '{scheme}' is not fetchable"),
            )),
        }
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, MediaError> {
        let source = Self::parse_source(url)?;

        debug!(url = %url, "Downloading image");

        let response = self.http_client.get(source).send().await.map_err(|e| {
            if e.is_timeout() {
                MediaError::network(url, "request timed out")
            } else if e.is_connect() {
                MediaError::network(url, "failed to connect")
            } else {
                MediaError::network(url, e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MediaError::network(url, format!("failed to read body: {e}")))?;

        let format = image::guess_format(&bytes).map_err(|e| {
            warn!(url = %url, size = bytes.len(), "Downloaded body is not an image");
            MediaError::NotAnImage {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        debug!(url = %url, size = bytes.len(), format = ?format, "Image downloaded");
        Ok(bytes)
    }
}
