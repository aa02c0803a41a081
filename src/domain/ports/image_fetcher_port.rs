//! Image fetching port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::MediaError;

/// Port for retrieving raw image bytes from a remote source.
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Downloads the image behind `url`.
    async fn fetch(&self, url: &str) -> Result<Bytes, MediaError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock fetcher serving canned bytes per URL.
    ///
    /// Unknown URLs fail with a network error.
    #[derive(Default)]
    pub struct MockImageFetcher {
        images: HashMap<String, Bytes>,
        requested: Mutex<Vec<String>>,
    }

    impl MockImageFetcher {
        /// Creates mock with no images.
        pub fn new() -> Self {
            Self::default()
        }

        /// Serves `bytes` for `url`.
        pub fn with_image(mut self, url: &str, bytes: impl Into<Bytes>) -> Self {
            self.images.insert(url.to_string(), bytes.into());
            self
        }

        /// Returns the URLs requested so far.
        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageFetcherPort for MockImageFetcher {
        async fn fetch(&self, url: &str) -> Result<Bytes, MediaError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.images
                .get(url)
                .cloned()
                .ok_or_else(|| MediaError::network(url, "mock: connection refused"))
        }
    }
}
