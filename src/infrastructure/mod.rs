//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image download and compression.
pub mod image;
/// Mastodon API client.
pub mod mastodon;
/// Token storage adapters.
pub mod storage;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use image::{CompressorConfig, CwebpCompressor, HttpImageFetcher, ImageFetcherConfig};
pub use mastodon::MastodonClient;
pub use storage::KeyringTokenStorage;
