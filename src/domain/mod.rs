//! Domain layer with core entities, errors, services and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Domain services.
pub mod services;

pub use entities::{AccessToken, MediaId, Post, Status, StatusRequest, Visibility};
pub use errors::{CompressError, MediaError, PlatformError, PublishError, SecretError};
pub use ports::{CompressOptions, Compressor, ImageFetcherPort, MicroblogPort, TokenStoragePort};
