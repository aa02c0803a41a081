//! Domain error types.

mod compress_error;
mod media_error;
mod platform_error;
mod publish_error;
mod secret_error;

pub use compress_error::CompressError;
pub use media_error::MediaError;
pub use platform_error::PlatformError;
pub use publish_error::PublishError;
pub use secret_error::SecretError;
