//! Mastorelay - relays posts with images to a Mastodon account.
//!
//! A post's attachment URLs are downloaded into a scoped staging directory,
//! optionally transcoded with `cwebp`, uploaded as media, and finally
//! published as a single captioned status.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "mastorelay";
