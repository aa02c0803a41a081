//! Image handling infrastructure.
//!
//! This module provides:
//! - HTTP download of attachment images
//! - `cwebp` transcoding through a subprocess

pub mod cwebp;
pub mod fetcher;

pub use cwebp::{CompressorConfig, CwebpCompressor};
pub use fetcher::{HttpImageFetcher, ImageFetcherConfig};
