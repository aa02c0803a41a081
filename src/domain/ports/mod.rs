mod compressor_port;
mod image_fetcher_port;
mod microblog_port;
mod token_storage_port;

#[cfg(test)]
pub use compressor_port::MockCompressor;
pub use compressor_port::{CompressOptions, Compressor};
pub use image_fetcher_port::ImageFetcherPort;
pub use microblog_port::MicroblogPort;
pub use token_storage_port::TokenStoragePort;
