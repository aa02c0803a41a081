//! Domain services.

mod caption;

pub use caption::{DEFAULT_HASHTAGS, compose_caption};
