//! Application services.

mod image_optimizer;
mod staging_area;

pub use image_optimizer::{ImageOptimizer, OptimizeOutcome, OptimizerSettings, compressed_path};
pub use staging_area::{StagingArea, remove_staging_dir};
