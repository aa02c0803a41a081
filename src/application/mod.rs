//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Pipeline services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{ItemOutcome, PublishOptions, PublishOutcome, SkipReason};
pub use services::{ImageOptimizer, OptimizerSettings, StagingArea};
pub use use_cases::{PublishPostUseCase, ResolveTokenUseCase, ResolvedToken, TokenSource};
