//! Data transfer objects for the application layer.

mod publish_dto;

pub use publish_dto::{ItemOutcome, PublishOptions, PublishOutcome, SkipReason};
