//! Use case implementations.

mod publish_post_use_case;
mod resolve_token_use_case;

pub use publish_post_use_case::PublishPostUseCase;
pub use resolve_token_use_case::{ResolveTokenUseCase, ResolvedToken, TokenSource};
