//! Domain entity definitions.

mod post;
mod status;
mod token;
mod visibility;

pub use post::Post;
pub use status::{MediaId, Status, StatusRequest};
pub use token::AccessToken;
pub use visibility::{ParseVisibilityError, Visibility};
