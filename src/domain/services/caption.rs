//! Status caption composition.

use crate::domain::entities::Post;

/// Hashtag line appended to every relayed status.
pub const DEFAULT_HASHTAGS: &str = "#cute #moe #anime #artwork #mastoart #dotmoe";

/// Composes the status caption for a relayed post.
///
/// Layout: the original message, a blank line, a markdown link crediting the
/// author, a blank line, then the hashtag line.
#[must_use]
pub fn compose_caption(post: &Post, hashtags: &str) -> String {
    format!(
        "{}\n\n[{}]({})\n\n{}",
        post.message, post.author, post.author_link, hashtags
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_caption() {
        let post = Post::new("Hi", "Alice", "https://x/@alice", "");

        assert_eq!(
            compose_caption(&post, DEFAULT_HASHTAGS),
            "Hi\n\n[Alice](https://x/@alice)\n\n#cute #moe #anime #artwork #mastoart #dotmoe"
        );
    }

    #[test]
    fn test_compose_caption_keeps_multiline_message() {
        let post = Post::new("line one\nline two", "Bob", "https://x/@bob", "");
        let caption = compose_caption(&post, "#art");

        assert!(caption.starts_with("line one\nline two\n\n[Bob]"));
        assert!(caption.ends_with("\n\n#art"));
    }
}
