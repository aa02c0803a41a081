//! Incoming post entity.

use serde::{Deserialize, Serialize};

/// Post received from the webhook layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Original message text.
    pub message: String,
    /// Display name of the original author.
    pub author: String,
    /// Link to the author's profile.
    pub author_link: String,
    /// Delimiter-joined list of image URLs.
    #[serde(default)]
    pub attachments: String,
}

impl Post {
    /// Creates a new post.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        author: impl Into<String>,
        author_link: impl Into<String>,
        attachments: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            author: author.into(),
            author_link: author_link.into(),
            attachments: attachments.into(),
        }
    }

    /// Splits the attachment field into ordered URLs.
    ///
    /// Entries are trimmed and empty entries are dropped.
    #[must_use]
    pub fn attachment_urls(&self, delimiter: &str) -> Vec<String> {
        if delimiter.is_empty() {
            let single = self.attachments.trim();
            return if single.is_empty() {
                Vec::new()
            } else {
                vec![single.to_string()]
            };
        }

        self.attachments
            .split(delimiter)
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://a/1.png", ",", &["https://a/1.png"] ; "single")]
    #[test_case("https://a/1.png,https://a/2.png", ",", &["https://a/1.png", "https://a/2.png"] ; "two")]
    #[test_case(" https://a/1.png , ,https://a/2.png ", ",", &["https://a/1.png", "https://a/2.png"] ; "whitespace_and_empty")]
    #[test_case("https://a/1.png https://a/2.png", " ", &["https://a/1.png", "https://a/2.png"] ; "space_delimiter")]
    #[test_case("", ",", &[] ; "empty")]
    #[test_case("  https://a/1.png  ", "", &["https://a/1.png"] ; "no_delimiter")]
    fn test_attachment_urls(attachments: &str, delimiter: &str, expected: &[&str]) {
        let urls = Post::new("m", "a", "l", attachments).attachment_urls(delimiter);
        assert_eq!(urls, expected);
    }

    #[test]
    fn test_split_preserves_order() {
        let post = Post::new("m", "a", "l", "https://x/3,https://x/1,https://x/2");
        let urls = post.attachment_urls(",");

        assert_eq!(urls, vec!["https://x/3", "https://x/1", "https://x/2"]);
    }

    #[test]
    fn test_deserialize_without_attachments() {
        let post: Post = serde_json::from_str(
            r#"{"message":"Hi","author":"Alice","author_link":"https://x/@alice"}"#,
        )
        .unwrap();

        assert!(post.attachments.is_empty());
        assert_eq!(post.author, "Alice");
    }
}
