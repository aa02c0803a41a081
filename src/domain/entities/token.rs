//! Platform access token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer token for the remote platform, masked when printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken {
    value: String,
}

impl AccessToken {
    const MIN_TOKEN_LENGTH: usize = 8;

    /// Creates new token with format validation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.len() < Self::MIN_TOKEN_LENGTH {
            return None;
        }

        if value.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self { value })
    }

    /// Creates token without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.value.len() <= 10 {
            return "*".repeat(self.value.len());
        }

        let visible_prefix = &self.value[..4];
        let visible_suffix = &self.value[self.value.len() - 4..];
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "zQ3shXtj6nF0aLrPc9bq1oWcYVv2Mx8s";

    #[test]
    fn test_valid_token_creation() {
        let token = AccessToken::new(format!("  {RAW}\n"));
        assert_eq!(token.map(|t| t.as_str().to_string()), Some(RAW.to_string()));
    }

    #[test]
    fn test_invalid_token_too_short() {
        assert!(AccessToken::new("short").is_none());
    }

    #[test]
    fn test_invalid_token_inner_whitespace() {
        assert!(AccessToken::new("abcd efgh ijkl").is_none());
    }

    #[test]
    fn test_token_masking() {
        let token = AccessToken::new_unchecked(RAW);
        let masked = token.masked();

        assert!(masked.contains("..."));
        assert!(!masked.contains(RAW));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = AccessToken::new_unchecked(RAW);
        let debug_output = format!("{token:?}");

        assert!(!debug_output.contains(RAW));
    }
}
