//! Access token resolution use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::AccessToken;
use crate::domain::errors::SecretError;
use crate::domain::ports::TokenStoragePort;

/// Where the access token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Command line flag or environment variable.
    CommandLine,
    /// System keyring.
    Keyring,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandLine => write!(f, "command line / environment"),
            Self::Keyring => write!(f, "system keyring"),
        }
    }
}

/// Resolved token with its source.
#[derive(Debug, Clone)]
pub struct ResolvedToken {
    /// The access token.
    pub token: AccessToken,
    /// Source of the token.
    pub source: TokenSource,
}

impl ResolvedToken {
    /// Creates new resolved token.
    #[must_use]
    pub const fn new(token: AccessToken, source: TokenSource) -> Self {
        Self { token, source }
    }
}

/// Resolves the platform access token from available sources.
pub struct ResolveTokenUseCase {
    storage_port: Arc<dyn TokenStoragePort>,
}

impl ResolveTokenUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(storage_port: Arc<dyn TokenStoragePort>) -> Self {
        Self { storage_port }
    }

    /// Resolves token from CLI/env or keyring.
    ///
    /// Priority:
    /// 1. CLI/Env (passed as argument)
    /// 2. Keyring
    ///
    /// # Errors
    /// Returns [`SecretError::NotAvailable`] if no source yields a token.
    pub async fn execute(&self, cli_token: Option<String>) -> Result<ResolvedToken, SecretError> {
        if let Some(token_str) = cli_token.filter(|s| !s.trim().is_empty()) {
            debug!("Checking command-line/env token");
            if let Some(token) = AccessToken::new(token_str) {
                info!(token = %token, "Using token from command line / environment");
                return Ok(ResolvedToken::new(token, TokenSource::CommandLine));
            }
            warn!("Command-line token has invalid format, trying keyring");
        }

        debug!("Checking keyring for stored token");
        match self.storage_port.get_token().await {
            Ok(Some(token)) => {
                info!(token = %token, "Using token from system keyring");
                Ok(ResolvedToken::new(token, TokenSource::Keyring))
            }
            Ok(None) => Err(SecretError::NotAvailable(
                "pass --token, set MASTORELAY_TOKEN or store one in the keyring".to_string(),
            )),
            Err(e) => {
                debug!(error = %e, "Failed to check keyring");
                Err(SecretError::NotAvailable(format!("keyring lookup failed: {e}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockTokenStorage;

    const CLI_TOKEN: &str = "cli-token-0123456789abcdef";
    const STORED_TOKEN: &str = "stored-token-0123456789abcdef";

    #[tokio::test]
    async fn test_cli_token_priority() {
        let storage = Arc::new(MockTokenStorage::with_token(AccessToken::new_unchecked(
            STORED_TOKEN,
        )));
        let use_case = ResolveTokenUseCase::new(storage);

        let result = use_case.execute(Some(CLI_TOKEN.to_string())).await.unwrap();

        assert_eq!(result.source, TokenSource::CommandLine);
        assert_eq!(result.token.as_str(), CLI_TOKEN);
    }

    #[tokio::test]
    async fn test_keyring_fallback() {
        let storage = Arc::new(MockTokenStorage::with_token(AccessToken::new_unchecked(
            STORED_TOKEN,
        )));
        let use_case = ResolveTokenUseCase::new(storage);

        let result = use_case.execute(Some("   ".to_string())).await.unwrap();

        assert_eq!(result.source, TokenSource::Keyring);
        assert_eq!(result.token.as_str(), STORED_TOKEN);
    }

    #[tokio::test]
    async fn test_no_token_found() {
        let storage = Arc::new(MockTokenStorage::new());
        let use_case = ResolveTokenUseCase::new(storage);

        let result = use_case.execute(None).await;

        assert!(matches!(result, Err(SecretError::NotAvailable(_))));
    }

    #[tokio::test]
    async fn test_keyring_error_is_reported_as_unavailable() {
        let storage = Arc::new(MockTokenStorage::unavailable());
        let use_case = ResolveTokenUseCase::new(storage);

        let result = use_case.execute(None).await;

        assert!(matches!(result, Err(SecretError::NotAvailable(_))));
    }
}
