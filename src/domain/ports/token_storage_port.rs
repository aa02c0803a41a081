//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AccessToken;
use crate::domain::errors::SecretError;

/// Port for access token persistence.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored token.
    async fn get_token(&self) -> Result<Option<AccessToken>, SecretError>;

    /// Stores token securely.
    async fn store_token(&self, token: &AccessToken) -> Result<(), SecretError>;

    /// Deletes stored token.
    async fn delete_token(&self) -> Result<(), SecretError>;
}
