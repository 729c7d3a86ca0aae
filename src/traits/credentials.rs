//! Credential store trait abstraction.
//!
//! Provides a trait-based abstraction for persisting the session
//! `(token, username)` pair, enabling dependency injection and mocking in
//! tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::Credentials;

/// Credential store operation errors.
#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    #[error("failed to load credentials: {0}")]
    LoadFailed(String),

    #[error("failed to save credentials: {0}")]
    SaveFailed(String),

    #[error("failed to clear credentials: {0}")]
    ClearFailed(String),
}

/// Trait for storage and retrieval of the session credentials.
///
/// Implementations include the production file-based store and an
/// in-memory mock for testing.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load stored credentials.
    ///
    /// Returns `Ok(None)` when no session is stored.
    async fn load(&self) -> Result<Option<Credentials>, CredentialStoreError>;

    /// Save credentials, replacing any stored session.
    async fn save(&self, creds: &Credentials) -> Result<(), CredentialStoreError>;

    /// Clear any stored session.
    async fn clear(&self) -> Result<(), CredentialStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_store_error_display() {
        assert_eq!(
            CredentialStoreError::LoadFailed("read error".to_string()).to_string(),
            "failed to load credentials: read error"
        );
        assert_eq!(
            CredentialStoreError::SaveFailed("write error".to_string()).to_string(),
            "failed to save credentials: write error"
        );
        assert_eq!(
            CredentialStoreError::ClearFailed("delete error".to_string()).to_string(),
            "failed to clear credentials: delete error"
        );
    }

    #[test]
    fn test_credential_store_error_clone() {
        let err = CredentialStoreError::LoadFailed("test".to_string());
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
