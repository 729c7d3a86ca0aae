//! File-based credential store adapter.
//!
//! Wraps [`CredentialsManager`] and implements the [`CredentialStore`]
//! trait from `crate::traits`.

use async_trait::async_trait;

use crate::auth::{Credentials, CredentialsManager};
use crate::traits::{CredentialStore, CredentialStoreError};

/// Credential store backed by `~/.snooze/.credentials.json`.
#[derive(Debug)]
pub struct FileCredentialStore {
    manager: CredentialsManager,
}

impl FileCredentialStore {
    /// Create a store under the user's home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        Some(Self {
            manager: CredentialsManager::new()?,
        })
    }

    /// Create a store over an explicit manager (used by tests).
    pub fn with_manager(manager: CredentialsManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>, CredentialStoreError> {
        let creds = self.manager.load();
        if creds.has_session() {
            Ok(Some(creds))
        } else {
            Ok(None)
        }
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialStoreError> {
        self.manager.save(creds)
    }

    async fn clear(&self) -> Result<(), CredentialStoreError> {
        self.manager.clear()
    }
}
