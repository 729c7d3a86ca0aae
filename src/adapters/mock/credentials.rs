//! In-memory credential store for testing.
//!
//! Stores the session pair in memory, suitable for testing without file
//! system access. Each operation can be switched to fail to exercise error
//! paths.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::auth::Credentials;
use crate::traits::{CredentialStore, CredentialStoreError};

/// In-memory credential store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: Arc<Mutex<Option<Credentials>>>,
    save_should_fail: Arc<Mutex<bool>>,
    load_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryCredentialStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with an initial session.
    pub fn with_credentials(creds: Credentials) -> Self {
        let store = Self::default();
        *store.credentials.lock().unwrap() = Some(creds);
        store
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>, CredentialStoreError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(CredentialStoreError::LoadFailed(
                "mock load failure".to_string(),
            ));
        }
        Ok(self.credentials.lock().unwrap().clone())
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialStoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(CredentialStoreError::SaveFailed(
                "mock save failure".to_string(),
            ));
        }
        *self.credentials.lock().unwrap() = Some(creds.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialStoreError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(CredentialStoreError::ClearFailed(
                "mock clear failure".to_string(),
            ));
        }
        *self.credentials.lock().unwrap() = None;
        Ok(())
    }
}
