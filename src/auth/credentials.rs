//! Credentials storage and management.
//!
//! This module provides functionality for storing and loading the session
//! `(token, username)` pair from `~/.snooze/.credentials.json`.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::traits::CredentialStoreError;

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".snooze";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// A stored session: the bearer token and the username it was issued for.
///
/// Only these two values are persisted. Profile data, favorites, and own
/// stories are always fetched from the server on session resume.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Opaque bearer token issued by signup/login.
    pub token: Option<String>,
    /// Username the token belongs to.
    pub username: Option<String>,
}

impl Credentials {
    /// Create new empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create credentials for a fresh session.
    pub fn for_session(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    /// Check if both halves of the session pair are present.
    pub fn has_session(&self) -> bool {
        self.token.is_some() && self.username.is_some()
    }
}

/// Manages credential storage and retrieval on disk.
#[derive(Debug)]
pub struct CredentialsManager {
    /// Path to the credentials file.
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a new CredentialsManager under the user's home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        let credentials_path = home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE);
        Some(Self { credentials_path })
    }

    /// Create a CredentialsManager with an explicit file path. Used by
    /// tests to avoid touching the real home directory.
    pub fn with_path(credentials_path: PathBuf) -> Self {
        Self { credentials_path }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &PathBuf {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// Returns default credentials if the file doesn't exist or can't be
    /// read as valid JSON.
    pub fn load(&self) -> Credentials {
        if !self.credentials_path.exists() {
            return Credentials::default();
        }

        let file = match File::open(&self.credentials_path) {
            Ok(f) => f,
            Err(_) => return Credentials::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(creds) => creds,
            Err(_) => Credentials::default(),
        }
    }

    /// Save credentials to the credentials file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, credentials: &Credentials) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.credentials_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| CredentialStoreError::SaveFailed(e.to_string()))?;
            }
        }

        let file = File::create(&self.credentials_path)
            .map_err(|e| CredentialStoreError::SaveFailed(e.to_string()))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, credentials)
            .map_err(|e| CredentialStoreError::SaveFailed(e.to_string()))?;

        writer
            .flush()
            .map_err(|e| CredentialStoreError::SaveFailed(e.to_string()))
    }

    /// Clear all stored credentials.
    ///
    /// Removing a file that doesn't exist is a success.
    pub fn clear(&self) -> Result<(), CredentialStoreError> {
        if !self.credentials_path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.credentials_path)
            .map_err(|e| CredentialStoreError::ClearFailed(e.to_string()))
    }
}
