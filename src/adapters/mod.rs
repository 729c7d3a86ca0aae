//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`TerminalHost`] - host environment backed by the terminal
//! - [`FileCredentialStore`] - file-based credential storage
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::RecordingHost`] - records notifications and view refreshes
//! - [`mock::InMemoryCredentialStore`] - in-memory credential storage

pub mod file_credentials;
pub mod mock;
pub mod terminal_host;

pub use file_credentials::FileCredentialStore;
pub use terminal_host::TerminalHost;
