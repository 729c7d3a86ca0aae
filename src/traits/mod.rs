//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HostEnvironment`] - user notification and view refresh, injected
//!   into mutating operations instead of ambient globals
//! - [`CredentialStore`] - persistence of the session `(token, username)`
//!   pair

pub mod credentials;
pub mod host;

pub use credentials::{CredentialStore, CredentialStoreError};
pub use host::HostEnvironment;
