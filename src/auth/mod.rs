//! Session credentials for the snooze client.
//!
//! The API issues an opaque bearer token on signup/login; this module owns
//! the `(token, username)` pair and its on-disk persistence so a session
//! can be resumed across runs.

pub mod credentials;

pub use credentials::{Credentials, CredentialsManager};
