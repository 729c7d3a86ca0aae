//! Snooze - a client for the Hack or Snooze story-sharing service
//!
//! This library exposes the data-model layer ([`models::Story`],
//! [`models::StoryList`], [`models::User`]), the HTTP API client
//! ([`api::ApiClient`]), the unified error type ([`error::SnoozeError`]),
//! and the host-environment seams used by the CLI and by integration
//! tests.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod error;
pub mod models;
pub mod traits;
