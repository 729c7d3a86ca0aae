//! HTTP client for the story-sharing API.

pub mod client;

pub use client::{ApiClient, ApiError, AuthResponse, DEFAULT_API_URL};
