//! API client for the Hack or Snooze story service.
//!
//! This module provides the HTTP client for the remote story API: story
//! listing and retrieval, story creation and deletion, account signup and
//! login, session restore, and favorite management.
//!
//! The service authenticates mutating calls with a bearer token carried in
//! the request body (`{"token": ...}`), and session restore with a `token`
//! query parameter. There is no Authorization header in this wire contract.

use reqwest::Client;
use serde::Deserialize;

use crate::models::{NewStory, Story, UserProfile};

/// Default URL for the story API.
pub const DEFAULT_API_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

/// Error type for API client operations.
#[derive(Debug)]
pub enum ApiError {
    /// HTTP request failed (connection, DNS, timeout).
    Http(reqwest::Error),
    /// JSON deserialization failed.
    Json(serde_json::Error),
    /// Server returned an error status.
    Server { status: u16, message: String },
}

impl ApiError {
    /// Check if this error is likely transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http(e) => e.is_timeout() || e.is_connect(),
            ApiError::Json(_) => false,
            ApiError::Server { status, .. } => *status >= 500 || *status == 429 || *status == 408,
        }
    }

    /// Get a message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http(e) if e.is_timeout() => {
                "The request timed out. The server may be slow or unreachable.".to_string()
            }
            ApiError::Http(_) => {
                "Unable to reach the server. Please check your internet connection.".to_string()
            }
            ApiError::Json(_) => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
            ApiError::Server { status, .. } => match *status {
                400 => "The request was invalid. Please check your input and try again."
                    .to_string(),
                401 => "Authentication required. Please sign in again.".to_string(),
                403 => "Access denied. You don't have permission for this action.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                409 => "That username is already taken.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The server is experiencing issues. Please try again later."
                    .to_string(),
                _ => format!("The server returned an error (HTTP {}).", status),
            },
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Http(_) => "E_API_HTTP",
            ApiError::Json(_) => "E_API_JSON",
            ApiError::Server { .. } => "E_API_STATUS",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "HTTP error: {}", e),
            ApiError::Json(e) => write!(f, "JSON error: {}", e),
            ApiError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            ApiError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e)
    }
}

/// Wrapper for the story-list response (GET /stories).
#[derive(Debug, Clone, Deserialize)]
struct StoriesResponse {
    stories: Vec<Story>,
}

/// Wrapper for single-story responses (GET/POST /stories).
#[derive(Debug, Clone, Deserialize)]
struct StoryResponse {
    story: Story,
}

/// Wrapper for profile responses (GET /users/{username}).
#[derive(Debug, Clone, Deserialize)]
struct UserResponse {
    user: UserProfile,
}

/// Response from the signup and login endpoints: a profile plus a freshly
/// issued bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Client for the story API.
///
/// Holds a reusable `reqwest::Client`; bearer tokens are passed per call
/// because the wire contract puts them in the request body, not in a
/// header the client could attach uniformly.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL for the story API.
    pub base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new ApiClient against the default deployment.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Create a new ApiClient with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Fetch the full story list in server order.
    ///
    /// GET /stories (no auth)
    pub async fn fetch_stories(&self) -> Result<Vec<Story>, ApiError> {
        let url = format!("{}/stories", self.base_url);

        let response = self.client.get(&url).send().await?;
        let data: StoriesResponse = Self::decode(response).await?;
        Ok(data.stories)
    }

    /// Fetch a single story by id.
    ///
    /// GET /stories/{storyId} (no auth)
    pub async fn fetch_story(&self, story_id: &str) -> Result<Story, ApiError> {
        let url = format!(
            "{}/stories/{}",
            self.base_url,
            urlencoding::encode(story_id)
        );

        let response = self.client.get(&url).send().await?;
        let data: StoryResponse = Self::decode(response).await?;
        Ok(data.story)
    }

    /// Create a new story on behalf of the token's user.
    ///
    /// POST /stories with `{token, story: {author, title, url}}`
    pub async fn create_story(&self, token: &str, story: &NewStory) -> Result<Story, ApiError> {
        let url = format!("{}/stories", self.base_url);

        let body = serde_json::json!({
            "token": token,
            "story": {
                "author": story.author,
                "title": story.title,
                "url": story.url,
            },
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let data: StoryResponse = Self::decode(response).await?;
        Ok(data.story)
    }

    /// Delete a story by id.
    ///
    /// DELETE /stories/{storyId} with `{token}`
    pub async fn delete_story(&self, token: &str, story_id: &str) -> Result<(), ApiError> {
        let url = format!(
            "{}/stories/{}",
            self.base_url,
            urlencoding::encode(story_id)
        );

        let body = serde_json::json!({ "token": token });

        let response = self.client.delete(&url).json(&body).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Register a new account.
    ///
    /// POST /signup with `{user: {username, password, name}}`
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/signup", self.base_url);

        let body = serde_json::json!({
            "user": {
                "username": username,
                "password": password,
                "name": name,
            },
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let response = Self::check_status(response).await?;

        let text = response.text().await?;
        let data: AuthResponse = serde_json::from_str(&text)?;
        Ok(data)
    }

    /// Log in to an existing account.
    ///
    /// POST /login with `{user: {username, password}}`
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/login", self.base_url);

        let body = serde_json::json!({
            "user": {
                "username": username,
                "password": password,
            },
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let response = Self::check_status(response).await?;

        let text = response.text().await?;
        let data: AuthResponse = serde_json::from_str(&text)?;
        Ok(data)
    }

    /// Fetch a user profile with a previously issued token.
    ///
    /// GET /users/{username}?token=...
    pub async fn fetch_user(&self, token: &str, username: &str) -> Result<UserProfile, ApiError> {
        let url = format!(
            "{}/users/{}",
            self.base_url,
            urlencoding::encode(username)
        );

        let response = self
            .client
            .get(&url)
            .query(&[("token", token)])
            .send()
            .await?;
        let data: UserResponse = Self::decode(response).await?;
        Ok(data.user)
    }

    /// Mark a story as a favorite of the given user.
    ///
    /// POST /users/{username}/favorites/{storyId} with `{token}`
    pub async fn add_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/users/{}/favorites/{}",
            self.base_url,
            urlencoding::encode(username),
            urlencoding::encode(story_id)
        );

        let body = serde_json::json!({ "token": token });

        let response = self.client.post(&url).json(&body).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Remove a story from the given user's favorites.
    ///
    /// DELETE /users/{username}/favorites/{storyId} with `{token}`
    pub async fn remove_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/users/{}/favorites/{}",
            self.base_url,
            urlencoding::encode(username),
            urlencoding::encode(story_id)
        );

        let body = serde_json::json!({ "token": token });

        let response = self.client.delete(&url).json(&body).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Reject non-2xx responses, preserving the status and body text.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Server { status, message });
        }
        Ok(response)
    }

    /// Check the status and decode the JSON body.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let data = response.json().await?;
        Ok(data)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
