//! Data models for the story-sharing service.
//!
//! `Story`, `StoryList`, and `User` wrap the remote API: they decode the
//! service's camelCase JSON payloads, expose derived values (hostname), and
//! keep the local collections reconciled with the server after mutations.
//! Local copies are advisory; the server remains the source of truth for
//! favorite and own-story membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::{Host, Url};

use crate::api::ApiClient;
use crate::error::{SnoozeError, SnoozeResult};
use crate::traits::HostEnvironment;

/// A single story shared on the service.
///
/// Constructed by deserializing a server-provided record; immutable after
/// construction. The same story may appear in a [`StoryList`] and in a
/// user's favorites or own stories as independent copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Opaque server-assigned identifier.
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    /// Username of the submitter.
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Derive the registrable domain label from the story's URL: the host
    /// label one left of the TLD (`https://www.example.com/a` → `example`).
    ///
    /// Returns `None` if the URL does not parse or has no host. Single-label
    /// hosts and IP-address hosts are returned whole.
    pub fn host_name(&self) -> Option<String> {
        let parsed = Url::parse(&self.url).ok()?;
        match parsed.host()? {
            Host::Domain(domain) => {
                let labels: Vec<&str> = domain.split('.').collect();
                if labels.len() >= 2 {
                    Some(labels[labels.len() - 2].to_string())
                } else {
                    Some(domain.to_string())
                }
            }
            other => Some(other.to_string()),
        }
    }
}

/// Fields for a story that has not been submitted yet. The server assigns
/// the id, submitter, and timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct NewStory {
    pub title: String,
    pub author: String,
    pub url: String,
}

/// A user profile as returned by the API.
///
/// Own stories arrive under the `stories` key; [`User::from_profile`] maps
/// them into `own_stories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: Vec<Story>,
    #[serde(default)]
    pub stories: Vec<Story>,
}

/// An ordered collection of stories in server order.
///
/// The order reflects server-side ranking/recency. Duplicates are not
/// prevented; there is no incremental sync beyond the explicit mutations
/// below, so external changes require a fresh [`StoryList::fetch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryList {
    pub stories: Vec<Story>,
}

impl StoryList {
    pub fn new(stories: Vec<Story>) -> Self {
        Self { stories }
    }

    /// Fetch the full story list from the API.
    ///
    /// Unauthenticated. Transport/HTTP errors propagate to the caller
    /// unchanged; there is no retry layer.
    pub async fn fetch(client: &ApiClient) -> SnoozeResult<Self> {
        let stories = client.fetch_stories().await?;
        tracing::info!("fetched {} stories", stories.len());
        Ok(Self::new(stories))
    }

    /// Submit a new story on behalf of `user` and reconcile local state.
    ///
    /// Validates that all three fields are present and that the user holds
    /// a login token before any network call. On success, exactly one
    /// [`Story`] is built from the returned record; it is appended to the
    /// user's own stories and prepended to this list (the server ranks by
    /// recency). On request failure the host is notified and the typed
    /// error is returned; local state is untouched.
    pub async fn add_story(
        &mut self,
        client: &ApiClient,
        host: &dyn HostEnvironment,
        user: &mut User,
        new_story: NewStory,
    ) -> SnoozeResult<Story> {
        if new_story.title.is_empty() || new_story.author.is_empty() || new_story.url.is_empty() {
            return Err(SnoozeError::validation(
                "a story needs a title, an author, and a url",
            ));
        }
        if user.login_token.is_empty() {
            return Err(SnoozeError::NotAuthenticated);
        }

        let created = client.create_story(&user.login_token, &new_story).await;
        match created {
            Ok(story) => {
                user.own_stories.push(story.clone());
                self.stories.insert(0, story.clone());
                Ok(story)
            }
            Err(e) => {
                tracing::warn!(code = e.error_code(), "failed to create story: {}", e);
                host.notify_user(&e.user_message());
                Err(e.into())
            }
        }
    }
}

/// The signed-in user: profile, local favorite/own-story copies, and the
/// bearer token used by every mutating call.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Set-like ordered sequence; membership is tested by `story_id`.
    pub favorites: Vec<Story>,
    pub own_stories: Vec<Story>,
    /// Opaque bearer credential. Must be present for any mutating call.
    pub login_token: String,
}

impl User {
    /// Build a `User` from an API profile plus an issued token.
    pub fn from_profile(profile: UserProfile, token: String) -> Self {
        Self {
            username: profile.username,
            name: profile.name,
            created_at: profile.created_at,
            favorites: profile.favorites,
            own_stories: profile.stories,
            login_token: token,
        }
    }

    /// Register a new account and return the signed-in user.
    pub async fn signup(
        client: &ApiClient,
        username: &str,
        password: &str,
        name: &str,
    ) -> SnoozeResult<Self> {
        let response = client.signup(username, password, name).await?;
        tracing::info!(username = %response.user.username, "account created");
        Ok(Self::from_profile(response.user, response.token))
    }

    /// Log in to an existing account and return the signed-in user.
    pub async fn login(
        client: &ApiClient,
        username: &str,
        password: &str,
    ) -> SnoozeResult<Self> {
        let response = client.login(username, password).await?;
        tracing::info!(username = %response.user.username, "logged in");
        Ok(Self::from_profile(response.user, response.token))
    }

    /// Resume a session from a previously issued token.
    ///
    /// This is the one operation with a graceful-failure contract: any
    /// failure is logged and resolves to `None` ("no session") instead of
    /// propagating.
    pub async fn login_via_stored_credentials(
        client: &ApiClient,
        token: &str,
        username: &str,
    ) -> Option<Self> {
        match client.fetch_user(token, username).await {
            Ok(profile) => Some(Self::from_profile(profile, token.to_string())),
            Err(e) => {
                tracing::warn!(
                    code = e.error_code(),
                    "session restore for {} failed: {}",
                    username,
                    e
                );
                None
            }
        }
    }

    /// Check whether a story is in the local favorites, matched by id.
    pub fn is_favorite(&self, story_id: &str) -> bool {
        self.favorites.iter().any(|s| s.story_id == story_id)
    }

    /// Insert a story into the local favorites unless already present.
    pub fn add_favorite(&mut self, story: Story) {
        if !self.is_favorite(&story.story_id) {
            self.favorites.push(story);
        }
    }

    /// Remove a story from the local favorites by id. Removing an absent
    /// id is a no-op.
    pub fn remove_favorite(&mut self, story_id: &str) {
        self.favorites.retain(|s| s.story_id != story_id);
    }

    /// Remove a story from the local own-stories by id.
    pub fn remove_own_story(&mut self, story_id: &str) {
        self.own_stories.retain(|s| s.story_id != story_id);
    }

    /// Favorite the story if it isn't a favorite yet, unfavorite it if it
    /// is, then reconcile the local collection and refresh the host view.
    ///
    /// The favorite-add branch follows the server call with a single-story
    /// fetch, which both confirms the story exists and supplies the value
    /// inserted into `favorites`. On failure the host is notified and local
    /// state is left exactly as before the call.
    pub async fn toggle_favorite(
        &mut self,
        client: &ApiClient,
        host: &dyn HostEnvironment,
        story_id: &str,
    ) -> SnoozeResult<()> {
        if self.login_token.is_empty() {
            return Err(SnoozeError::NotAuthenticated);
        }

        if self.is_favorite(story_id) {
            let removed = client
                .remove_favorite(&self.login_token, &self.username, story_id)
                .await;
            match removed {
                Ok(()) => {
                    self.remove_favorite(story_id);
                    host.refresh_view();
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(code = e.error_code(), "failed to unfavorite story: {}", e);
                    host.notify_user("Error unfavoriting story");
                    Err(e.into())
                }
            }
        } else {
            let added = client
                .add_favorite(&self.login_token, &self.username, story_id)
                .await;
            let confirmed = match added {
                Ok(()) => client.fetch_story(story_id).await,
                Err(e) => Err(e),
            };
            match confirmed {
                Ok(story) => {
                    self.add_favorite(story);
                    host.refresh_view();
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(code = e.error_code(), "failed to favorite story: {}", e);
                    host.notify_user("Error favoriting story");
                    Err(e.into())
                }
            }
        }
    }

    /// Delete one of this user's stories by id, then reconcile.
    ///
    /// On success the story is removed from both `own_stories` and
    /// `favorites` and the host view is refreshed. On failure the host is
    /// notified and no local state changes.
    pub async fn delete_story(
        &mut self,
        client: &ApiClient,
        host: &dyn HostEnvironment,
        story_id: &str,
    ) -> SnoozeResult<()> {
        if self.login_token.is_empty() {
            return Err(SnoozeError::NotAuthenticated);
        }

        let deleted = client.delete_story(&self.login_token, story_id).await;
        match deleted {
            Ok(()) => {
                self.remove_own_story(story_id);
                self.remove_favorite(story_id);
                host.refresh_view();
                Ok(())
            }
            Err(e) => {
                tracing::error!(code = e.error_code(), "failed to delete story: {}", e);
                host.notify_user("Error deleting story");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(id: &str, url: &str) -> Story {
        Story {
            story_id: id.to_string(),
            title: "Title".to_string(),
            author: "Author".to_string(),
            url: url.to_string(),
            username: "poster".to_string(),
            created_at: Utc::now(),
        }
    }

    fn user_with_favorites(favorites: Vec<Story>) -> User {
        User {
            username: "tester".to_string(),
            name: "Test User".to_string(),
            created_at: Utc::now(),
            favorites,
            own_stories: Vec::new(),
            login_token: "token-abc".to_string(),
        }
    }

    #[test]
    fn test_story_deserialize_camel_case() {
        let json = r#"{
            "storyId": "story-1",
            "title": "First",
            "author": "Alice",
            "url": "https://www.example.com/a/b",
            "username": "alice",
            "createdAt": "2017-03-09T18:38:39.409Z"
        }"#;

        let story: Story = serde_json::from_str(json).unwrap();
        assert_eq!(story.story_id, "story-1");
        assert_eq!(story.username, "alice");
        assert_eq!(story.created_at.timezone(), Utc);
    }

    #[test]
    fn test_host_name_subdomain() {
        let s = story("s1", "https://www.example.com/a/b");
        assert_eq!(s.host_name(), Some("example".to_string()));
    }

    #[test]
    fn test_host_name_no_subdomain() {
        let s = story("s1", "https://example.com/path");
        assert_eq!(s.host_name(), Some("example".to_string()));
    }

    #[test]
    fn test_host_name_deep_subdomain() {
        let s = story("s1", "https://a.b.news.example.co/x");
        assert_eq!(s.host_name(), Some("example".to_string()));
    }

    #[test]
    fn test_host_name_single_label_host() {
        let s = story("s1", "http://localhost:8080/page");
        assert_eq!(s.host_name(), Some("localhost".to_string()));
    }

    #[test]
    fn test_host_name_ip_address() {
        let s = story("s1", "http://192.168.1.10/page");
        assert_eq!(s.host_name(), Some("192.168.1.10".to_string()));
    }

    #[test]
    fn test_host_name_malformed_url() {
        let s = story("s1", "not a url");
        assert_eq!(s.host_name(), None);
    }

    #[test]
    fn test_user_profile_maps_stories_to_own_stories() {
        let json = r#"{
            "username": "alice",
            "name": "Alice",
            "createdAt": "2018-11-14T10:58:52.768Z",
            "favorites": [],
            "stories": [{
                "storyId": "s-9",
                "title": "Mine",
                "author": "Alice",
                "url": "https://example.com",
                "username": "alice",
                "createdAt": "2018-11-14T10:58:52.768Z"
            }]
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        let user = User::from_profile(profile, "tok".to_string());
        assert_eq!(user.own_stories.len(), 1);
        assert_eq!(user.own_stories[0].story_id, "s-9");
        assert_eq!(user.login_token, "tok");
    }

    #[test]
    fn test_user_profile_missing_collections_default_empty() {
        let json = r#"{
            "username": "alice",
            "name": "Alice",
            "createdAt": "2018-11-14T10:58:52.768Z"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.favorites.is_empty());
        assert!(profile.stories.is_empty());
    }

    #[test]
    fn test_is_favorite_matches_by_id() {
        let user = user_with_favorites(vec![story("fav-1", "https://example.com")]);
        assert!(user.is_favorite("fav-1"));
        assert!(!user.is_favorite("fav-2"));
    }

    #[test]
    fn test_add_favorite_is_idempotent() {
        let mut user = user_with_favorites(Vec::new());
        user.add_favorite(story("fav-1", "https://example.com"));
        user.add_favorite(story("fav-1", "https://example.com"));
        assert_eq!(user.favorites.len(), 1);
    }

    #[test]
    fn test_remove_favorite_absent_id_is_noop() {
        let mut user = user_with_favorites(vec![story("fav-1", "https://example.com")]);
        user.remove_favorite("missing");
        assert_eq!(user.favorites.len(), 1);
    }

    #[test]
    fn test_remove_own_story() {
        let mut user = user_with_favorites(Vec::new());
        user.own_stories.push(story("s-1", "https://example.com"));
        user.own_stories.push(story("s-2", "https://example.com"));
        user.remove_own_story("s-1");
        assert_eq!(user.own_stories.len(), 1);
        assert_eq!(user.own_stories[0].story_id, "s-2");
    }

    #[test]
    fn test_story_list_preserves_order() {
        let list = StoryList::new(vec![
            story("s-3", "https://example.com"),
            story("s-1", "https://example.com"),
            story("s-2", "https://example.com"),
        ]);
        let ids: Vec<&str> = list.stories.iter().map(|s| s.story_id.as_str()).collect();
        assert_eq!(ids, vec!["s-3", "s-1", "s-2"]);
    }

    #[test]
    fn test_story_list_allows_duplicates() {
        let list = StoryList::new(vec![
            story("s-1", "https://example.com"),
            story("s-1", "https://example.com"),
        ]);
        assert_eq!(list.stories.len(), 2);
    }
}
