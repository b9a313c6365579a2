//! Streaming provider boundary
//!
//! Everything the service needs from the catalog goes through
//! [`MusicProvider`]. The bearer credential is an explicit argument on every
//! call; the provider holds no per-user state.

pub mod models;
pub mod oauth;
pub mod spotify_client;

pub use models::{
    PlaylistDetail, PlaylistSummary, PlaylistTrackItem, TrackObject, UserProfile,
};
pub use oauth::{Authorizer, SpotifyAuthorizer};
pub use spotify_client::SpotifyClient;

use async_trait::async_trait;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tunesift_common::{FeatureRecord, TrackId};

/// Provider call errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Bearer credential missing, expired or revoked (HTTP 401)
    #[error("Access token rejected by provider")]
    Unauthorized,

    /// Requested resource does not exist (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Provider throttled the request (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Provider returned an error response
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse provider response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::Parse(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

/// OAuth bearer credential
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: Option<Instant>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    /// Token that stops being usable after `lifetime`
    pub fn expiring_in(value: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            value: value.into(),
            expires_at: Some(Instant::now() + lifetime),
        }
    }

    pub fn secret(&self) -> &str {
        &self.value
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|deadline| Instant::now() >= deadline)
            .unwrap_or(false)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Catalog operations used by the service
#[async_trait]
pub trait MusicProvider: Send + Sync {
    /// Profile of the user owning `token`
    async fn current_user(&self, token: &AccessToken) -> Result<UserProfile, ProviderError>;

    /// One feature record per id, order-aligned with `ids`.
    ///
    /// Tracks without analysis (deleted, restricted) yield `None`.
    async fn audio_features(
        &self,
        token: &AccessToken,
        ids: &[TrackId],
    ) -> Result<Vec<Option<FeatureRecord>>, ProviderError>;

    /// Every item of a playlist, in playlist order
    async fn playlist_tracks(
        &self,
        token: &AccessToken,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistTrackItem>, ProviderError>;

    /// One page of the current user's playlists
    async fn owned_playlists(
        &self,
        token: &AccessToken,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistSummary>, ProviderError>;

    /// One page of public playlist search results
    async fn search_playlists(
        &self,
        token: &AccessToken,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistSummary>, ProviderError>;

    /// Create an empty public playlist, returning its id
    async fn create_playlist(
        &self,
        token: &AccessToken,
        user_id: &str,
        name: &str,
    ) -> Result<String, ProviderError>;

    /// Append tracks to a playlist, preserving order
    async fn add_tracks(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        ids: &[TrackId],
    ) -> Result<(), ProviderError>;

    /// Playlist detail including its public link and stored tracks
    async fn playlist(
        &self,
        token: &AccessToken,
        playlist_id: &str,
    ) -> Result<PlaylistDetail, ProviderError>;
}
