//! Spotify Web API response models (the subset this service reads)

use serde::{Deserialize, Serialize};
use tunesift_common::FeatureRecord;

/// GET /me
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserProfile {
    /// User id, used to address the user's playlists
    pub id: String,
    pub display_name: Option<String>,
}

/// Playlist as listed by /me/playlists and /search
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub owner: Option<PlaylistOwner>,
    pub tracks: Option<TracksRef>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl PlaylistSummary {
    pub fn owner_name(&self) -> Option<&str> {
        self.owner
            .as_ref()
            .and_then(|o| o.display_name.as_deref().or(Some(o.id.as_str())))
    }

    pub fn track_count(&self) -> Option<u32> {
        self.tracks.as_ref().map(|t| t.total)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistOwner {
    pub id: String,
    pub display_name: Option<String>,
}

/// Track count reference embedded in playlist summaries
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TracksRef {
    pub total: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Paged collection wrapper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    /// Absolute URL of the next page, if any
    pub next: Option<String>,
    pub total: Option<u32>,
}

/// One entry of a playlist's track list
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistTrackItem {
    /// Null when the track was removed from the catalog
    pub track: Option<TrackObject>,
}

/// Track (or episode) object inside a playlist item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackObject {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumRef {
    pub name: String,
}

/// GET /playlists/{id}
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub tracks: Paging<PlaylistTrackItem>,
}

/// GET /audio-features?ids=...
#[derive(Debug, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<FeatureRecord>>,
}

/// GET /search?type=playlist
#[derive(Debug, Deserialize)]
pub struct PlaylistSearchResponse {
    pub playlists: Paging<Option<PlaylistSummary>>,
}

/// POST /users/{id}/playlists
#[derive(Debug, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
}

/// POST https://accounts.spotify.com/api/token
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}
