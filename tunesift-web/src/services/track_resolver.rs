//! Playlist lookup and track list extraction

use crate::provider::{AccessToken, MusicProvider, PlaylistSummary, PlaylistTrackItem, ProviderError};
use tunesift_common::TrackId;

/// Page size when listing the user's own playlists
pub const OWNED_PAGE_SIZE: u32 = 50;

/// Page size for public playlist search
pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Where to look for the source playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistLocator {
    /// Exact, case-insensitive name among the user's playlists
    Owned { name: String },
    /// Free-text query against public search
    Search { query: String },
}

impl PlaylistLocator {
    /// Build from the search form's `location` radio and name field.
    ///
    /// `local` selects the user's own playlists; anything else searches.
    /// The name is kept as typed: owned names compare by lowercase only.
    pub fn from_form(location: &str, name: &str) -> Self {
        let name = name.to_string();
        if location == "local" {
            PlaylistLocator::Owned { name }
        } else {
            PlaylistLocator::Search { query: name }
        }
    }

    /// True when the name or query holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }

    pub fn text(&self) -> &str {
        match self {
            PlaylistLocator::Owned { name } => name,
            PlaylistLocator::Search { query } => query,
        }
    }
}

/// Candidate playlists for `locator`; empty when nothing matches
pub async fn find_playlists(
    provider: &dyn MusicProvider,
    token: &AccessToken,
    locator: &PlaylistLocator,
) -> Result<Vec<PlaylistSummary>, ProviderError> {
    let found = match locator {
        PlaylistLocator::Owned { name } => {
            let wanted = name.to_lowercase();
            provider
                .owned_playlists(token, OWNED_PAGE_SIZE, 0)
                .await?
                .into_iter()
                .filter(|p| p.name.to_lowercase() == wanted)
                .collect::<Vec<_>>()
        }
        PlaylistLocator::Search { query } => {
            provider
                .search_playlists(token, query, SEARCH_PAGE_SIZE, 0)
                .await?
        }
    };

    tracing::debug!(locator = ?locator, matches = found.len(), "Playlist lookup");
    Ok(found)
}

/// Ordered track ids of a playlist.
///
/// A playlist that no longer exists resolves to no tracks.
pub async fn resolve_tracks(
    provider: &dyn MusicProvider,
    token: &AccessToken,
    playlist_id: &str,
) -> Result<Vec<TrackId>, ProviderError> {
    match provider.playlist_tracks(token, playlist_id).await {
        Ok(items) => Ok(track_ids(&items)),
        Err(ProviderError::NotFound(what)) => {
            tracing::warn!(playlist_id = %playlist_id, "Playlist not found: {}", what);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Extract catalog track ids, skipping removed tracks, local files and
/// episodes
pub fn track_ids(items: &[PlaylistTrackItem]) -> Vec<TrackId> {
    items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .filter_map(|track| match TrackId::from_uri(&track.uri) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::debug!(uri = %track.uri, "Skipping playlist item: {}", e);
                None
            }
        })
        .collect()
}
