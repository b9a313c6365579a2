//! Creates and populates the generated playlist

use crate::provider::{AccessToken, MusicProvider, PlaylistDetail, ProviderError, UserProfile};
use serde::Serialize;
use tunesift_common::TrackId;

/// Name given to every generated playlist
pub const DEFAULT_PLAYLIST_NAME: &str = "New Playlist!";

/// Generated playlist as stored by the provider
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistResult {
    pub playlist_id: String,
    /// Public link, when the provider reports one
    pub external_link: Option<String>,
    pub track_entries: Vec<TrackEntry>,
}

/// One stored track, for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackEntry {
    pub name: String,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub uri: String,
}

impl PlaylistResult {
    fn from_detail(detail: PlaylistDetail) -> Self {
        let track_entries = detail
            .tracks
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .map(|track| TrackEntry {
                name: track.name,
                artists: track.artists.into_iter().map(|a| a.name).collect(),
                album: track.album.map(|a| a.name),
                uri: track.uri,
            })
            .collect();

        Self {
            playlist_id: detail.id,
            external_link: detail.external_urls.spotify,
            track_entries,
        }
    }
}

/// Create a playlist for `user`, add `tracks` in order, and read it back
pub async fn assemble(
    provider: &dyn MusicProvider,
    token: &AccessToken,
    user: &UserProfile,
    tracks: &[TrackId],
) -> Result<PlaylistResult, ProviderError> {
    let playlist_id = provider
        .create_playlist(token, &user.id, DEFAULT_PLAYLIST_NAME)
        .await?;

    provider.add_tracks(token, &playlist_id, tracks).await?;

    let detail = provider.playlist(token, &playlist_id).await?;
    let result = PlaylistResult::from_detail(detail);

    tracing::info!(
        playlist_id = %result.playlist_id,
        requested = tracks.len(),
        stored = result.track_entries.len(),
        "Playlist assembled"
    );

    Ok(result)
}
