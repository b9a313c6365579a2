//! Filtered playlist generation
//!
//! Track Resolver -> Feature Filter -> Playlist Assembler, run once per
//! request with the caller's credential.

pub mod feature_filter;
pub mod playlist_assembler;
pub mod track_resolver;

pub use playlist_assembler::{PlaylistResult, TrackEntry, DEFAULT_PLAYLIST_NAME};
pub use track_resolver::PlaylistLocator;

use crate::error::ServiceResult;
use crate::provider::{AccessToken, MusicProvider};
use tunesift_common::FeatureTargets;

/// Result of a generation request
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    /// A new playlist was created
    Created(PlaylistResult),
    /// No track survived the filter; nothing was created
    NoMatch,
}

/// Generate a playlist from the tracks of `playlist_id` matching `targets`
pub async fn build_filtered_playlist(
    provider: &dyn MusicProvider,
    token: &AccessToken,
    playlist_id: &str,
    targets: &FeatureTargets,
) -> ServiceResult<BuildOutcome> {
    let candidates = track_resolver::resolve_tracks(provider, token, playlist_id).await?;
    let survivors = feature_filter::filter(provider, token, candidates, targets).await?;

    if survivors.is_empty() {
        tracing::info!(playlist_id = %playlist_id, "No tracks matched the requested features");
        return Ok(BuildOutcome::NoMatch);
    }

    let user = provider.current_user(token).await?;
    let result = playlist_assembler::assemble(provider, token, &user, &survivors).await?;
    Ok(BuildOutcome::Created(result))
}
