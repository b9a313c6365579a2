//! Feature-matching filter
//!
//! Keeps the tracks of a candidate set whose measured audio features fall
//! within tolerance of every active target. Removal only: the output is an
//! order-preserving subsequence of the input.

use crate::provider::{AccessToken, MusicProvider, ProviderError};
use std::collections::HashSet;
use tunesift_common::{FeatureRecord, FeatureTargets, TrackId};

/// Filter `candidates` against `targets` using records aligned by position.
///
/// A candidate is dropped when its record is missing or any active target is
/// out of band. Every occurrence of a dropped id goes, so a track listed
/// twice is kept or removed as a whole.
pub fn filter_candidates(
    candidates: Vec<TrackId>,
    targets: &FeatureTargets,
    records: &[Option<FeatureRecord>],
) -> Vec<TrackId> {
    if targets.is_empty() {
        return candidates;
    }

    let rejected: HashSet<TrackId> = candidates
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            !records
                .get(*i)
                .and_then(Option::as_ref)
                .is_some_and(|record| targets.matches(record))
        })
        .map(|(_, id)| id.clone())
        .collect();

    candidates
        .into_iter()
        .filter(|id| !rejected.contains(id))
        .collect()
}

/// Fetch features for `candidates` and keep the matching tracks.
///
/// Skips the provider entirely when there is nothing to evaluate.
pub async fn filter(
    provider: &dyn MusicProvider,
    token: &AccessToken,
    candidates: Vec<TrackId>,
    targets: &FeatureTargets,
) -> Result<Vec<TrackId>, ProviderError> {
    if candidates.is_empty() || targets.is_empty() {
        return Ok(candidates);
    }

    let records = provider.audio_features(token, &candidates).await?;
    let total = candidates.len();
    let survivors = filter_candidates(candidates, targets, &records);

    tracing::info!(
        candidates = total,
        survivors = survivors.len(),
        active_targets = targets.len(),
        "Feature filter pass complete"
    );

    Ok(survivors)
}
