//! Spotify Web API client
//!
//! Thin `reqwest` wrapper implementing [`MusicProvider`]. Every request
//! carries the caller's bearer token and the configured timeout; batch
//! endpoints are chunked to the provider's per-call limits.

use super::models::{
    AudioFeaturesResponse, CreatedPlaylist, Paging, PlaylistDetail, PlaylistSearchResponse,
    PlaylistSummary, PlaylistTrackItem, UserProfile,
};
use super::{AccessToken, MusicProvider, ProviderError};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tunesift_common::{FeatureRecord, TrackId};

pub const SPOTIFY_API_BASE_URL: &str = "https://api.spotify.com/v1";
const USER_AGENT: &str = concat!("TuneSift/", env!("CARGO_PKG_VERSION"));

/// Maximum ids per GET /audio-features call
pub const AUDIO_FEATURES_BATCH: usize = 100;

/// Maximum URIs per POST /playlists/{id}/tracks call
pub const ADD_TRACKS_BATCH: usize = 100;

/// Page size used when walking playlist items
const PLAYLIST_ITEMS_PAGE: u32 = 100;

/// Spotify Web API client
#[derive(Clone)]
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl SpotifyClient {
    /// Create a client against the public API
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        Self::with_base_url(SPOTIFY_API_BASE_URL, timeout)
    }

    /// Create a client against an alternate API root
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| ProviderError::Parse(format!("Invalid base URL {}: {}", base_url, e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Build `{base}/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Parse(format!("Base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send an authenticated request and map the HTTP status
    async fn send(
        &self,
        token: &AccessToken,
        request: RequestBuilder,
    ) -> Result<Response, ProviderError> {
        let response = request.bearer_auth(token.secret()).send().await?;

        let status = response.status();
        let url = response.url().to_string();

        match status {
            StatusCode::UNAUTHORIZED => Err(ProviderError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound(url)),
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited),
            s if !s.is_success() => {
                let error_text = response.text().await.unwrap_or_default();
                Err(ProviderError::Api(s.as_u16(), error_text))
            }
            _ => Ok(response),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        url: Url,
    ) -> Result<T, ProviderError> {
        tracing::debug!(url = %url, "Querying Spotify API");

        let response = self.send(token, self.http_client.get(url)).await?;
        response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }

    /// Follow `next` links until the collection is exhausted
    async fn collect_pages<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        first: Paging<T>,
    ) -> Result<Vec<T>, ProviderError> {
        let mut items = first.items;
        let mut next = first.next;

        while let Some(link) = next {
            let url = Url::parse(&link)
                .map_err(|e| ProviderError::Parse(format!("Invalid next link {}: {}", link, e)))?;
            let page: Paging<T> = self.get_json(token, url).await?;
            items.extend(page.items);
            next = page.next;
        }

        Ok(items)
    }
}

#[async_trait]
impl MusicProvider for SpotifyClient {
    async fn current_user(&self, token: &AccessToken) -> Result<UserProfile, ProviderError> {
        let url = self.endpoint(&["me"])?;
        self.get_json(token, url).await
    }

    async fn audio_features(
        &self,
        token: &AccessToken,
        ids: &[TrackId],
    ) -> Result<Vec<Option<FeatureRecord>>, ProviderError> {
        let mut records = Vec::with_capacity(ids.len());

        for batch in ids.chunks(AUDIO_FEATURES_BATCH) {
            let joined = batch
                .iter()
                .map(TrackId::as_str)
                .collect::<Vec<_>>()
                .join(",");

            let mut url = self.endpoint(&["audio-features"])?;
            url.query_pairs_mut().append_pair("ids", &joined);

            let response: AudioFeaturesResponse = self.get_json(token, url).await?;
            if response.audio_features.len() != batch.len() {
                return Err(ProviderError::Parse(format!(
                    "Expected {} audio feature records, got {}",
                    batch.len(),
                    response.audio_features.len()
                )));
            }
            records.extend(response.audio_features);
        }

        tracing::debug!(
            requested = ids.len(),
            missing = records.iter().filter(|r| r.is_none()).count(),
            "Fetched audio features"
        );

        Ok(records)
    }

    async fn playlist_tracks(
        &self,
        token: &AccessToken,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistTrackItem>, ProviderError> {
        let mut url = self.endpoint(&["playlists", playlist_id, "tracks"])?;
        url.query_pairs_mut()
            .append_pair("limit", &PLAYLIST_ITEMS_PAGE.to_string());

        let first: Paging<PlaylistTrackItem> = self.get_json(token, url).await?;
        self.collect_pages(token, first).await
    }

    async fn owned_playlists(
        &self,
        token: &AccessToken,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistSummary>, ProviderError> {
        let mut url = self.endpoint(&["me", "playlists"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());

        let page: Paging<Option<PlaylistSummary>> = self.get_json(token, url).await?;
        Ok(page.items.into_iter().flatten().collect())
    }

    async fn search_playlists(
        &self,
        token: &AccessToken,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistSummary>, ProviderError> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("type", "playlist")
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());

        let response: PlaylistSearchResponse = self.get_json(token, url).await?;
        Ok(response.playlists.items.into_iter().flatten().collect())
    }

    async fn create_playlist(
        &self,
        token: &AccessToken,
        user_id: &str,
        name: &str,
    ) -> Result<String, ProviderError> {
        let url = self.endpoint(&["users", user_id, "playlists"])?;
        let body = json!({ "name": name, "public": true });

        let response = self
            .send(token, self.http_client.post(url).json(&body))
            .await?;
        let created: CreatedPlaylist = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        tracing::info!(user_id = %user_id, playlist_id = %created.id, "Created playlist");
        Ok(created.id)
    }

    async fn add_tracks(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        ids: &[TrackId],
    ) -> Result<(), ProviderError> {
        let url = self.endpoint(&["playlists", playlist_id, "tracks"])?;

        for batch in ids.chunks(ADD_TRACKS_BATCH) {
            let uris: Vec<String> = batch.iter().map(TrackId::to_uri).collect();
            let body = json!({ "uris": uris });
            self.send(token, self.http_client.post(url.clone()).json(&body))
                .await?;
        }

        tracing::debug!(playlist_id = %playlist_id, count = ids.len(), "Added tracks");
        Ok(())
    }

    async fn playlist(
        &self,
        token: &AccessToken,
        playlist_id: &str,
    ) -> Result<PlaylistDetail, ProviderError> {
        let url = self.endpoint(&["playlists", playlist_id])?;
        let mut detail: PlaylistDetail = self.get_json(token, url).await?;

        if detail.tracks.next.is_some() {
            let first = Paging {
                items: std::mem::take(&mut detail.tracks.items),
                next: detail.tracks.next.take(),
                total: detail.tracks.total,
            };
            detail.tracks.items = self.collect_pages(token, first).await?;
        }

        Ok(detail)
    }
}
