//! Shared test fixtures: in-memory provider and authorizer

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tunesift_common::{FeatureRecord, TrackId};
use tunesift_web::provider::models::{ExternalUrls, Paging, PlaylistOwner, TracksRef};
use tunesift_web::provider::{
    AccessToken, Authorizer, MusicProvider, PlaylistDetail, PlaylistSummary, PlaylistTrackItem,
    ProviderError, TrackObject, UserProfile,
};
use tunesift_web::session::SESSION_COOKIE;
use tunesift_web::{build_router, AppState};

pub const GOOD_CODE: &str = "good-code";
pub const AUTHORIZE_URL: &str = "https://accounts.example.test/authorize?client_id=test";

/// Failure injected into every provider call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Failure {
    Unauthorized,
    Unavailable,
    Timeout,
}

/// In-memory catalog
#[derive(Default)]
pub struct FakeProvider {
    pub user_id: String,
    pub owned: Vec<PlaylistSummary>,
    pub public: Vec<PlaylistSummary>,
    pub playlists: HashMap<String, Vec<PlaylistTrackItem>>,
    pub features: HashMap<TrackId, FeatureRecord>,
    pub failure: Mutex<Option<Failure>>,
    pub calls: Mutex<Vec<String>>,
    /// Generated playlist id -> tracks added, in order
    pub created: Mutex<Vec<(String, String, Vec<TrackId>)>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            user_id: "listener".to_string(),
            ..Default::default()
        }
    }

    pub fn fail_with(&self, failure: Failure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<(String, String, Vec<TrackId>)> {
        self.created.lock().unwrap().clone()
    }

    fn enter(&self, op: &str) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(op.to_string());
        match *self.failure.lock().unwrap() {
            Some(Failure::Unauthorized) => Err(ProviderError::Unauthorized),
            Some(Failure::Unavailable) => Err(ProviderError::Api(503, "unavailable".to_string())),
            Some(Failure::Timeout) => Err(ProviderError::Timeout),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MusicProvider for FakeProvider {
    async fn current_user(&self, _token: &AccessToken) -> Result<UserProfile, ProviderError> {
        self.enter("current_user")?;
        Ok(UserProfile {
            id: self.user_id.clone(),
            display_name: Some("Listener".to_string()),
        })
    }

    async fn audio_features(
        &self,
        _token: &AccessToken,
        ids: &[TrackId],
    ) -> Result<Vec<Option<FeatureRecord>>, ProviderError> {
        self.enter("audio_features")?;
        Ok(ids.iter().map(|id| self.features.get(id).cloned()).collect())
    }

    async fn playlist_tracks(
        &self,
        _token: &AccessToken,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistTrackItem>, ProviderError> {
        self.enter("playlist_tracks")?;
        self.playlists
            .get(playlist_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(playlist_id.to_string()))
    }

    async fn owned_playlists(
        &self,
        _token: &AccessToken,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistSummary>, ProviderError> {
        self.enter("owned_playlists")?;
        Ok(self
            .owned
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn search_playlists(
        &self,
        _token: &AccessToken,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistSummary>, ProviderError> {
        self.enter("search_playlists")?;
        let query = query.to_lowercase();
        Ok(self
            .public
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&query))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create_playlist(
        &self,
        _token: &AccessToken,
        user_id: &str,
        name: &str,
    ) -> Result<String, ProviderError> {
        self.enter("create_playlist")?;
        let mut created = self.created.lock().unwrap();
        let id = format!("generated{}", created.len() + 1);
        created.push((id.clone(), format!("{}:{}", user_id, name), Vec::new()));
        Ok(id)
    }

    async fn add_tracks(
        &self,
        _token: &AccessToken,
        playlist_id: &str,
        ids: &[TrackId],
    ) -> Result<(), ProviderError> {
        self.enter("add_tracks")?;
        let mut created = self.created.lock().unwrap();
        let entry = created
            .iter_mut()
            .find(|(id, _, _)| id == playlist_id)
            .ok_or_else(|| ProviderError::NotFound(playlist_id.to_string()))?;
        entry.2.extend_from_slice(ids);
        Ok(())
    }

    async fn playlist(
        &self,
        _token: &AccessToken,
        playlist_id: &str,
    ) -> Result<PlaylistDetail, ProviderError> {
        self.enter("playlist")?;
        let created = self.created.lock().unwrap();
        let (id, _, tracks) = created
            .iter()
            .find(|(id, _, _)| id == playlist_id)
            .ok_or_else(|| ProviderError::NotFound(playlist_id.to_string()))?;

        Ok(PlaylistDetail {
            id: id.clone(),
            name: "New Playlist!".to_string(),
            external_urls: ExternalUrls {
                spotify: Some(format!("https://open.spotify.com/playlist/{}", id)),
            },
            tracks: Paging {
                items: tracks.iter().map(|t| track_item(t.as_str())).collect(),
                next: None,
                total: Some(tracks.len() as u32),
            },
        })
    }
}

/// Authorizer accepting only [`GOOD_CODE`]
pub struct FakeAuthorizer;

#[async_trait]
impl Authorizer for FakeAuthorizer {
    fn authorize_url(&self) -> String {
        AUTHORIZE_URL.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, ProviderError> {
        if code == GOOD_CODE {
            Ok(AccessToken::new("valid-token"))
        } else {
            Err(ProviderError::Unauthorized)
        }
    }
}

pub fn tid(id: &str) -> TrackId {
    TrackId::new(id).unwrap()
}

pub fn summary(id: &str, name: &str) -> PlaylistSummary {
    PlaylistSummary {
        id: id.to_string(),
        name: name.to_string(),
        owner: Some(PlaylistOwner {
            id: "owner".to_string(),
            display_name: Some("Owner".to_string()),
        }),
        tracks: Some(TracksRef { total: 3 }),
        external_urls: ExternalUrls::default(),
    }
}

pub fn track_item(id: &str) -> PlaylistTrackItem {
    PlaylistTrackItem {
        track: Some(TrackObject {
            uri: format!("spotify:track:{}", id),
            name: format!("Song {}", id),
            artists: Vec::new(),
            album: None,
        }),
    }
}

/// Record with the given danceability and tempo; everything else at 0.5
pub fn record(id: &str, danceability: f64, tempo: f64) -> FeatureRecord {
    FeatureRecord {
        id: tid(id),
        acousticness: 0.5,
        liveness: 0.5,
        danceability,
        speechiness: 0.5,
        tempo,
        instrumentalness: 0.5,
        valence: 0.5,
        energy: 0.5,
    }
}

/// Catalog with a four-track source playlist `src1`:
/// - `aaa` danceability 0.80, 125 BPM
/// - `bbb` danceability 0.10, 125 BPM
/// - `ccc` danceability 0.75, 170 BPM
/// - `ddd` no audio features
pub fn catalog() -> FakeProvider {
    let mut provider = FakeProvider::new();
    provider.owned = vec![
        summary("own1", "Road Trip"),
        summary("own2", "Road Trip Extended"),
        summary("own3", "Focus"),
    ];
    provider.public = vec![summary("pub1", "Lofi Beats"), summary("pub2", "Lofi Study")];
    provider.playlists.insert(
        "src1".to_string(),
        ["aaa", "bbb", "ccc", "ddd"].iter().map(|id| track_item(id)).collect(),
    );
    for r in [
        record("aaa", 0.80, 125.0),
        record("bbb", 0.10, 125.0),
        record("ccc", 0.75, 170.0),
    ] {
        provider.features.insert(r.id.clone(), r);
    }
    provider
}

pub fn test_state(provider: Arc<FakeProvider>) -> AppState {
    AppState::new(provider, Arc::new(FakeAuthorizer))
}

pub fn test_app(state: &AppState) -> Router {
    build_router(state.clone())
}

/// Open a session directly in the store and return its `Cookie` header value
pub async fn sign_in(state: &AppState) -> String {
    let id = state.sessions.create(AccessToken::new("valid-token")).await;
    format!("{}={}", SESSION_COOKIE, id)
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
