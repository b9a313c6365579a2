//! tunesift-web library - playlist generation by audio features
//!
//! Signs the user in with Spotify, finds a source playlist, and creates a new
//! playlist holding only the tracks whose audio features match the requested
//! targets.

pub mod api;
pub mod error;
pub mod provider;
pub mod services;
pub mod session;

pub use crate::error::{ServiceError, ServiceResult};

use axum::Router;
use provider::{Authorizer, MusicProvider};
use session::SessionStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog client; carries no per-user state
    pub provider: Arc<dyn MusicProvider>,
    /// OAuth authorization-code flow
    pub authorizer: Arc<dyn Authorizer>,
    /// Session id -> bearer credential
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(provider: Arc<dyn MusicProvider>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            provider,
            authorizer,
            sessions: SessionStore::new(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::auth_routes())
        .merge(api::playlist_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
