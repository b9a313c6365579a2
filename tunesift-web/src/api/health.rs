//! Liveness endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Build identification captured by `build.rs`
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub git_hash: &'static str,
    pub built_at: &'static str,
    pub profile: &'static str,
}

impl BuildInfo {
    pub const CURRENT: BuildInfo = BuildInfo {
        git_hash: env!("GIT_HASH"),
        built_at: env!("BUILD_TIMESTAMP"),
        profile: env!("BUILD_PROFILE"),
    };
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Signed-in browsers with a live credential
    pub active_sessions: usize,
    pub build: BuildInfo,
}

/// GET /health
///
/// Needs no session; never calls the streaming provider.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: "tunesift",
        version: env!("CARGO_PKG_VERSION"),
        active_sessions: state.sessions.len().await,
        build: BuildInfo::CURRENT,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
