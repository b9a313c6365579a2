//! Sign-in routes: provider consent redirect, callback, sign-out

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::ui;
use crate::error::ServiceResult;
use crate::session::{clear_session_cookie, session_cookie, session_id_from_headers};
use crate::AppState;

/// Query string the provider appends when redirecting back
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// Set when the user declined consent (e.g. `access_denied`)
    pub error: Option<String>,
}

/// GET /
///
/// Sends the browser to the provider's consent page.
pub async fn login(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.authorizer.authorize_url())
}

/// GET /callback?code=...
///
/// Exchanges the authorization code, opens a session and continues to the
/// playlist search page.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> ServiceResult<Response> {
    if let Some(error) = query.error {
        warn!("Authorization declined: {}", error);
        return Ok(declined());
    }

    let Some(code) = query.code.filter(|c| !c.trim().is_empty()) else {
        warn!("Callback without authorization code");
        return Ok(declined());
    };

    let token = state.authorizer.exchange_code(&code).await?;
    let session_id = state.sessions.create(token).await;
    info!(session_id = %session_id, "Session started");

    Ok((
        [(header::SET_COOKIE, session_cookie(&session_id))],
        Redirect::to("/search"),
    )
        .into_response())
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(session_id) = session_id_from_headers(&headers) {
        state.sessions.remove(&session_id).await;
        info!(session_id = %session_id, "Session ended");
    }

    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Html(ui::signed_out_page()),
    )
        .into_response()
}

fn declined() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Html(ui::error_page(
            "Authorization declined",
            "Spotify did not grant access to your account.",
            ("/", "Try again"),
        )),
    )
        .into_response()
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(login))
        .route("/callback", get(callback))
        .route("/logout", get(logout))
}
