//! Playlist search, feature picking and generation pages

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use tracing::info;

use super::forms::{FeatureForm, SearchForm};
use super::ui;
use crate::error::{ServiceError, ServiceResult};
use crate::services::{self, track_resolver, BuildOutcome, PlaylistLocator};
use crate::session::Authenticated;
use crate::AppState;

const NO_MATCH_MESSAGE: &str =
    "No matching songs with these parameters. Try again with some different parameters.";

/// GET /search
pub async fn search_page(_auth: Authenticated) -> Html<String> {
    Html(ui::search_page(None))
}

/// POST /get_playlists
///
/// Lists the playlists matching the submitted name or query.
pub async fn get_playlists(
    State(state): State<AppState>,
    auth: Authenticated,
    Form(form): Form<SearchForm>,
) -> ServiceResult<Response> {
    let locator = PlaylistLocator::from_form(&form.location, &form.playlist_name);
    if locator.is_blank() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(ui::search_page(Some("Enter a playlist name to search for"))),
        )
            .into_response());
    }

    let found = track_resolver::find_playlists(state.provider.as_ref(), &auth.token, &locator)
        .await
        .map_err(ServiceError::from);
    let playlists = auth.forget_if_expired(&state, found).await?;

    Ok(Html(ui::results_page(locator.text(), &playlists)).into_response())
}

/// Catalog playlist ids are base62; anything else never reaches a header or
/// a provider URL
fn checked_playlist_id(playlist_id: &str) -> ServiceResult<&str> {
    if !playlist_id.is_empty() && playlist_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(playlist_id)
    } else {
        Err(ServiceError::InvalidInput(format!(
            "'{}' is not a playlist id",
            playlist_id.escape_debug()
        )))
    }
}

/// GET|POST /put_param/:playlist_id
pub async fn put_param(Path(playlist_id): Path<String>) -> ServiceResult<Redirect> {
    let playlist_id = checked_playlist_id(&playlist_id)?;
    Ok(Redirect::to(&format!("/audio_features/{}", playlist_id)))
}

/// GET /audio_features/:playlist_id
pub async fn pick_features(
    _auth: Authenticated,
    Path(playlist_id): Path<String>,
) -> ServiceResult<Html<String>> {
    let playlist_id = checked_playlist_id(&playlist_id)?;
    Ok(Html(ui::features_page(playlist_id, None)))
}

/// POST /new_playlist/:playlist_id
///
/// Validates the form, runs the filter and shows the generated playlist, or
/// re-renders the form with an inline message.
pub async fn new_playlist(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(playlist_id): Path<String>,
    Form(form): Form<FeatureForm>,
) -> ServiceResult<Response> {
    let playlist_id = checked_playlist_id(&playlist_id)?;
    let targets = match form.to_targets() {
        Ok(targets) => targets,
        Err(e) => {
            let message = ServiceError::from(e).to_string();
            return Ok((
                StatusCode::BAD_REQUEST,
                Html(ui::features_page(playlist_id, Some(&message))),
            )
                .into_response());
        }
    };

    info!(
        playlist_id = %playlist_id,
        targets = ?targets,
        "Generating filtered playlist"
    );

    let built = services::build_filtered_playlist(
        state.provider.as_ref(),
        &auth.token,
        playlist_id,
        &targets,
    )
    .await;

    match auth.forget_if_expired(&state, built).await? {
        BuildOutcome::Created(result) => Ok(Html(ui::playlist_page(&result)).into_response()),
        BuildOutcome::NoMatch => Ok(Html(ui::features_page(
            playlist_id,
            Some(NO_MATCH_MESSAGE),
        ))
        .into_response()),
    }
}

pub fn playlist_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_page))
        .route("/get_playlists", post(get_playlists))
        .route("/put_param/:playlist_id", get(put_param).post(put_param))
        .route("/audio_features/:playlist_id", get(pick_features))
        .route("/new_playlist/:playlist_id", post(new_playlist))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_playlist_id() {
        assert_eq!(
            checked_playlist_id("37i9dQZF1DXcBWIGoYBM5M").unwrap(),
            "37i9dQZF1DXcBWIGoYBM5M"
        );

        for bad in ["", "abc\ndef", "abc/def", "abc def", "abc%0A", "ab\u{7f}"] {
            assert!(
                matches!(checked_playlist_id(bad), Err(ServiceError::InvalidInput(_))),
                "{:?}",
                bad
            );
        }
    }
}
