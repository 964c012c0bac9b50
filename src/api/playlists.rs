use axum::{Json, extract::State};
use axum_extra::extract::SignedCookieJar;
use serde::Serialize;
use tracing::warn;

use crate::{
    api::{AppState, ApiError},
    error::AuthError,
    management::PlaylistSynchronizer,
    types::{PlaylistSummary, SyncResult, TrackDetails},
};

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub message: String,
    pub added_songs: Vec<TrackDetails>,
    pub created_playlist: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub skipped: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

fn log_token_error(e: &AuthError) {
    if !matches!(e, AuthError::NotAuthenticated) {
        warn!(error = %e, "could not obtain an access token");
    }
}

impl From<SyncResult> for SaveResponse {
    fn from(result: SyncResult) -> Self {
        Self {
            message: "Songs added successfully!".to_string(),
            added_songs: result.added_track_details,
            created_playlist: result.created_destination,
            skipped: result.skipped_slots,
        }
    }
}

pub async fn save_discover_weekly(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Json<SaveResponse>, ApiError> {
    let session = state
        .current_session(&jar)
        .await
        .ok_or_else(|| ApiError::saving(AuthError::NotAuthenticated))?;

    let token = session
        .tokens()
        .ensure_valid_token()
        .await
        .inspect_err(log_token_error)
        .map_err(ApiError::saving)?;

    let synchronizer = PlaylistSynchronizer::new(state.catalog(&token.access_token));
    let result = synchronizer
        .sync_current_user()
        .await
        .map_err(ApiError::saving)?;

    Ok(Json(SaveResponse::from(result)))
}

pub async fn get_playlists(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Json<Vec<PlaylistSummary>>, ApiError> {
    let session = state
        .current_session(&jar)
        .await
        .ok_or_else(|| ApiError::listing(AuthError::NotAuthenticated))?;

    let token = session
        .tokens()
        .ensure_valid_token()
        .await
        .inspect_err(log_token_error)
        .map_err(ApiError::listing)?;

    let synchronizer = PlaylistSynchronizer::new(state.catalog(&token.access_token));
    let playlists = synchronizer
        .list_current_user_playlists()
        .await
        .map_err(ApiError::listing)?;

    Ok(Json(playlists))
}
