use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::SyncError;

const SAVE_FAILED: &str = "An error occurred while saving the playlist.";
const LIST_FAILED: &str = "An error occurred while fetching playlists.";

/// A [`SyncError`] on its way out of a handler.
///
/// Unexpected failures are reported with a generic message; their details
/// stay in the server log.
#[derive(Debug)]
pub struct ApiError {
    error: SyncError,
    fallback: &'static str,
}

impl ApiError {
    pub fn saving(error: impl Into<SyncError>) -> Self {
        Self {
            error: error.into(),
            fallback: SAVE_FAILED,
        }
    }

    pub fn listing(error: impl Into<SyncError>) -> Self {
        Self {
            error: error.into(),
            fallback: LIST_FAILED,
        }
    }

    pub fn status_and_message(&self) -> (StatusCode, String) {
        if self.error.is_not_found() {
            return (StatusCode::NOT_FOUND, self.error.to_string());
        }
        if self.error.is_unauthenticated() {
            return (
                StatusCode::UNAUTHORIZED,
                "Not authenticated. Please log in again.".to_string(),
            );
        }
        match self.error {
            SyncError::DestinationCreateFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not create the Saved Weekly playlist.".to_string(),
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.fallback.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
