use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{PlaylistSummary, PlaylistTableRow, TrackDetails, TrackTableRow};

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// CSRF `state` parameter for the authorization request.
pub fn generate_state() -> String {
    random_alphanumeric(16)
}

pub fn generate_session_id() -> String {
    random_alphanumeric(32)
}

/// Current unix time in seconds.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

pub fn playlist_table_rows(playlists: &[PlaylistSummary]) -> Vec<PlaylistTableRow> {
    playlists
        .iter()
        .map(|p| PlaylistTableRow {
            name: p.name.clone(),
            id: p.id.clone(),
        })
        .collect()
}

pub fn track_table_rows(tracks: &[TrackDetails]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artists: t.artists.join(", "),
        })
        .collect()
}
