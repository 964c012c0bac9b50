use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Cached OAuth credential of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds since the unix epoch.
    pub expires_at: i64,
    #[serde(default)]
    pub scope: String,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub state: String,
    pub token: Option<TokenRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
}

/// One position in a playlist. `None` marks a slot whose track is gone.
pub type TrackSlot = Option<TrackEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDetails {
    pub name: String,
    pub artists: Vec<String>,
}

impl From<&TrackEntry> for TrackDetails {
    fn from(entry: &TrackEntry) -> Self {
        Self {
            name: entry.name.clone(),
            artists: entry.artists.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub added_track_details: Vec<TrackDetails>,
    pub created_destination: bool,
    pub skipped_slots: usize,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub scope: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
