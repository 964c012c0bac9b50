use crate::types::PlaylistSummary;

pub const SOURCE_PLAYLIST_NAME: &str = "Discover Weekly";
pub const DESTINATION_PLAYLIST_NAME: &str = "Saved Weekly";

/// Ids of the source and destination playlists, if present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPlaylists {
    pub source_id: Option<String>,
    pub destination_id: Option<String>,
}

/// Finds "Discover Weekly" and "Saved Weekly" by exact name.
///
/// The first playlist carrying a name wins; the scan stops once both are found.
pub fn resolve(playlists: &[PlaylistSummary]) -> ResolvedPlaylists {
    let mut resolved = ResolvedPlaylists::default();

    for playlist in playlists {
        if resolved.source_id.is_none() && playlist.name == SOURCE_PLAYLIST_NAME {
            resolved.source_id = Some(playlist.id.clone());
        }
        if resolved.destination_id.is_none() && playlist.name == DESTINATION_PLAYLIST_NAME {
            resolved.destination_id = Some(playlist.id.clone());
        }
        if resolved.source_id.is_some() && resolved.destination_id.is_some() {
            break;
        }
    }

    resolved
}
