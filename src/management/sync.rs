use tracing::{debug, error, info, warn};

use crate::{
    error::SyncError,
    management::resolver::{self, DESTINATION_PLAYLIST_NAME},
    spotify::CatalogClient,
    types::{PlaylistSummary, SyncResult, TrackDetails, TrackSlot},
};

/// Tracks pulled out of a playlist listing, tombstoned slots removed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractedTracks {
    pub uris: Vec<String>,
    pub details: Vec<TrackDetails>,
    pub skipped: usize,
}

pub fn extract_tracks(slots: &[TrackSlot]) -> ExtractedTracks {
    let mut extracted = ExtractedTracks::default();

    for slot in slots {
        match slot {
            Some(track) => {
                extracted.uris.push(track.uri.clone());
                extracted.details.push(TrackDetails::from(track));
            }
            None => extracted.skipped += 1,
        }
    }

    extracted
}

/// Copies Discover Weekly into Saved Weekly.
pub struct PlaylistSynchronizer<C> {
    catalog: C,
}

impl<C: CatalogClient> PlaylistSynchronizer<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Appends the current Discover Weekly tracks of `user_id` to their
    /// Saved Weekly playlist, creating it as a private playlist first if
    /// needed.
    ///
    /// Tracks already present in Saved Weekly are appended again.
    ///
    /// # Errors
    ///
    /// - [`SyncError::SourcePlaylistNotFound`] before any write.
    /// - [`SyncError::DestinationCreateFailed`] when creation is refused.
    /// - [`SyncError::NoTracksFound`] when the source has no live track;
    ///   nothing is appended, although a destination may have been created.
    /// - [`SyncError::Catalog`] for any other remote failure.
    pub async fn sync_discover_weekly(&self, user_id: &str) -> Result<SyncResult, SyncError> {
        let playlists = self.catalog.list_playlists(user_id).await?;
        debug!(count = playlists.len(), "fetched playlists");

        let resolved = resolver::resolve(&playlists);
        let Some(source_id) = resolved.source_id else {
            return Err(SyncError::SourcePlaylistNotFound);
        };

        let (destination_id, created_destination) = match resolved.destination_id {
            Some(id) => (id, false),
            None => {
                let created = self
                    .catalog
                    .create_playlist(user_id, DESTINATION_PLAYLIST_NAME, false)
                    .await
                    .map_err(SyncError::DestinationCreateFailed)?;
                info!(playlist_id = %created.id, "created {} playlist", DESTINATION_PLAYLIST_NAME);
                (created.id, true)
            }
        };

        let slots = self.catalog.list_playlist_items(&source_id).await?;
        let extracted = extract_tracks(&slots);
        if extracted.skipped > 0 {
            warn!(skipped = extracted.skipped, "skipped unavailable tracks");
        }

        if extracted.uris.is_empty() {
            return Err(SyncError::NoTracksFound);
        }

        self.catalog
            .append_tracks(&destination_id, &extracted.uris)
            .await?;
        info!(
            added = extracted.uris.len(),
            destination = %destination_id,
            "saved discover weekly"
        );

        Ok(SyncResult {
            added_track_details: extracted.details,
            created_destination,
            skipped_slots: extracted.skipped,
        })
    }

    pub async fn list_user_playlists(&self, user_id: &str) -> Result<Vec<PlaylistSummary>, SyncError> {
        Ok(self.catalog.list_playlists(user_id).await?)
    }

    /// Runs [`Self::sync_discover_weekly`] for the user the catalog client is
    /// authorized as. Unexpected failures are logged here.
    pub async fn sync_current_user(&self) -> Result<SyncResult, SyncError> {
        let result: Result<SyncResult, SyncError> = async {
            let user_id = self.catalog.current_user_id().await?;
            self.sync_discover_weekly(&user_id).await
        }
        .await;

        result.inspect_err(|e| {
            if !e.is_not_found() {
                error!(error = %e, "saving discover weekly failed");
            }
        })
    }

    pub async fn list_current_user_playlists(&self) -> Result<Vec<PlaylistSummary>, SyncError> {
        let result: Result<Vec<PlaylistSummary>, SyncError> = async {
            let user_id = self.catalog.current_user_id().await?;
            self.list_user_playlists(&user_id).await
        }
        .await;

        result.inspect_err(|e| error!(error = %e, "listing playlists failed"))
    }
}
