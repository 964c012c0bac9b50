use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::CatalogError,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CurrentUserResponse, Paging, Playlist, PlaylistItem, PlaylistSummary, TrackEntry,
        TrackSlot,
    },
};

/// Spotify rejects more than 100 URIs in one add-items request.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

const PLAYLISTS_PAGE_LIMIT: u32 = 50;
const ITEMS_PAGE_LIMIT: u32 = 100;

/// The calls the synchronizer makes against the music service.
///
/// Listing operations return the whole collection; implementations follow
/// pagination themselves.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn current_user_id(&self) -> Result<String, CatalogError>;

    async fn list_playlists(&self, user_id: &str) -> Result<Vec<PlaylistSummary>, CatalogError>;

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<PlaylistSummary, CatalogError>;

    async fn list_playlist_items(&self, playlist_id: &str) -> Result<Vec<TrackSlot>, CatalogError>;

    /// Appends `uris` in order.
    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError>;
}

/// Spotify Web API client bound to one access token.
pub struct SpotifyCatalog {
    client: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyCatalog {
    pub fn new(api_url: &str, access_token: &str) -> Self {
        Self::with_client(Client::new(), api_url, access_token)
    }

    pub fn with_client(client: Client, api_url: &str, access_token: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let res = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(CatalogError::Request)?;

        decode(res).await
    }

    /// Walks `next` links starting at `url` and returns every item.
    async fn get_all_pages<T: DeserializeOwned>(&self, url: String) -> Result<Vec<T>, CatalogError> {
        let mut items = Vec::new();
        let mut next = Some(url);

        while let Some(url) = next {
            debug!(%url, "fetching page");
            let page: Paging<T> = self.get_json(&url).await?;
            items.extend(page.items);
            next = page.next;
        }

        Ok(items)
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, CatalogError> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(CatalogError::Status { status, body });
    }

    res.json::<T>().await.map_err(CatalogError::Decode)
}

#[async_trait]
impl CatalogClient for SpotifyCatalog {
    async fn current_user_id(&self) -> Result<String, CatalogError> {
        let user: CurrentUserResponse = self.get_json(&format!("{}/me", self.api_url)).await?;
        Ok(user.id)
    }

    async fn list_playlists(&self, _user_id: &str) -> Result<Vec<PlaylistSummary>, CatalogError> {
        // /me/playlists also returns followed playlists, which is where
        // Discover Weekly lives; /users/{id}/playlists would miss it.
        let url = format!(
            "{uri}/me/playlists?limit={limit}",
            uri = self.api_url,
            limit = PLAYLISTS_PAGE_LIMIT
        );
        let playlists: Vec<Option<Playlist>> = self.get_all_pages(url).await?;

        Ok(playlists
            .into_iter()
            .flatten()
            .map(|p| PlaylistSummary {
                id: p.id,
                name: p.name,
            })
            .collect())
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<PlaylistSummary, CatalogError> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Songs saved from Discover Weekly".to_string(),
            public,
        };

        let res = self
            .client
            .post(format!("{}/users/{}/playlists", self.api_url, user_id))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(CatalogError::Request)?;

        let playlist: Playlist = decode(res).await?;
        Ok(PlaylistSummary {
            id: playlist.id,
            name: playlist.name,
        })
    }

    async fn list_playlist_items(&self, playlist_id: &str) -> Result<Vec<TrackSlot>, CatalogError> {
        let url = format!(
            "{uri}/playlists/{id}/tracks?limit={limit}",
            uri = self.api_url,
            id = playlist_id,
            limit = ITEMS_PAGE_LIMIT
        );
        let items: Vec<PlaylistItem> = self.get_all_pages(url).await?;

        Ok(items
            .into_iter()
            .map(|item| {
                item.track.map(|track| TrackEntry {
                    uri: track.uri,
                    name: track.name,
                    artists: track.artists.into_iter().map(|a| a.name).collect(),
                })
            })
            .collect())
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        let url = format!("{}/playlists/{}/tracks", self.api_url, playlist_id);

        for chunk in uris.chunks(MAX_TRACKS_PER_REQUEST) {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            let res = self
                .client
                .post(&url)
                .bearer_auth(&self.access_token)
                .json(&body)
                .send()
                .await
                .map_err(CatalogError::Request)?;

            let added: AddTrackToPlaylistResponse = decode(res).await?;
            debug!(
                playlist_id,
                count = chunk.len(),
                snapshot_id = %added.snapshot_id,
                "appended tracks"
            );
        }

        Ok(())
    }
}
