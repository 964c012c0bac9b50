#![allow(dead_code)]

pub mod logs;
pub mod mock_api;

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use savedweekly::{
    error::{AuthError, CatalogError},
    spotify::{CatalogClient, IdentityProvider},
    types::{PlaylistSummary, TokenRecord, TrackEntry, TrackSlot},
    utils,
};

pub fn playlist(name: &str, id: &str) -> PlaylistSummary {
    PlaylistSummary {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn track(n: u32) -> TrackEntry {
    TrackEntry {
        uri: format!("spotify:track:{}", n),
        name: format!("Track {}", n),
        artists: vec![format!("Artist {}", n), "Guest".to_string()],
    }
}

pub fn record_expiring_in(secs: i64) -> TokenRecord {
    TokenRecord {
        access_token: "access-old".to_string(),
        refresh_token: "refresh-old".to_string(),
        expires_at: utils::now_timestamp() + secs,
        scope: "playlist-modify-private".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CurrentUser,
    ListPlaylists(String),
    CreatePlaylist {
        user_id: String,
        name: String,
        public: bool,
    },
    ListItems(String),
    Append(String, Vec<String>),
}

/// In-memory catalog recording every call it receives.
pub struct FakeCatalog {
    pub user_id: String,
    pub playlists: Mutex<Vec<PlaylistSummary>>,
    pub items: HashMap<String, Vec<TrackSlot>>,
    pub fail_create: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn new(playlists: Vec<PlaylistSummary>) -> Self {
        Self {
            user_id: "user-1".to_string(),
            playlists: Mutex::new(playlists),
            items: HashMap::new(),
            fail_create: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_items(mut self, playlist_id: &str, items: Vec<TrackSlot>) -> Self {
        self.items.insert(playlist_id.to_string(), items);
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::CreatePlaylist { .. }))
            .count()
    }

    pub fn appends(&self) -> Vec<(String, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Append(id, uris) => Some((id, uris)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn current_user_id(&self) -> Result<String, CatalogError> {
        self.record(Call::CurrentUser);
        Ok(self.user_id.clone())
    }

    async fn list_playlists(&self, user_id: &str) -> Result<Vec<PlaylistSummary>, CatalogError> {
        self.record(Call::ListPlaylists(user_id.to_string()));
        Ok(self.playlists.lock().unwrap().clone())
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<PlaylistSummary, CatalogError> {
        self.record(Call::CreatePlaylist {
            user_id: user_id.to_string(),
            name: name.to_string(),
            public,
        });
        if self.fail_create {
            return Err(CatalogError::Status {
                status: StatusCode::FORBIDDEN,
                body: "insufficient scope".to_string(),
            });
        }

        let created = playlist(name, "created-1");
        self.playlists.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_playlist_items(&self, playlist_id: &str) -> Result<Vec<TrackSlot>, CatalogError> {
        self.record(Call::ListItems(playlist_id.to_string()));
        Ok(self.items.get(playlist_id).cloned().unwrap_or_default())
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        self.record(Call::Append(playlist_id.to_string(), uris.to_vec()));
        Ok(())
    }
}

/// Identity provider that counts refreshes.
pub struct FakeProvider {
    pub refresh_calls: AtomicUsize,
    pub exchange_calls: AtomicUsize,
    pub expires_in: i64,
    pub fail_refresh: bool,
    pub delay: Duration,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            refresh_calls: AtomicUsize::new(0),
            exchange_calls: AtomicUsize::new(0),
            expires_in: 3600,
            fail_refresh: false,
            delay: Duration::ZERO,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_refresh: true,
            ..Self::new()
        }
    }

    pub fn refreshes(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn authorize_url(&self, state: &str, code_challenge: &str) -> String {
        format!(
            "https://accounts.example/authorize?state={}&code_challenge={}",
            state, code_challenge
        )
    }

    async fn exchange_code(
        &self,
        code: &str,
        _code_verifier: &str,
    ) -> Result<TokenRecord, AuthError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        Ok(TokenRecord {
            access_token: format!("access-{}", code),
            refresh_token: "refresh-issued".to_string(),
            expires_at: utils::now_timestamp() + self.expires_in,
            scope: String::new(),
        })
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenRecord, AuthError> {
        let n = self.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_refresh {
            return Err(AuthError::RefreshFailed("invalid_grant".to_string()));
        }

        Ok(TokenRecord {
            access_token: format!("access-{}", n),
            refresh_token: refresh_token.to_string(),
            expires_at: utils::now_timestamp() + self.expires_in,
            scope: String::new(),
        })
    }
}
