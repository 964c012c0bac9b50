//! Error types for every layer of the crate.
//!
//! Components return these typed errors; only the HTTP handlers and the CLI
//! commands decide what the caller gets to see.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a [`CredentialStore`](crate::management::CredentialStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential store holds malformed data: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures of the token lifecycle.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token record is cached for the current user.
    #[error("not authenticated")]
    NotAuthenticated,
    /// The identity provider rejected or failed the refresh. The cached
    /// record is left as it was.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),
    #[error("authorization code exchange failed: {0}")]
    ExchangeFailed(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures talking to the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to send request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("catalog responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Failures of a playlist synchronization.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Discover Weekly playlist not found.")]
    SourcePlaylistNotFound,
    #[error("No tracks found in Discover Weekly")]
    NoTracksFound,
    #[error("failed to create the Saved Weekly playlist: {0}")]
    DestinationCreateFailed(#[source] CatalogError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl SyncError {
    /// Conditions reported to the caller as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SourcePlaylistNotFound | Self::NoTracksFound)
    }

    /// Conditions after which the user has to go through authorization again.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::NotAuthenticated | AuthError::RefreshFailed(_))
        )
    }
}

/// Invalid or incomplete configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}
