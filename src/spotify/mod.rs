//! # Spotify Integration Module
//!
//! The two remote collaborators of savedweekly, each behind a trait so the
//! management layer can be driven by test doubles:
//!
//! - [`auth`] - the accounts service: authorization URL, code exchange and
//!   token refresh ([`IdentityProvider`], implemented by [`SpotifyAuth`]).
//! - [`catalog`] - the Web API: current user, playlists, playlist items and
//!   appending tracks ([`CatalogClient`], implemented by [`SpotifyCatalog`]).
//!
//! ## API Coverage
//!
//! ### Authentication
//! - `GET /authorize` - authorization code flow with PKCE (S256)
//! - `POST /api/token` - code exchange and refresh
//!
//! ### User Data
//! - `GET /me` - current user id
//! - `GET /me/playlists` - owned and followed playlists, paginated
//!
//! ### Playlist Operations
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `GET /playlists/{playlist_id}/tracks` - playlist items, paginated
//! - `POST /playlists/{playlist_id}/tracks` - add tracks, 100 per request
//!
//! ## Error Types
//!
//! - [`AuthError`](crate::error::AuthError) from the accounts service
//! - [`CatalogError`](crate::error::CatalogError) from the Web API
//!
//! Requests are never retried. Non-2xx responses become
//! `CatalogError::Status` carrying the response body.

pub mod auth;
pub mod catalog;

pub use auth::{IdentityProvider, SpotifyAuth};
pub use catalog::{CatalogClient, SpotifyCatalog};
