//! # API Module
//!
//! HTTP endpoints of the savedweekly web server, built on
//! [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! ### Pages and authentication
//!
//! - [`index`] - main page, or a redirect to `/login` without a token
//! - [`login`] - starts the OAuth 2.0 authorization code flow with PKCE
//! - [`redirect`] - OAuth redirect target, exchanges the code for a token
//! - [`logout`] - forgets the session and its token
//!
//! ### Playlists
//!
//! - [`save_discover_weekly`] - copies Discover Weekly into Saved Weekly
//! - [`get_playlists`] - lists the user's playlists as `{name, id}`
//!
//! ### Monitoring
//!
//! - [`health`] - status and version
//!
//! ### Command line
//!
//! - [`callback`] - redirect target of the temporary server run by
//!   `savedweekly auth`; hands the token back through shared state
//!
//! ## Sessions
//!
//! Browsers are told apart by an opaque id in a signed cookie; see
//! [`AppState`]. Every session owns its credential store and refresh lock,
//! so requests of different users never contend.
//!
//! ## Errors
//!
//! Handlers map failures through [`ApiError`]: `404` for a missing Discover
//! Weekly or an empty one, `401` when the user has to sign in again, and a
//! generic `500` for everything else.

mod auth;
mod callback;
mod error;
mod health;
mod index;
mod playlists;
mod state;

pub use auth::RedirectParams;
pub use auth::login;
pub use auth::logout;
pub use auth::redirect;
pub use callback::callback;
pub use error::ApiError;
pub use health::health;
pub use index::index;
pub use playlists::SaveResponse;
pub use playlists::get_playlists;
pub use playlists::save_discover_weekly;
pub use state::AppState;
pub use state::signing_key;
