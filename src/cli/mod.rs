//! # CLI Module
//!
//! Terminal front-end of savedweekly. The commands share the core with the
//! web server but keep a single user's token in a [`FileCredentialStore`]
//! instead of a browser session, which makes `savedweekly sync` usable from
//! cron.
//!
//! ## Commands
//!
//! - [`auth`] - authorization code flow with PKCE through the browser
//! - [`logout`] - forget the cached token
//! - [`sync`] - copy Discover Weekly into Saved Weekly
//! - [`list_playlists`] - table of the user's playlists
//! - [`serve`] - run the web server
//!
//! ## Output
//!
//! Status lines go through the crate's `info!`, `success!`, `warning!` and
//! `error!` macros; `error!` terminates the process with exit code 1.
//! Network calls show an `indicatif` spinner and listings are rendered with
//! `tabled`.
//!
//! ## Usage
//!
//! ```bash
//! savedweekly auth          # sign in once
//! savedweekly sync          # every week, e.g. from cron
//! savedweekly playlists     # check the result
//! ```

mod auth;
mod playlists;
mod serve;
mod sync;

use std::sync::Arc;

use crate::{
    config::Config,
    error,
    error::AuthError,
    management::{FileCredentialStore, TokenManager},
    spotify::{IdentityProvider, SpotifyAuth},
    types::TokenRecord,
};

pub use auth::auth;
pub use auth::logout;
pub use playlists::list_playlists;
pub use serve::serve;
pub use sync::sync;

fn identity_provider(config: &Config) -> Arc<dyn IdentityProvider> {
    match SpotifyAuth::new(config) {
        Ok(provider) => Arc::new(provider),
        Err(e) => error!("Invalid configuration: {}", e),
    }
}

fn file_token_manager(config: &Config) -> TokenManager<FileCredentialStore> {
    TokenManager::new(FileCredentialStore::default(), identity_provider(config))
}

async fn valid_token(config: &Config) -> TokenRecord {
    match file_token_manager(config).ensure_valid_token().await {
        Ok(token) => token,
        Err(AuthError::NotAuthenticated) => {
            error!("Not authenticated. Please run savedweekly auth")
        }
        Err(e) => error!(
            "Failed to get a valid token. Please run savedweekly auth\n Error: {}",
            e
        ),
    }
}
