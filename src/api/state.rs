use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::{
    SignedCookieJar,
    cookie::{Cookie, Key, SameSite},
};
use reqwest::Client;
use sha2::{Digest, Sha512};

use crate::{
    config::Config,
    error::ConfigError,
    management::{Session, SessionStore},
    spotify::{IdentityProvider, SpotifyAuth, SpotifyCatalog},
};

/// Shared state of the web server.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn IdentityProvider>,
    pub sessions: Arc<SessionStore>,
    http: Client,
    key: Key,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let provider: Arc<dyn IdentityProvider> = Arc::new(SpotifyAuth::new(&config)?);
        let key = signing_key(config.session_secret()?);
        Ok(Self::with_provider(config, provider, key))
    }

    pub fn with_provider(config: Config, provider: Arc<dyn IdentityProvider>, key: Key) -> Self {
        let sessions = SessionStore::with_limits(
            Arc::clone(&provider),
            config.session_idle_timeout,
            config.max_sessions,
        );
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            provider,
            http: Client::new(),
            key,
        }
    }

    pub fn catalog(&self, access_token: &str) -> SpotifyCatalog {
        SpotifyCatalog::with_client(self.http.clone(), &self.config.api_url, access_token)
    }

    pub fn session_id(&self, jar: &SignedCookieJar) -> Option<String> {
        jar.get(&self.config.session_cookie_name)
            .map(|cookie| cookie.value().to_string())
    }

    pub async fn current_session(&self, jar: &SignedCookieJar) -> Option<Arc<Session>> {
        let id = self.session_id(jar)?;
        self.sessions.get(&id).await
    }

    pub fn session_cookie(&self, id: String) -> Cookie<'static> {
        Cookie::build((self.config.session_cookie_name.clone(), id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// Stretches the configured secret to the 64 bytes a cookie [`Key`] needs.
pub fn signing_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}
