//! Configuration management for savedweekly.
//!
//! Values come from the process environment and from `.env` files. Loading
//! follows this order, earlier sources winning:
//! 1. Environment variables
//! 2. `.env` in the local data directory (`<data_local_dir>/savedweekly/.env`)
//! 3. `.env` in the current working directory
//! 4. Built-in defaults for the optional keys
//!
//! Everything is read once into a [`Config`] that is passed to the components
//! that need it; nothing reads the environment after startup.

use std::{env, fmt, io, path::PathBuf, str::FromStr, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_SCOPE: &str =
    "user-library-read playlist-modify-public playlist-modify-private playlist-read-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "spotify_session";

/// Web sessions unused for this many seconds are dropped.
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Minimum length of `SESSION_SECRET` in bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// Loads `.env` files into the process environment.
///
/// Creates `<data_local_dir>/savedweekly/` if it does not exist yet. A missing
/// `.env` file in either location is not an error; a malformed one is.
///
/// # Example
///
/// ```
/// use savedweekly::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    optional_env_file(dotenv::from_path(&path)).map_err(|e| e.to_string())?;
    optional_env_file(dotenv::dotenv()).map_err(|e| e.to_string())?;
    Ok(())
}

fn parse_optional<T>(value: Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Turns a missing `.env` file into `Ok(None)`. Parse errors and other I/O
/// failures are passed through.
pub fn optional_env_file<T>(result: Result<T, dotenv::Error>) -> Result<Option<T>, dotenv::Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dotenv::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Base directory for the `.env` file and the CLI token cache.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("savedweekly");
    path
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    /// When absent the authorization code flow runs as a public PKCE client.
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
    pub session_secret: Option<String>,
    pub session_cookie_name: String,
    pub session_idle_timeout: Duration,
    /// Upper bound on concurrently held web sessions, at least 1.
    pub max_sessions: usize,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] when `SPOTIFY_CLIENT_ID` or
    /// `SPOTIFY_REDIRECT_URI` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: get("SPOTIFY_CLIENT_SECRET"),
            redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
            scope: get("SPOTIFY_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: get("SPOTIFY_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get("SPOTIFY_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            server_addr: get("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            session_secret: get("SESSION_SECRET"),
            session_cookie_name: get("SESSION_COOKIE_NAME")
                .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string()),
            session_idle_timeout: Duration::from_secs(
                parse_optional(get("SESSION_IDLE_TIMEOUT_SECS"), "SESSION_IDLE_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_SESSION_IDLE_SECS),
            ),
            max_sessions: match parse_optional(get("SESSION_MAX_COUNT"), "SESSION_MAX_COUNT")? {
                Some(0) => {
                    return Err(ConfigError::Invalid {
                        key: "SESSION_MAX_COUNT",
                        reason: "must be at least 1".to_string(),
                    });
                }
                Some(n) => n,
                None => DEFAULT_MAX_SESSIONS,
            },
        })
    }

    /// Session signing secret, required by the web server.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] when unset, [`ConfigError::Invalid`] when
    /// shorter than [`MIN_SESSION_SECRET_LEN`] bytes.
    pub fn session_secret(&self) -> Result<&str, ConfigError> {
        let secret = self
            .session_secret
            .as_deref()
            .ok_or(ConfigError::Missing("SESSION_SECRET"))?;
        if secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "SESSION_SECRET",
                reason: format!("must be at least {} bytes", MIN_SESSION_SECRET_LEN),
            });
        }
        Ok(secret)
    }
}
