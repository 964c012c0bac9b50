use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, RequestBuilder, Url};

use crate::{
    config::Config,
    error::{AuthError, ConfigError},
    types::{TokenRecord, TokenResponse},
    utils,
};

/// The OAuth authorization server.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the user is sent to in order to grant access.
    fn authorize_url(&self, state: &str, code_challenge: &str) -> String;

    /// Completes the authorization code flow.
    async fn exchange_code(&self, code: &str, code_verifier: &str)
    -> Result<TokenRecord, AuthError>;

    /// Trades a refresh token for a new token record.
    ///
    /// Fails with [`AuthError::RefreshFailed`] for any failure, transport
    /// errors included.
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenRecord, AuthError>;
}

/// Spotify accounts service client.
pub struct SpotifyAuth {
    client: Client,
    client_id: String,
    client_secret: Option<String>,
    redirect_uri: String,
    scope: String,
    auth_url: Url,
    token_url: String,
}

impl SpotifyAuth {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let auth_url = Url::parse(&config.auth_url).map_err(|e| ConfigError::Invalid {
            key: "SPOTIFY_AUTH_URL",
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: Client::new(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
            auth_url,
            token_url: config.token_url.clone(),
        })
    }

    /// Confidential clients authenticate with HTTP Basic, public PKCE clients
    /// only send their id in the form body.
    fn token_request(&self, form: &[(&str, &str)]) -> RequestBuilder {
        let request = self.client.post(&self.token_url).form(form);
        match &self.client_secret {
            Some(secret) => request.header(
                "Authorization",
                format!(
                    "Basic {}",
                    STANDARD.encode(format!("{}:{}", self.client_id, secret))
                ),
            ),
            None => request,
        }
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, String> {
        let res = self
            .token_request(form)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(format!("{}: {}", status, body));
        }

        res.json::<TokenResponse>().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl IdentityProvider for SpotifyAuth {
    fn authorize_url(&self, state: &str, code_challenge: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scope)
            .append_pair("state", state)
            .append_pair("code_challenge", code_challenge)
            .append_pair("code_challenge_method", "S256");
        url.into()
    }

    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenRecord, AuthError> {
        let response = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &self.redirect_uri),
                ("client_id", &self.client_id),
                ("code_verifier", code_verifier),
            ])
            .await
            .map_err(AuthError::ExchangeFailed)?;

        let refresh_token = response
            .refresh_token
            .clone()
            .ok_or_else(|| AuthError::ExchangeFailed("response lacks a refresh token".into()))?;

        Ok(token_record(response, &refresh_token, utils::now_timestamp()))
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenRecord, AuthError> {
        let response = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", &self.client_id),
            ])
            .await
            .map_err(AuthError::RefreshFailed)?;

        Ok(token_record(response, refresh_token, utils::now_timestamp()))
    }
}

/// Turns a token endpoint response into a [`TokenRecord`].
///
/// Spotify does not always rotate the refresh token; when the response lacks
/// one, `previous_refresh_token` is kept.
pub fn token_record(response: TokenResponse, previous_refresh_token: &str, now: i64) -> TokenRecord {
    TokenRecord {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| previous_refresh_token.to_string()),
        expires_at: now + response.expires_in,
        scope: response.scope,
    }
}
