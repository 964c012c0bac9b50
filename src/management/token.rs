use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    error::AuthError,
    management::CredentialStore,
    spotify::IdentityProvider,
    types::TokenRecord,
    utils,
};

/// A token closer than this to its expiry is refreshed before use.
pub const REFRESH_MARGIN_SECS: i64 = 60;

pub fn is_expired(record: &TokenRecord, now: i64) -> bool {
    record.expires_at - now < REFRESH_MARGIN_SECS
}

/// Hands out access tokens that stay valid for at least
/// [`REFRESH_MARGIN_SECS`], refreshing the cached record when needed.
///
/// One manager belongs to one user. Refreshes are serialized so two requests
/// racing on a stale token do not both spend the refresh token.
pub struct TokenManager<S> {
    store: S,
    provider: Arc<dyn IdentityProvider>,
    refresh_lock: Mutex<()>,
}

impl<S: CredentialStore> TokenManager<S> {
    pub fn new(store: S, provider: Arc<dyn IdentityProvider>) -> Self {
        TokenManager {
            store,
            provider,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.provider
    }

    /// Returns the cached record, refreshing it first if it is about to expire.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotAuthenticated`] when nothing is cached.
    /// - [`AuthError::RefreshFailed`] when the provider refuses the refresh;
    ///   the cached record is not touched.
    pub async fn ensure_valid_token(&self) -> Result<TokenRecord, AuthError> {
        let record = self.cached().await?;
        if !is_expired(&record, utils::now_timestamp()) {
            return Ok(record);
        }

        let _guard = self.refresh_lock.lock().await;

        // whoever held the lock before us may already have refreshed
        let record = self.cached().await?;
        if !is_expired(&record, utils::now_timestamp()) {
            return Ok(record);
        }

        debug!(expires_at = record.expires_at, "refreshing access token");
        let refreshed = self
            .provider
            .refresh_token(&record.refresh_token)
            .await
            .map_err(|e| match e {
                AuthError::RefreshFailed(_) => e,
                other => AuthError::RefreshFailed(other.to_string()),
            })
            .inspect_err(|e| warn!(error = %e, "token refresh failed"))?;

        if is_expired(&refreshed, utils::now_timestamp()) {
            return Err(AuthError::RefreshFailed(format!(
                "refreshed token expires within {} seconds",
                REFRESH_MARGIN_SECS
            )));
        }

        // the provider may already have rotated the refresh token
        self.store
            .set(refreshed.clone())
            .await
            .inspect_err(|e| warn!(error = %e, "refreshed token could not be stored"))?;
        Ok(refreshed)
    }

    /// Exchanges an authorization code and caches the resulting record.
    pub async fn sign_in(&self, code: &str, code_verifier: &str) -> Result<TokenRecord, AuthError> {
        let record = self.provider.exchange_code(code, code_verifier).await?;
        self.store.set(record.clone()).await?;
        Ok(record)
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.store.clear().await?;
        Ok(())
    }

    pub async fn is_signed_in(&self) -> Result<bool, AuthError> {
        Ok(self.store.get().await?.is_some())
    }

    async fn cached(&self) -> Result<TokenRecord, AuthError> {
        self.store.get().await?.ok_or(AuthError::NotAuthenticated)
    }
}
