use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    cli::{file_token_manager, identity_provider},
    config::Config,
    error,
    management::{CredentialStore, FileCredentialStore},
    server::start_callback_server,
    success,
    types::{PkceToken, TokenRecord},
    utils, warning,
};

/// Runs the authorization code flow with PKCE in the user's browser.
///
/// A temporary server on `SERVER_ADDRESS` receives the redirect and exchanges
/// the code; this function polls for the result for up to 60 seconds and
/// saves the token with a [`FileCredentialStore`].
pub async fn auth(config: &Config) {
    let provider = identity_provider(config);

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let csrf_state = utils::generate_state();

    // store verifier in shared state before redirect
    let shared_state = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        state: csrf_state.clone(),
        token: None,
    })));

    let server_state = Arc::clone(&shared_state);
    let server_provider = Arc::clone(&provider);
    let server_addr = config.server_addr.clone();
    tokio::spawn(async move {
        if let Err(e) = start_callback_server(&server_addr, server_state, server_provider).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = provider.authorize_url(&csrf_state, &code_challenge);
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(shared_state).await {
        Some(token) => {
            let store = FileCredentialStore::default();
            if let Err(e) = store.set(token).await {
                error!("Failed to save token to cache: {}", e);
            }
            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Forgets the cached token.
pub async fn logout(config: &Config) {
    match file_token_manager(config).sign_out().await {
        Ok(()) => success!("Logged out."),
        Err(e) => error!("Failed to remove cached token: {}", e),
    }
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<TokenRecord> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
