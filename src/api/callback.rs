use std::sync::Arc;

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{api::RedirectParams, spotify::IdentityProvider, types::PkceToken, warning};

/// Redirect target of the temporary server started by `savedweekly auth`.
pub async fn callback(
    Query(params): Query<RedirectParams>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
    Extension(provider): Extension<Arc<dyn IdentityProvider>>,
) -> Html<&'static str> {
    let Some(code) = params.code else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(pkce_state) = state.as_mut() else {
        return Html("<h4>Missing PKCE code verifier.</h4>");
    };

    if params.state.as_deref() != Some(pkce_state.state.as_str()) {
        warning!("Authorization state mismatch, ignoring callback.");
        return Html("<h4>Login failed.</h4>");
    }

    match provider.exchange_code(&code, &pkce_state.code_verifier).await {
        Ok(token) => {
            pkce_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
