use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{SignedCookieJar, cookie::Cookie};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    api::AppState,
    management::PendingAuthorization,
    utils,
};

#[derive(Debug, Deserialize)]
pub struct RedirectParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Starts the authorization code flow and sends the browser to Spotify.
pub async fn login(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    let existing = state.session_id(&jar);
    let (id, session) = state.sessions.get_or_create(existing.as_deref()).await;

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let csrf_state = utils::generate_state();
    let auth_url = state.provider.authorize_url(&csrf_state, &code_challenge);

    session
        .begin_authorization(PendingAuthorization {
            code_verifier,
            state: csrf_state,
        })
        .await;

    (jar.add(state.session_cookie(id)), Redirect::to(&auth_url))
}

/// OAuth redirect target. Replaces whatever the session held with the newly
/// issued token. A failed sign-in drops the session.
pub async fn redirect(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(params): Query<RedirectParams>,
) -> Response {
    let Some(id) = state.session_id(&jar) else {
        return Redirect::to("/login").into_response();
    };
    let Some(session) = state.sessions.get(&id).await else {
        return Redirect::to("/login").into_response();
    };

    let pending = session.take_pending().await;
    if let Err(e) = session.tokens().sign_out().await {
        warn!(error = %e, "failed to clear session credentials");
    }

    let status = match (params.error, params.code, pending) {
        (Some(error), _, _) => {
            warn!(%error, "authorization denied");
            StatusCode::UNAUTHORIZED
        }
        (None, Some(code), Some(pending))
            if params.state.as_deref() == Some(pending.state.as_str()) =>
        {
            match session.tokens().sign_in(&code, &pending.code_verifier).await {
                Ok(_) => {
                    info!("user signed in");
                    return Redirect::to("/").into_response();
                }
                Err(e) => {
                    warn!(error = %e, "token exchange failed");
                    StatusCode::BAD_GATEWAY
                }
            }
        }
        (None, Some(_), Some(_)) => {
            warn!("authorization state mismatch");
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::BAD_REQUEST,
    };

    state.sessions.remove(&id).await;
    login_failed(status)
}

pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    if let Some(id) = state.session_id(&jar) {
        if let Some(session) = state.sessions.remove(&id).await {
            if let Err(e) = session.tokens().sign_out().await {
                warn!(error = %e, "failed to clear session credentials");
            }
        }
    }

    let jar = jar.remove(Cookie::build(state.config.session_cookie_name.clone()).path("/"));
    (jar, Redirect::to("/login"))
}

fn login_failed(status: StatusCode) -> Response {
    (status, Html("<h4>Login failed.</h4><p><a href=\"/login\">Try again</a></p>")).into_response()
}
